// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The call-stack tracer and its scope guard.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, ThreadId};

use super::call_stack_trace::CallStackTrace;
use super::call_trace::CallTrace;
use super::error::TracerError;
use super::formatter::PlainTextFormatter;
use super::printer::{CallStackTracePrinter, LogPrinter};
use super::settings::TracingSettings;

static GLOBAL_TRACER: OnceLock<CallStackTracer> = OnceLock::new();

/// Records one stack of call traces per thread and prints them on demand.
///
/// The process-wide instance is reached through [`global`](Self::global) and
/// is the one used by the tracing macros. Separate instances can be created
/// for isolated use.
pub struct CallStackTracer {
    stacks: RwLock<HashMap<ThreadId, CallStackTrace>>,
    printer: RwLock<Option<Arc<dyn CallStackTracePrinter>>>,
    settings: RwLock<TracingSettings>,
}

fn read_lock<'a, T>(lock: &'a RwLock<T>, what: &str) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| {
        log::error!("The {what} lock of the call stack tracer was poisoned. Recovering.");
        poisoned.into_inner()
    })
}

fn write_lock<'a, T>(lock: &'a RwLock<T>, what: &str) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| {
        log::error!("The {what} lock of the call stack tracer was poisoned. Recovering.");
        poisoned.into_inner()
    })
}

/// Returns the textual identifier of the calling thread: its name when it has
/// one, its id otherwise.
fn current_thread_label() -> String {
    let current = thread::current();
    match current.name() {
        Some(name) => name.to_owned(),
        None => format!("{:?}", current.id()),
    }
}

impl CallStackTracer {
    /// Creates a tracer with default settings and no printer.
    pub fn new() -> Self {
        Self::with_settings(TracingSettings::default())
    }

    /// Creates a tracer configured with `settings`.
    pub fn with_settings(settings: TracingSettings) -> Self {
        let tracer = Self {
            stacks: RwLock::new(HashMap::new()),
            printer: RwLock::new(None),
            settings: RwLock::new(TracingSettings::default()),
        };
        tracer.configure(settings);
        tracer
    }

    /// Returns the process-wide tracer.
    pub fn global() -> &'static CallStackTracer {
        GLOBAL_TRACER.get_or_init(CallStackTracer::new)
    }

    /// Pushes `trace` onto the calling thread's stack, creating the stack if
    /// the thread has none yet.
    pub fn add_trace(&self, trace: CallTrace<'_>) {
        let trace = trace.into_owned();
        log::trace!("Entering '{}'.", trace.function_signature());

        let mut stacks = write_lock(&self.stacks, "stacks");
        stacks
            .entry(thread::current().id())
            .or_insert_with(|| CallStackTrace::new(current_thread_label()))
            .push(trace);
    }

    /// Pops the last trace of the calling thread's stack. The stack is
    /// discarded once empty.
    pub fn remove_last_trace(&self) {
        let thread_id = thread::current().id();
        let mut stacks = write_lock(&self.stacks, "stacks");

        let Some(stack) = stacks.get_mut(&thread_id) else {
            log::warn!(
                "No call trace to remove for the current thread ({}).",
                current_thread_label()
            );
            return;
        };

        if let Some(trace) = stack.pop() {
            log::trace!("Leaving '{}'.", trace.function_signature());
        }

        if stack.is_empty() {
            stacks.remove(&thread_id);
        }
    }

    /// Prints the calling thread's stack through the installed printer.
    pub fn dump(&self) -> Result<(), TracerError> {
        let printer = self.printer().ok_or(TracerError::NoPrinter)?;

        let stacks = read_lock(&self.stacks, "stacks");
        match stacks.get(&thread::current().id()) {
            Some(stack) => printer.print_call_stack_trace(stack),
            None => printer.print_string(&format!(
                "There are no call stack traces for the current thread ({}).\n",
                current_thread_label()
            )),
        }
    }

    /// Returns the installed printer.
    pub fn printer(&self) -> Option<Arc<dyn CallStackTracePrinter>> {
        read_lock(&self.printer, "printer").clone()
    }

    /// Installs `printer`, replacing the previous one.
    pub fn set_printer(&self, printer: Arc<dyn CallStackTracePrinter>) {
        *write_lock(&self.printer, "printer") = Some(printer);
    }

    /// Returns a copy of the current settings.
    pub fn settings(&self) -> TracingSettings {
        read_lock(&self.settings, "settings").clone()
    }

    /// Applies `settings`. When `log_printer` is set, a [`LogPrinter`] using
    /// the configured indentation replaces the current printer.
    pub fn configure(&self, settings: TracingSettings) {
        if settings.log_printer {
            self.set_printer(Arc::new(LogPrinter::new(PlainTextFormatter::new(
                settings.indentation_width,
            ))));
        }
        *write_lock(&self.settings, "settings") = settings;
    }

    /// Returns the depth of the calling thread's stack.
    pub fn depth(&self) -> usize {
        read_lock(&self.stacks, "stacks")
            .get(&thread::current().id())
            .map_or(0, CallStackTrace::count)
    }

    /// Returns a copy of the calling thread's stack.
    pub fn snapshot(&self) -> Option<CallStackTrace> {
        read_lock(&self.stacks, "stacks")
            .get(&thread::current().id())
            .cloned()
    }

    /// Returns the number of threads that currently hold a stack.
    pub fn thread_count(&self) -> usize {
        read_lock(&self.stacks, "stacks").len()
    }
}

impl Default for CallStackTracer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pushes a call trace when created and pops it when dropped.
///
/// Bind it to a local so it lives until the end of the traced scope:
///
/// ```rust
/// use quimera_core::diagnosis::{CallStackTracer, CallTrace, ScopedCallTraceNotifier};
///
/// let tracer = CallStackTracer::new();
/// {
///     let _notifier = ScopedCallTraceNotifier::with_tracer(&tracer, CallTrace::new("fn step()", &[]));
///     assert_eq!(tracer.depth(), 1);
/// }
/// assert_eq!(tracer.depth(), 0);
/// ```
#[must_use = "the trace is removed as soon as the notifier is dropped"]
pub struct ScopedCallTraceNotifier<'t> {
    tracer: &'t CallStackTracer,
    pushed: bool,
}

impl ScopedCallTraceNotifier<'static> {
    /// Pushes `trace` on the global tracer.
    pub fn new(trace: CallTrace<'_>) -> Self {
        Self::with_tracer(CallStackTracer::global(), trace)
    }
}

impl<'t> ScopedCallTraceNotifier<'t> {
    /// Pushes `trace` on `tracer` if its tracing is enabled.
    pub fn with_tracer(tracer: &'t CallStackTracer, trace: CallTrace<'_>) -> Self {
        let pushed = read_lock(&tracer.settings, "settings").enabled;
        if pushed {
            tracer.add_trace(trace);
        }
        Self { tracer, pushed }
    }
}

impl Drop for ScopedCallTraceNotifier<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.tracer.remove_last_trace();
        }
    }
}
