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

//! Defines [`CallStackTrace`], the ordered call traces of one thread.

use super::call_trace::CallTrace;

/// The stack of call traces recorded for one thread, outermost call first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStackTrace {
    thread_id: String,
    traces: Vec<CallTrace<'static>>,
}

impl CallStackTrace {
    /// Creates an empty stack for the thread described by `thread_id`.
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            traces: Vec::new(),
        }
    }

    /// Pushes a trace on top of the stack.
    pub fn push(&mut self, trace: CallTrace<'static>) {
        self.traces.push(trace);
    }

    /// Removes and returns the trace on top of the stack.
    pub fn pop(&mut self) -> Option<CallTrace<'static>> {
        self.traces.pop()
    }

    /// Returns the trace at `index`, counted from the outermost call.
    #[must_use]
    pub fn trace(&self, index: usize) -> Option<&CallTrace<'static>> {
        self.traces.get(index)
    }

    /// Returns the number of traces in the stack.
    #[must_use]
    pub fn count(&self) -> usize {
        self.traces.len()
    }

    /// Returns `true` if the stack holds no trace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Returns the textual identifier of the owning thread.
    #[must_use]
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    /// Iterates over the traces, outermost call first.
    pub fn iter(&self) -> impl Iterator<Item = &CallTrace<'static>> {
        self.traces.iter()
    }
}
