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

use quimera_core::diagnosis::{BufferPrinter, CallStackTracer, ChannelPrinter, TracerError};
use quimera_core::{trace_function, trace_method, trace_method_with_state, Object};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[derive(Object, Default)]
struct Scene {
    entities: u32,
}

impl Scene {
    fn update(&mut self, delta: f32) -> usize {
        trace_method_with_state!("Scene", format!("entities={}", self.entities), delta);
        self.entities += 1;
        self.render(true)
    }

    fn render(&self, wireframe: bool) -> usize {
        trace_method!("Scene", wireframe);
        CallStackTracer::global().depth()
    }
}

fn load(path: String, retries: u8) -> Option<quimera_core::diagnosis::CallStackTrace> {
    trace_function!(path, retries);
    CallStackTracer::global().snapshot()
}

#[test]
fn test_macros_push_and_pop_on_the_global_tracer() {
    let mut scene = Scene::default();

    assert_eq!(scene.update(0.5), 2);
    assert_eq!(CallStackTracer::global().depth(), 0);
}

#[test]
fn test_traced_function_records_signature_and_arguments() {
    let snapshot = load("level.scene".to_owned(), 3).unwrap();
    let trace = snapshot.trace(0).unwrap();

    assert!(trace.function_signature().ends_with("::load"));
    assert!(trace.class_name().is_none());

    let arguments = trace.arguments().unwrap();
    assert_eq!(arguments[0].type_name(), "string");
    assert_eq!(arguments[0].value(), "level.scene");
    assert_eq!(arguments[1].type_name(), "u8");
    assert_eq!(arguments[1].value(), "3");
}

#[test]
fn test_isolated_tracer_dumps_plain_text() {
    // --- 1. SETUP ---
    let tracer = CallStackTracer::new();
    let printer = Arc::new(BufferPrinter::default());
    tracer.set_printer(printer.clone());

    // --- 2. ACTION ---
    let arguments = quimera_core::trace_arguments!(5u16);
    {
        let _outer = quimera_core::diagnosis::ScopedCallTraceNotifier::with_tracer(
            &tracer,
            quimera_core::diagnosis::CallTrace::with_object_state("fn tick", &arguments, "World", "paused"),
        );
        let _inner = quimera_core::diagnosis::ScopedCallTraceNotifier::with_tracer(
            &tracer,
            quimera_core::diagnosis::CallTrace::new("fn step", &[]),
        );
        tracer.dump().unwrap();
    }

    // --- 3. ASSERT ---
    let current = thread::current();
    let thread_name = current
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("{:?}", current.id()));
    let expected = format!(
        "Call stack trace for {thread_name}\n\
         -->fn tick\n  | -{{this}}World=paused\n  | -{{0}}u16=5\n\
         \x20 -->fn step\n\
         End of call stack trace information.\n"
    );
    assert_eq!(printer.contents(), expected);
    assert_eq!(tracer.depth(), 0);
}

#[test]
fn test_dump_without_printer_is_an_error() {
    let tracer = CallStackTracer::new();
    tracer.add_trace(quimera_core::diagnosis::CallTrace::new("fn f", &[]));
    assert_eq!(tracer.dump(), Err(TracerError::NoPrinter));
}

#[test]
fn test_each_thread_dumps_its_own_stack() {
    let tracer = Arc::new(CallStackTracer::new());
    let (printer, receiver) = ChannelPrinter::unbounded();
    tracer.set_printer(Arc::new(printer));

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = ["render", "physics"]
        .into_iter()
        .map(|name| {
            let tracer = Arc::clone(&tracer);
            let barrier = Arc::clone(&barrier);
            thread::Builder::new()
                .name(name.to_owned())
                .spawn(move || {
                    let signature = format!("fn {name}_loop");
                    tracer.add_trace(quimera_core::diagnosis::CallTrace::new(&signature, &[]));
                    barrier.wait();
                    assert_eq!(tracer.thread_count(), 2);
                    tracer.dump().unwrap();
                    barrier.wait();
                    tracer.remove_last_trace();
                })
                .unwrap()
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mut dumps: Vec<String> = (0..2)
        .map(|_| receiver.recv_timeout(Duration::from_secs(1)).unwrap())
        .collect();
    dumps.sort();

    assert_eq!(
        dumps,
        [
            "Call stack trace for physics\n-->fn physics_loop\nEnd of call stack trace information.\n",
            "Call stack trace for render\n-->fn render_loop\nEnd of call stack trace information.\n",
        ]
    );
    assert_eq!(tracer.thread_count(), 0);
}
