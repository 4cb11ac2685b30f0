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

//! Turns call stack traces into text.

use super::call_stack_trace::CallStackTrace;
use super::call_trace::CallTrace;

/// Formats the parts of a [`CallStackTrace`].
///
/// A printer calls the methods in this order: the stack header, then for each
/// trace its header, body and footer with the trace depth, then the stack
/// footer. Every method appends to `out`.
pub trait CallStackTraceFormatter: Send + Sync {
    /// Appends the text that opens a call stack trace.
    fn format_call_stack_trace_header(&self, trace: &CallStackTrace, out: &mut String);

    /// Appends the text that opens the call trace at `depth`.
    fn format_call_trace_header(&self, trace: &CallTrace<'_>, depth: usize, out: &mut String);

    /// Appends the body of the call trace at `depth`.
    fn format_call_trace(&self, trace: &CallTrace<'_>, depth: usize, out: &mut String);

    /// Appends the text that closes the call trace at `depth`.
    fn format_call_trace_footer(&self, trace: &CallTrace<'_>, depth: usize, out: &mut String);

    /// Appends the text that closes a call stack trace.
    fn format_call_stack_trace_footer(&self, trace: &CallStackTrace, out: &mut String);
}

/// Human-readable formatter producing one line per call and one line per
/// argument, indented by call depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainTextFormatter {
    indentation_width: usize,
}

impl PlainTextFormatter {
    /// Creates a formatter indenting each depth level by `indentation_width`
    /// spaces.
    pub fn new(indentation_width: usize) -> Self {
        Self { indentation_width }
    }

    /// Returns the number of spaces per depth level.
    pub fn indentation_width(&self) -> usize {
        self.indentation_width
    }

    fn indent(&self, depth: usize, out: &mut String) {
        out.extend(std::iter::repeat(' ').take(self.indentation_width * depth));
    }
}

impl Default for PlainTextFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl CallStackTraceFormatter for PlainTextFormatter {
    fn format_call_stack_trace_header(&self, trace: &CallStackTrace, out: &mut String) {
        out.push_str("Call stack trace for ");
        out.push_str(trace.thread_id());
        out.push('\n');
    }

    fn format_call_trace_header(&self, _trace: &CallTrace<'_>, depth: usize, out: &mut String) {
        self.indent(depth, out);
        out.push_str("-->");
    }

    fn format_call_trace(&self, trace: &CallTrace<'_>, depth: usize, out: &mut String) {
        out.push_str(trace.function_signature());
        out.push('\n');

        if let Some(class_name) = trace.class_name() {
            self.indent(depth, out);
            out.push_str("  | -{this}");
            out.push_str(class_name);
            out.push('=');
            out.push_str(trace.object_state());
            out.push('\n');
        }

        for (index, argument) in trace.arguments().unwrap_or_default().iter().enumerate() {
            self.indent(depth, out);
            out.push_str("  | -{");
            out.push_str(&index.to_string());
            out.push('}');
            out.push_str(argument.type_name());
            out.push('=');
            out.push_str(argument.value());
            out.push('\n');
        }
    }

    fn format_call_trace_footer(&self, _trace: &CallTrace<'_>, _depth: usize, _out: &mut String) {}

    fn format_call_stack_trace_footer(&self, _trace: &CallStackTrace, out: &mut String) {
        out.push_str("End of call stack trace information.\n");
    }
}
