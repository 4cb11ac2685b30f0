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

//! Destinations for formatted call stack traces.

use std::sync::Mutex;

use super::call_stack_trace::CallStackTrace;
use super::error::TracerError;
use super::formatter::{CallStackTraceFormatter, PlainTextFormatter};

/// Formats call stack traces and sends the resulting text somewhere.
pub trait CallStackTracePrinter: Send + Sync {
    /// Returns the formatter applied before printing.
    fn formatter(&self) -> &dyn CallStackTraceFormatter;

    /// Sends already formatted text to the destination.
    fn print_string(&self, text: &str) -> Result<(), TracerError>;

    /// Formats `trace` with [`formatter`](Self::formatter) and prints the result.
    fn print_call_stack_trace(&self, trace: &CallStackTrace) -> Result<(), TracerError> {
        let formatter = self.formatter();
        let mut text = String::new();

        formatter.format_call_stack_trace_header(trace, &mut text);
        for (depth, call) in trace.iter().enumerate() {
            formatter.format_call_trace_header(call, depth, &mut text);
            formatter.format_call_trace(call, depth, &mut text);
            formatter.format_call_trace_footer(call, depth, &mut text);
        }
        formatter.format_call_stack_trace_footer(trace, &mut text);

        self.print_string(&text)
    }
}

/// Writes each dump through the `log` facade at `info` level.
pub struct LogPrinter {
    formatter: Box<dyn CallStackTraceFormatter>,
}

impl LogPrinter {
    /// Creates a printer with the given formatter.
    pub fn new(formatter: impl CallStackTraceFormatter + 'static) -> Self {
        Self {
            formatter: Box::new(formatter),
        }
    }
}

impl Default for LogPrinter {
    fn default() -> Self {
        Self::new(PlainTextFormatter::default())
    }
}

impl CallStackTracePrinter for LogPrinter {
    fn formatter(&self) -> &dyn CallStackTraceFormatter {
        self.formatter.as_ref()
    }

    fn print_string(&self, text: &str) -> Result<(), TracerError> {
        log::info!("{}", text.trim_end_matches('\n'));
        Ok(())
    }
}

/// Accumulates every dump in memory.
pub struct BufferPrinter {
    formatter: Box<dyn CallStackTraceFormatter>,
    buffer: Mutex<String>,
}

impl BufferPrinter {
    /// Creates an empty buffer printer with the given formatter.
    pub fn new(formatter: impl CallStackTraceFormatter + 'static) -> Self {
        Self {
            formatter: Box::new(formatter),
            buffer: Mutex::new(String::new()),
        }
    }

    /// Returns a copy of everything printed so far.
    pub fn contents(&self) -> String {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Discards everything printed so far.
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Default for BufferPrinter {
    fn default() -> Self {
        Self::new(PlainTextFormatter::default())
    }
}

impl CallStackTracePrinter for BufferPrinter {
    fn formatter(&self) -> &dyn CallStackTraceFormatter {
        self.formatter.as_ref()
    }

    fn print_string(&self, text: &str) -> Result<(), TracerError> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_str(text);
        Ok(())
    }
}

/// Sends each dump as one message over a `flume` channel.
pub struct ChannelPrinter {
    formatter: Box<dyn CallStackTraceFormatter>,
    sender: flume::Sender<String>,
}

impl ChannelPrinter {
    /// Creates a printer feeding `sender`.
    pub fn new(formatter: impl CallStackTraceFormatter + 'static, sender: flume::Sender<String>) -> Self {
        Self {
            formatter: Box::new(formatter),
            sender,
        }
    }

    /// Creates a printer with a plain text formatter and an unbounded channel,
    /// returning the receiving end alongside it.
    pub fn unbounded() -> (Self, flume::Receiver<String>) {
        let (sender, receiver) = flume::unbounded();
        (Self::new(PlainTextFormatter::default(), sender), receiver)
    }
}

impl CallStackTracePrinter for ChannelPrinter {
    fn formatter(&self) -> &dyn CallStackTraceFormatter {
        self.formatter.as_ref()
    }

    fn print_string(&self, text: &str) -> Result<(), TracerError> {
        self.sender
            .send(text.to_owned())
            .map_err(|e| TracerError::PrinterDisconnected(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::CallTrace;
    use std::time::Duration;

    fn sample_stack() -> CallStackTrace {
        let mut stack = CallStackTrace::new("main");
        stack.push(CallTrace::new("fn load()", &[]).into_owned());
        stack
    }

    #[test]
    fn test_buffer_printer_accumulates_and_clears() {
        let printer = BufferPrinter::default();
        printer.print_call_stack_trace(&sample_stack()).unwrap();
        printer.print_string("extra\n").unwrap();

        let contents = printer.contents();
        assert!(contents.starts_with("Call stack trace for main\n-->fn load()\n"));
        assert!(contents.ends_with("End of call stack trace information.\nextra\n"));

        printer.clear();
        assert!(printer.contents().is_empty());
    }

    #[test]
    fn test_log_printer_never_fails() {
        let printer = LogPrinter::default();
        assert!(printer.print_call_stack_trace(&sample_stack()).is_ok());
    }

    #[test]
    fn test_channel_printer_sends_one_message_per_dump() {
        let (printer, receiver) = ChannelPrinter::unbounded();
        printer.print_call_stack_trace(&sample_stack()).unwrap();

        let message = receiver.recv_timeout(Duration::from_millis(100)).unwrap();
        assert!(message.contains("-->fn load()"));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_channel_printer_reports_disconnection() {
        let (printer, receiver) = ChannelPrinter::unbounded();
        drop(receiver);

        let err = printer.print_string("lost").unwrap_err();
        assert!(matches!(err, TracerError::PrinterDisconnected(_)));
    }
}
