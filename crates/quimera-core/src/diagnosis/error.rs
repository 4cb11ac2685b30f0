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

//! Error types of the call-stack tracer and its configuration.

use std::fmt;

/// An error raised while printing call stack traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracerError {
    /// A dump was requested but no printer is installed.
    NoPrinter,
    /// The destination of a printer is no longer reachable.
    PrinterDisconnected(String),
}

impl fmt::Display for TracerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TracerError::NoPrinter => write!(f, "No call stack trace printer is installed."),
            TracerError::PrinterDisconnected(msg) => {
                write!(f, "Call stack trace printer disconnected: {msg}")
            }
        }
    }
}

impl std::error::Error for TracerError {}

/// An error raised while loading [`TracingSettings`](super::TracingSettings).
#[derive(Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The settings text is not valid.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read tracing settings from '{path}': {source}")
            }
            ConfigError::Parse(err) => write!(f, "Invalid tracing settings: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}
