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

//! Runtime settings of the call-stack tracer.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Settings applied to a [`CallStackTracer`](super::CallStackTracer).
///
/// Every field has a default, so a settings file only needs the fields it
/// changes:
///
/// ```rust
/// use quimera_core::diagnosis::TracingSettings;
///
/// let settings = TracingSettings::from_json_str(r#"{ "indentation_width": 4 }"#).unwrap();
/// assert!(settings.enabled);
/// assert_eq!(settings.indentation_width, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingSettings {
    /// If `false`, scoped notifiers record nothing.
    pub enabled: bool,
    /// The number of spaces per call depth level in plain text dumps.
    pub indentation_width: usize,
    /// If `true`, configuring a tracer installs a [`LogPrinter`](super::LogPrinter).
    pub log_printer: bool,
}

impl Default for TracingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            indentation_width: 2,
            log_printer: false,
        }
    }
}

impl TracingSettings {
    /// Parses settings from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = TracingSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.indentation_width, 2);
        assert!(!settings.log_printer);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = TracingSettings::from_json_str(r#"{ "enabled": false }"#).unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.indentation_width, 2);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = TracingSettings::from_json_str("{ enabled: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "indentation_width": 3, "log_printer": true }}"#).unwrap();

        let settings = TracingSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.indentation_width, 3);
        assert!(settings.log_printer);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = TracingSettings::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
