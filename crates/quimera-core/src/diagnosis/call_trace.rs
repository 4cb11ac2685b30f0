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

//! Defines [`CallTrace`], the diagnostic record of one function invocation.

use std::borrow::Cow;

use super::argument_trace::ArgumentTrace;

/// A function signature, its traced arguments and, for methods, the class
/// name and a description of the calling object's state.
///
/// The argument slice is borrowed from the call site. Use
/// [`into_owned`](CallTrace::into_owned) to keep the record beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTrace<'a> {
    function_signature: Cow<'a, str>,
    arguments: Cow<'a, [ArgumentTrace]>,
    class_name: Option<Cow<'a, str>>,
    object_state: String,
}

impl<'a> CallTrace<'a> {
    /// Creates the trace of a free function call.
    ///
    /// An empty `arguments` slice stands for a function without arguments.
    pub fn new(function_signature: &'a str, arguments: &'a [ArgumentTrace]) -> Self {
        if function_signature.is_empty() {
            log::warn!("A call trace was created with an empty function signature.");
        }

        Self {
            function_signature: Cow::Borrowed(function_signature),
            arguments: Cow::Borrowed(arguments),
            class_name: None,
            object_state: String::new(),
        }
    }

    /// Creates the trace of a method call on an instance of `class_name`.
    pub fn with_class_name(
        function_signature: &'a str,
        arguments: &'a [ArgumentTrace],
        class_name: &'a str,
    ) -> Self {
        if class_name.is_empty() {
            log::warn!("A call trace for '{function_signature}' was created with an empty class name.");
        }

        Self {
            class_name: Some(Cow::Borrowed(class_name)),
            ..Self::new(function_signature, arguments)
        }
    }

    /// Creates the trace of a method call, including the textual state of the
    /// calling object.
    pub fn with_object_state(
        function_signature: &'a str,
        arguments: &'a [ArgumentTrace],
        class_name: &'a str,
        object_state: impl Into<String>,
    ) -> Self {
        Self {
            object_state: object_state.into(),
            ..Self::with_class_name(function_signature, arguments, class_name)
        }
    }

    /// Returns the function signature.
    #[must_use]
    pub fn function_signature(&self) -> &str {
        &self.function_signature
    }

    /// Returns the traced arguments, or `None` for a call without arguments.
    #[must_use]
    pub fn arguments(&self) -> Option<&[ArgumentTrace]> {
        if self.arguments.is_empty() {
            None
        } else {
            Some(&*self.arguments)
        }
    }

    /// Returns the number of traced arguments.
    #[must_use]
    pub fn arguments_count(&self) -> usize {
        self.arguments.len()
    }

    /// Returns the class name, if the call is a method call.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns the object state, empty when none was supplied.
    #[must_use]
    pub fn object_state(&self) -> &str {
        &self.object_state
    }

    /// Copies every borrowed part so the trace no longer depends on the call
    /// site.
    #[must_use]
    pub fn into_owned(self) -> CallTrace<'static> {
        CallTrace {
            function_signature: Cow::Owned(self.function_signature.into_owned()),
            arguments: Cow::Owned(self.arguments.into_owned()),
            class_name: self.class_name.map(|name| Cow::Owned(name.into_owned())),
            object_state: self.object_state,
        }
    }
}
