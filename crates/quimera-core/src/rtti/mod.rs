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

//! Run-time type identification: type tokens, the object hierarchy and the
//! classification of arbitrary values.

pub mod classify;
pub mod object;
pub mod registry;
pub mod type_token;

pub use classify::{classify_pointer, classify_value, find_type, Classify};
pub use object::{root_type, Object, ObjectExt, TypeClass};
pub use registry::{find_registered, registered_types, RegisteredType};
pub use type_token::TypeToken;

/// Derives [`Object`] and the classification and tracing traits for a struct.
///
/// See the [`object`] module for an example.
pub use quimera_macros::Object;
