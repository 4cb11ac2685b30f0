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

//! # Quimera Core
//!
//! Foundational crate providing run-time type identification for an open
//! hierarchy of engine objects, classification of arbitrary values into known
//! basic kinds, and the diagnostic call-tracing layer built on top of both.

#![warn(missing_docs)]

// Lets the code generated by `#[derive(Object)]` name this crate as
// `::quimera_core` from inside the crate itself.
extern crate self as quimera_core;

pub mod data_types;
pub mod diagnosis;
pub mod rtti;

mod macros;

#[doc(hidden)]
pub use inventory;

pub use rtti::{Object, ObjectExt, TypeClass, TypeToken};
