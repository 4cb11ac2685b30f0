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

//! Wrappers stating which tracing capabilities a foreign type has.
//!
//! A type outside the object hierarchy and outside the basic kinds has no
//! type information. If it can describe itself through `Display`, wrap it in
//! [`Described`]; otherwise wrap it in [`Opaque`]. Both are transparent, so a
//! reference to the wrapped value can be turned into a reference to the
//! wrapper without moving it:
//!
//! ```rust
//! use bytemuck::TransparentWrapper;
//! use quimera_core::diagnosis::{ArgumentTrace, Described, Opaque};
//!
//! struct Handle(u32);
//!
//! let handle = Handle(3);
//! let trace = ArgumentTrace::new(Opaque::wrap_ref(&handle));
//! assert_eq!(trace.type_name(), "<Unknown type (size: 4)>");
//!
//! let trace = ArgumentTrace::new(Described::wrap_ref(&"loading"));
//! assert_eq!(trace.value(), "loading");
//! ```

use std::fmt::{self, Display, Write};
use std::mem;

use bytemuck::TransparentWrapper;

use super::argument_trace::{write_unknown_value, Traceable};
use crate::data_types::address_of;
use crate::rtti::{Classify, TypeToken};

/// A value with neither type information nor a textual description.
#[repr(transparent)]
pub struct Opaque<T>(pub T);

// SAFETY: `Opaque<T>` is `repr(transparent)` over its only field `T`.
unsafe impl<T> TransparentWrapper<T> for Opaque<T> {}

impl<T> Classify for Opaque<T> {
    fn classify_static() -> Option<&'static TypeToken> {
        None
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        None
    }
}

impl<T> Traceable for Opaque<T> {
    const INNERMOST_SIZE: usize = mem::size_of::<T>();

    fn write_value(&self, out: &mut String) {
        write_unknown_value(address_of(&self.0), out);
    }
}

impl<T> fmt::Debug for Opaque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

/// A value without type information that describes itself through `Display`.
#[derive(Debug)]
#[repr(transparent)]
pub struct Described<T>(pub T);

// SAFETY: `Described<T>` is `repr(transparent)` over its only field `T`.
unsafe impl<T> TransparentWrapper<T> for Described<T> {}

impl<T: Display> Classify for Described<T> {
    fn classify_static() -> Option<&'static TypeToken> {
        None
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        None
    }
}

impl<T: Display> Traceable for Described<T> {
    const INNERMOST_SIZE: usize = mem::size_of::<T>();

    fn write_value(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}
