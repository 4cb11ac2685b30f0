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

//! Maps an arbitrary value to the [`TypeToken`] of its kind.
//!
//! Classification is selected by the static shape of the argument, one impl
//! per shape:
//!
//! - a basic value (`bool`, fixed-width integers, `f32`, `f64`, `String`)
//!   returns the token of its [`BasicKind`];
//! - an object of the hierarchy returns its run-time token;
//! - a reference (`&T`, `&mut T`) classifies its referent, through any number
//!   of levels, so the token is always the innermost kind's;
//! - a nullable reference (`Option<&T>`, `Option<&mut T>`) classifies its
//!   referent when present and falls back to the static type of `T` when
//!   absent, which for objects means the hierarchy root;
//! - an untyped raw pointer (`*const c_void`, `*mut c_void`) is never
//!   recognized.
//!
//! Every other type is unrecognized; the diagnostic layer wraps those in
//! `Opaque`, whose classification is `None`.

use std::ffi::c_void;

use super::object::{root_type, Object};
use super::type_token::TypeToken;
use crate::data_types::BasicKind;

/// Classification of a value into the token of its kind.
///
/// `None` is the "unrecognized" outcome, never an error.
pub trait Classify {
    /// Classifies by the compile-time type alone.
    ///
    /// Used when there is no value to inspect, such as behind a null
    /// reference.
    fn classify_static() -> Option<&'static TypeToken>;

    /// Classifies this value, consulting its run-time type when it has one.
    fn classify(&self) -> Option<&'static TypeToken>;
}

macro_rules! impl_classify_basic {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Classify for $ty {
                fn classify_static() -> Option<&'static TypeToken> {
                    Some(BasicKind::$kind.token())
                }

                fn classify(&self) -> Option<&'static TypeToken> {
                    Self::classify_static()
                }
            }
        )*
    };
}

impl_classify_basic! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl Classify for dyn Object {
    fn classify_static() -> Option<&'static TypeToken> {
        Some(root_type())
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        Some(self.type_object())
    }
}

impl<T: Classify + ?Sized> Classify for &T {
    fn classify_static() -> Option<&'static TypeToken> {
        T::classify_static()
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        (**self).classify()
    }
}

impl<T: Classify + ?Sized> Classify for &mut T {
    fn classify_static() -> Option<&'static TypeToken> {
        T::classify_static()
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        (**self).classify()
    }
}

impl<T: Classify + ?Sized> Classify for Option<&T> {
    fn classify_static() -> Option<&'static TypeToken> {
        T::classify_static()
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        match self {
            Some(pointee) => pointee.classify(),
            None => T::classify_static(),
        }
    }
}

impl<T: Classify + ?Sized> Classify for Option<&mut T> {
    fn classify_static() -> Option<&'static TypeToken> {
        T::classify_static()
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        match self {
            Some(pointee) => pointee.classify(),
            None => T::classify_static(),
        }
    }
}

impl Classify for *const c_void {
    fn classify_static() -> Option<&'static TypeToken> {
        None
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        None
    }
}

impl Classify for *mut c_void {
    fn classify_static() -> Option<&'static TypeToken> {
        None
    }

    fn classify(&self) -> Option<&'static TypeToken> {
        None
    }
}

/// Classifies a plain value.
pub fn classify_value<T: Classify + ?Sized>(value: &T) -> Option<&'static TypeToken> {
    value.classify()
}

/// Classifies a nullable reference.
///
/// A present reference classifies its referent; an absent one classifies the
/// static type `T`, so a null reference to a basic kind still yields that
/// kind and a null reference to an object yields the hierarchy root.
pub fn classify_pointer<T: Classify + ?Sized>(pointer: Option<&T>) -> Option<&'static TypeToken> {
    pointer.classify()
}

/// Classifies a type without a value.
#[must_use]
pub fn find_type<T: Classify + ?Sized>() -> Option<&'static TypeToken> {
    T::classify_static()
}
