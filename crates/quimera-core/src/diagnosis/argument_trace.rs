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

//! Captures the type name and value of one function argument as text.

use std::borrow::Cow;
use std::ffi::c_void;
use std::fmt::Write;
use std::mem;

use bytemuck::TransparentWrapper;

use super::wrappers::Opaque;
use crate::data_types::{address_of, write_address, NULL_POINTER};
use crate::rtti::{root_type, Classify, Object, TypeToken};

const CONSTANT: &str = "const ";
const ASTERISK: char = '*';
const VOID: &str = "void*";
const UNKNOWN_VALUE_PREFIX: &str = "<Unknown type at ";

/// The textual rendering of a value, selected by the static shape of its type.
///
/// Implemented for the basic kinds, for shared and exclusive references,
/// for nullable references, for untyped raw pointers, for `dyn Object`, for the
/// [`Opaque`] and [`Described`](super::Described) wrappers, and by
/// `#[derive(Object)]`.
pub trait Traceable: Classify {
    /// Static byte size of the innermost, non-reference type.
    const INNERMOST_SIZE: usize;

    /// The token that names this type when there is no value to ask, such
    /// as behind a null reference.
    fn declared_token() -> Option<&'static TypeToken> {
        Self::classify_static()
    }

    /// The token that names this value in a trace.
    fn trace_token(&self) -> Option<&'static TypeToken> {
        self.classify()
    }

    /// Writes the type name, given the name of the innermost type.
    ///
    /// Reference levels append `*`, and the first shared level met while the
    /// name is still empty prefixes `const `.
    fn write_type_name(innermost: &str, out: &mut String) {
        out.push_str(innermost);
    }

    /// Writes the value text.
    fn write_value(&self, out: &mut String);
}

/// Writes `<Unknown type at 0xADDR>` for a value without a textual form.
#[doc(hidden)]
pub fn write_unknown_value(address: usize, out: &mut String) {
    out.push_str(UNKNOWN_VALUE_PREFIX);
    write_address(address, out);
    out.push('>');
}

/// Returns `<Unknown type (size: N)>`.
fn unknown_type_name(size: usize) -> String {
    format!("<Unknown type (size: {size})>")
}

/// One level of indirection: a shared or exclusive reference, possibly
/// nullable.
///
/// Lets a pointer to a type without tracing support keep its pointer shape
/// when traced, see [`ArgumentTrace::opaque_pointer`].
pub trait Indirection {
    /// The referenced type.
    type Pointee: ?Sized;

    /// `true` for shared references, which are traced as `const`.
    const SHARED: bool;

    /// Returns the referenced value, or `None` for a null reference.
    fn pointee(&self) -> Option<&Self::Pointee>;
}

impl<T: ?Sized> Indirection for &T {
    type Pointee = T;
    const SHARED: bool = true;

    fn pointee(&self) -> Option<&T> {
        Some(*self)
    }
}

impl<T: ?Sized> Indirection for &mut T {
    type Pointee = T;
    const SHARED: bool = false;

    fn pointee(&self) -> Option<&T> {
        Some(&**self)
    }
}

impl<T: ?Sized> Indirection for Option<&T> {
    type Pointee = T;
    const SHARED: bool = true;

    fn pointee(&self) -> Option<&T> {
        *self
    }
}

impl<T: ?Sized> Indirection for Option<&mut T> {
    type Pointee = T;
    const SHARED: bool = false;

    fn pointee(&self) -> Option<&T> {
        self.as_deref()
    }
}

/// Writes the address of the pointee followed by a space, or `<Null>`.
/// Returns the pointee so the next level can be written.
pub(crate) fn write_indirection<'p, P: Indirection + ?Sized>(
    pointer: &'p P,
    out: &mut String,
) -> Option<&'p P::Pointee> {
    match pointer.pointee() {
        Some(pointee) => {
            write_address(address_of(pointee), out);
            out.push(' ');
            Some(pointee)
        }
        None => {
            out.push_str(NULL_POINTER);
            None
        }
    }
}

/// Returns the type name of `depth` pointer levels over an unknown type.
pub(crate) fn opaque_pointer_name(shared: bool, size: usize, depth: usize) -> String {
    let mut name = String::new();
    if shared {
        name.push_str(CONSTANT);
    }
    name.push_str(&unknown_type_name(size));
    name.extend(std::iter::repeat(ASTERISK).take(depth));
    name
}

macro_rules! impl_traceable_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Traceable for $ty {
                const INNERMOST_SIZE: usize = mem::size_of::<$ty>();

                fn write_value(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

impl_traceable_display!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Traceable for String {
    const INNERMOST_SIZE: usize = mem::size_of::<String>();

    fn write_value(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Traceable for dyn Object {
    const INNERMOST_SIZE: usize = 0;

    fn declared_token() -> Option<&'static TypeToken> {
        Some(root_type())
    }

    fn write_value(&self, out: &mut String) {
        write_unknown_value(address_of(self), out);
    }
}

impl<T: Traceable + ?Sized> Traceable for &T {
    const INNERMOST_SIZE: usize = T::INNERMOST_SIZE;

    fn declared_token() -> Option<&'static TypeToken> {
        T::declared_token()
    }

    fn trace_token(&self) -> Option<&'static TypeToken> {
        (**self).trace_token()
    }

    fn write_type_name(innermost: &str, out: &mut String) {
        if out.is_empty() {
            out.push_str(CONSTANT);
        }
        T::write_type_name(innermost, out);
        out.push(ASTERISK);
    }

    fn write_value(&self, out: &mut String) {
        write_address(address_of(*self), out);
        out.push(' ');
        (**self).write_value(out);
    }
}

impl<T: Traceable + ?Sized> Traceable for &mut T {
    const INNERMOST_SIZE: usize = T::INNERMOST_SIZE;

    fn declared_token() -> Option<&'static TypeToken> {
        T::declared_token()
    }

    fn trace_token(&self) -> Option<&'static TypeToken> {
        (**self).trace_token()
    }

    fn write_type_name(innermost: &str, out: &mut String) {
        T::write_type_name(innermost, out);
        out.push(ASTERISK);
    }

    fn write_value(&self, out: &mut String) {
        write_address(address_of(&**self), out);
        out.push(' ');
        (**self).write_value(out);
    }
}

impl<T: Traceable + ?Sized> Traceable for Option<&T> {
    const INNERMOST_SIZE: usize = T::INNERMOST_SIZE;

    fn declared_token() -> Option<&'static TypeToken> {
        T::declared_token()
    }

    fn trace_token(&self) -> Option<&'static TypeToken> {
        match self {
            Some(pointee) => pointee.trace_token(),
            None => T::declared_token(),
        }
    }

    fn write_type_name(innermost: &str, out: &mut String) {
        <&T as Traceable>::write_type_name(innermost, out);
    }

    fn write_value(&self, out: &mut String) {
        match self {
            Some(pointee) => <&T as Traceable>::write_value(pointee, out),
            None => out.push_str(NULL_POINTER),
        }
    }
}

impl<T: Traceable + ?Sized> Traceable for Option<&mut T> {
    const INNERMOST_SIZE: usize = T::INNERMOST_SIZE;

    fn declared_token() -> Option<&'static TypeToken> {
        T::declared_token()
    }

    fn trace_token(&self) -> Option<&'static TypeToken> {
        match self {
            Some(pointee) => pointee.trace_token(),
            None => T::declared_token(),
        }
    }

    fn write_type_name(innermost: &str, out: &mut String) {
        <&mut T as Traceable>::write_type_name(innermost, out);
    }

    fn write_value(&self, out: &mut String) {
        match self {
            Some(pointee) => <&mut T as Traceable>::write_value(pointee, out),
            None => out.push_str(NULL_POINTER),
        }
    }
}

impl Traceable for *const c_void {
    const INNERMOST_SIZE: usize = 0;

    fn write_type_name(_innermost: &str, out: &mut String) {
        if out.is_empty() {
            out.push_str(CONSTANT);
        }
        out.push_str(VOID);
    }

    fn write_value(&self, out: &mut String) {
        if self.is_null() {
            out.push_str(NULL_POINTER);
        } else {
            write_address(*self as usize, out);
        }
    }
}

impl Traceable for *mut c_void {
    const INNERMOST_SIZE: usize = 0;

    fn write_type_name(_innermost: &str, out: &mut String) {
        out.push_str(VOID);
    }

    fn write_value(&self, out: &mut String) {
        if self.is_null() {
            out.push_str(NULL_POINTER);
        } else {
            write_address(*self as usize, out);
        }
    }
}

/// A snapshot of one argument's type name and value, taken at a call site.
///
/// # Example
///
/// ```rust
/// use quimera_core::diagnosis::ArgumentTrace;
///
/// let trace = ArgumentTrace::new(&123u8);
/// assert_eq!(trace.type_name(), "u8");
/// assert_eq!(trace.value(), "123");
///
/// let mut flag = true;
/// let pointer = &mut flag;
/// let trace = ArgumentTrace::new(&pointer);
/// assert_eq!(trace.type_name(), "bool*");
/// assert!(trace.value().starts_with("0x") && trace.value().ends_with(" true"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentTrace {
    type_token: Option<&'static TypeToken>,
    type_name: String,
    value: String,
}

impl ArgumentTrace {
    /// Captures the type name and value of `argument`.
    pub fn new<T: Traceable + ?Sized>(argument: &T) -> Self {
        let type_token = argument.trace_token();

        let innermost = match type_token {
            Some(token) => Cow::Borrowed(token.name()),
            None => Cow::Owned(unknown_type_name(T::INNERMOST_SIZE)),
        };
        let mut type_name = String::new();
        T::write_type_name(&innermost, &mut type_name);

        let mut value = String::new();
        argument.write_value(&mut value);

        Self {
            type_token,
            type_name,
            value,
        }
    }

    /// Captures an argument of any type as an unrecognized value.
    pub fn opaque<T>(argument: &T) -> Self {
        Self::new(Opaque::wrap_ref(argument))
    }

    /// Captures a pointer to a value without tracing support, keeping the
    /// pointer level in the type name and value.
    ///
    /// ```rust
    /// use quimera_core::diagnosis::ArgumentTrace;
    ///
    /// struct Handle(u32);
    ///
    /// let missing: Option<&mut Handle> = None;
    /// let trace = ArgumentTrace::opaque_pointer(&missing);
    /// assert_eq!(trace.type_name(), "<Unknown type (size: 4)>*");
    /// assert_eq!(trace.value(), "<Null>");
    /// ```
    pub fn opaque_pointer<P>(pointer: &P) -> Self
    where
        P: Indirection,
        P::Pointee: Sized,
    {
        let mut value = String::new();
        if let Some(pointee) = write_indirection(pointer, &mut value) {
            write_unknown_value(address_of(pointee), &mut value);
        }

        Self::from_parts(
            opaque_pointer_name(P::SHARED, mem::size_of::<P::Pointee>(), 1),
            value,
        )
    }

    /// Two-level counterpart of [`opaque_pointer`](Self::opaque_pointer).
    pub fn opaque_pointer_to_pointer<P>(pointer: &P) -> Self
    where
        P: Indirection,
        P::Pointee: Indirection,
        <P::Pointee as Indirection>::Pointee: Sized,
    {
        let mut value = String::new();
        if let Some(inner) = write_indirection(pointer, &mut value) {
            if let Some(pointee) = write_indirection(inner, &mut value) {
                write_unknown_value(address_of(pointee), &mut value);
            }
        }

        Self::from_parts(
            opaque_pointer_name(
                P::SHARED || <P::Pointee as Indirection>::SHARED,
                mem::size_of::<<P::Pointee as Indirection>::Pointee>(),
                2,
            ),
            value,
        )
    }

    /// Builds the trace of an unclassified argument from its texts.
    pub(crate) fn from_parts(type_name: String, value: String) -> Self {
        Self {
            type_token: None,
            type_name,
            value,
        }
    }

    /// Returns the token the argument was classified as, if any.
    #[must_use]
    pub fn type_token(&self) -> Option<&'static TypeToken> {
        self.type_token
    }

    /// Returns the type name text.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the value text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::{format_address, BasicKind};
    use crate::rtti::{Object, TypeClass};
    use std::fmt;

    #[derive(Object, Default)]
    struct Light {
        _intensity: f32,
    }

    #[derive(Object)]
    #[object(describe)]
    struct Material {
        name: &'static str,
    }

    impl fmt::Display for Material {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Material({})", self.name)
        }
    }

    #[derive(Object)]
    #[object(describe)]
    struct StandardMaterial {
        #[object(base)]
        material: Material,
    }

    impl fmt::Display for StandardMaterial {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Standard{}", self.material)
        }
    }

    struct Custom {
        _value: u32,
    }

    fn count_addresses(text: &str) -> usize {
        text.matches("0x").count()
    }

    #[test]
    fn test_basic_values() {
        let cases = [
            (ArgumentTrace::new(&123u8), "u8", "123"),
            (ArgumentTrace::new(&123u16), "u16", "123"),
            (ArgumentTrace::new(&123u32), "u32", "123"),
            (ArgumentTrace::new(&123u64), "u64", "123"),
            (ArgumentTrace::new(&-123i8), "i8", "-123"),
            (ArgumentTrace::new(&123i16), "i16", "123"),
            (ArgumentTrace::new(&123i32), "i32", "123"),
            (ArgumentTrace::new(&123i64), "i64", "123"),
            (ArgumentTrace::new(&123.5f32), "f32", "123.5"),
            (ArgumentTrace::new(&123.456f64), "f64", "123.456"),
            (ArgumentTrace::new(&true), "bool", "true"),
            (ArgumentTrace::new(&false), "bool", "false"),
            (ArgumentTrace::new(&String::from("text")), "string", "text"),
        ];

        for (trace, name, value) in cases {
            assert_eq!(trace.type_name(), name);
            assert_eq!(trace.value(), value);
        }
    }

    #[test]
    fn test_basic_value_keeps_its_token() {
        let trace = ArgumentTrace::new(&7i64);
        assert_eq!(trace.type_token(), Some(BasicKind::I64.token()));
    }

    #[test]
    fn test_pointer_to_value() {
        let mut value = 123u8;
        let address = format_address(address_of(&value));
        let pointer = &mut value;
        let trace = ArgumentTrace::new(&pointer);

        assert_eq!(trace.type_name(), "u8*");
        assert_eq!(trace.value(), format!("{address} 123"));
    }

    #[test]
    fn test_pointer_to_const_value() {
        let value = 123u8;
        let pointer = &value;
        let trace = ArgumentTrace::new(&pointer);

        assert_eq!(trace.type_name(), "const u8*");
        assert!(trace.value().starts_with("0x"));
        assert!(trace.value().ends_with(" 123"));
    }

    #[test]
    fn test_null_pointer() {
        let pointer: Option<&mut bool> = None;
        let trace = ArgumentTrace::new(&pointer);

        assert_eq!(trace.type_name(), "bool*");
        assert_eq!(trace.value(), "<Null>");
        assert_eq!(trace.type_token(), Some(BasicKind::Bool.token()));
    }

    #[test]
    fn test_present_nullable_pointer_renders_like_a_reference() {
        let mut value = 9i32;
        let pointer: Option<&mut i32> = Some(&mut value);
        let trace = ArgumentTrace::new(&pointer);

        assert_eq!(trace.type_name(), "i32*");
        assert!(trace.value().starts_with("0x"));
        assert!(trace.value().ends_with(" 9"));
    }

    #[test]
    fn test_pointer_to_pointer() {
        let mut value = true;
        let mut inner = &mut value;
        let outer = &mut inner;
        let trace = ArgumentTrace::new(&outer);

        assert_eq!(trace.type_name(), "bool**");
        assert_eq!(count_addresses(trace.value()), 2);
        assert!(trace.value().ends_with(" true"));
    }

    #[test]
    fn test_pointer_to_null_pointer() {
        let mut inner: Option<&mut u16> = None;
        let outer = &mut inner;
        let trace = ArgumentTrace::new(&outer);

        assert_eq!(trace.type_name(), "u16**");
        assert_eq!(count_addresses(trace.value()), 1);
        assert!(trace.value().ends_with(" <Null>"));
    }

    #[test]
    fn test_const_is_prefixed_once() {
        let value = 1u32;
        let inner = &value;
        let outer = &inner;
        assert_eq!(ArgumentTrace::new(&outer).type_name(), "const u32**");

        let mut other = 1u32;
        let mut exclusive = &mut other;
        let shared_outer = &exclusive;
        assert_eq!(ArgumentTrace::new(&shared_outer).type_name(), "const u32**");

        let shared_inner = &value;
        let mut holder = shared_inner;
        let exclusive_outer = &mut holder;
        assert_eq!(ArgumentTrace::new(&exclusive_outer).type_name(), "const u32**");

        exclusive = &mut other;
        assert_eq!(ArgumentTrace::new(&exclusive).type_name(), "u32*");
    }

    #[test]
    fn test_three_levels_of_indirection() {
        let mut value = 5u8;
        let mut first = &mut value;
        let mut second = &mut first;
        let third = &mut second;
        let trace = ArgumentTrace::new(&third);

        assert_eq!(trace.type_name(), "u8***");
        assert_eq!(count_addresses(trace.value()), 3);
        assert!(trace.value().ends_with(" 5"));
    }

    #[test]
    fn test_unknown_value() {
        let custom = Custom { _value: 1 };
        let trace = ArgumentTrace::opaque(&custom);

        assert_eq!(trace.type_name(), "<Unknown type (size: 4)>");
        assert!(trace.value().starts_with("<Unknown type at 0x"));
        assert_eq!(trace.type_token(), None);
    }

    #[test]
    fn test_opaque_pointer_keeps_pointer_shape() {
        let mut custom = Custom { _value: 1 };
        let pointer = &mut custom;
        let trace = ArgumentTrace::opaque_pointer(&pointer);

        assert_eq!(trace.type_name(), "<Unknown type (size: 4)>*");
        assert_eq!(
            trace.value(),
            format!(
                "{} <Unknown type at {}>",
                format_address(address_of(&*pointer)),
                format_address(address_of(&*pointer))
            )
        );

        let missing: Option<&Custom> = None;
        let trace = ArgumentTrace::opaque_pointer(&missing);
        assert_eq!(trace.type_name(), "const <Unknown type (size: 4)>*");
        assert_eq!(trace.value(), "<Null>");
    }

    #[test]
    fn test_opaque_pointer_to_null_pointer() {
        let mut missing: Option<&mut Custom> = None;
        let outer = &mut missing;
        let trace = ArgumentTrace::opaque_pointer_to_pointer(&outer);

        assert_eq!(trace.type_name(), "<Unknown type (size: 4)>**");
        assert_eq!(
            trace.value(),
            format!("{} <Null>", format_address(address_of(&*outer)))
        );
    }

    #[test]
    fn test_void_pointers() {
        let value = 3u64;
        let shared = &value as *const u64 as *const c_void;
        let trace = ArgumentTrace::new(&shared);
        assert_eq!(trace.type_name(), "const void*");
        assert_eq!(trace.value(), format_address(address_of(&value)));

        let null = std::ptr::null_mut::<c_void>();
        let trace = ArgumentTrace::new(&null);
        assert_eq!(trace.type_name(), "void*");
        assert_eq!(trace.value(), "<Null>");
    }

    #[test]
    fn test_object_without_description() {
        let light = Light::default();
        let trace = ArgumentTrace::new(&light);

        assert_eq!(trace.type_name(), "Light");
        assert!(trace.value().starts_with("<Unknown type at 0x"));
    }

    #[test]
    fn test_object_with_description() {
        let material = Material { name: "stone" };
        let trace = ArgumentTrace::new(&material);

        assert_eq!(trace.type_name(), "Material");
        assert_eq!(trace.value(), "Material(stone)");
    }

    #[test]
    fn test_object_pointer_reports_runtime_type() {
        let material = StandardMaterial {
            material: Material { name: "metal" },
        };
        let object: &dyn Object = &material;
        let trace = ArgumentTrace::new(&object);

        assert_eq!(trace.type_name(), "const StandardMaterial*");
        assert_eq!(trace.type_token(), Some(StandardMaterial::type_class()));
        assert!(trace.value().starts_with("0x"));
    }

    #[test]
    fn test_described_object_pointer_renders_description() {
        let mut material = StandardMaterial {
            material: Material { name: "glass" },
        };
        let pointer = &mut material;
        let trace = ArgumentTrace::new(&pointer);

        assert_eq!(trace.type_name(), "StandardMaterial*");
        assert!(trace.value().ends_with(" StandardMaterial(glass)"));
    }

    #[test]
    fn test_null_object_pointer_uses_declared_type() {
        let pointer: Option<&mut Light> = None;
        let trace = ArgumentTrace::new(&pointer);

        assert_eq!(trace.type_name(), "Light*");
        assert_eq!(trace.value(), "<Null>");
        assert_eq!(trace.type_token(), Some(Light::type_class()));

        let object: Option<&dyn Object> = None;
        let trace = ArgumentTrace::new(&object);
        assert_eq!(trace.type_name(), "const Object*");
    }
}
