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

//! The root of the engine's object hierarchy and its ancestor-aware casts.
//!
//! Rust has no class inheritance, so a "base class" is an embedded field of
//! the base type. Every type in the hierarchy implements [`Object`], which
//! answers "is this value an instance of the type identified by a token, or
//! of one of its ancestors" by checking its own token and then asking each
//! embedded base in turn. A type may embed several bases, which is how
//! multi-parent (diamond) hierarchies are expressed.
//!
//! Implementations are normally generated with `#[derive(Object)]`:
//!
//! ```rust
//! use quimera_core::{Object, ObjectExt};
//!
//! #[derive(Object, Default)]
//! struct Renderable;
//!
//! #[derive(Object, Default)]
//! struct Transform {
//!     position: [f32; 3],
//! }
//!
//! #[derive(Object, Default)]
//! struct Sprite {
//!     #[object(base)]
//!     renderable: Renderable,
//!     #[object(base)]
//!     transform: Transform,
//! }
//!
//! let sprite = Sprite::default();
//! assert!(sprite.is::<Renderable>());
//! assert!(sprite.is::<Transform>());
//! assert_eq!(sprite.as_type::<Transform>().unwrap().position, [0.0; 3]);
//!
//! let object: &dyn Object = &sprite;
//! assert!(object.as_type::<Sprite>().is_some());
//! ```
//!
//! # Shared ancestors
//!
//! Each embedded base is its own value. When two branches both embed the same
//! ancestor type, the object holds two copies of it, one per branch. `is`
//! answers `true` for that ancestor, and `as_type` / `as_type_mut` return the
//! copy found through the first base field in declaration order that has it.
//! Cast to the branch first to reach another copy.

use std::any::Any;

use super::type_token::TypeToken;

static OBJECT_TYPE: TypeToken = TypeToken::new("Object");

/// Static access to the token of a type.
///
/// Implemented by every concrete type of the hierarchy and by `dyn Object`,
/// which stands for the hierarchy root.
pub trait TypeClass {
    /// Returns the token of this exact type.
    fn type_class() -> &'static TypeToken;
}

impl TypeClass for dyn Object {
    fn type_class() -> &'static TypeToken {
        &OBJECT_TYPE
    }
}

/// Returns the token of the hierarchy root.
#[must_use]
pub fn root_type() -> &'static TypeToken {
    &OBJECT_TYPE
}

/// A type participating in the engine's object hierarchy.
///
/// The predicate and view methods are building blocks for [`ObjectExt`];
/// call `is` and `as_type` instead of using them directly.
pub trait Object: Any {
    /// Returns the token of the most-derived type of this value.
    fn type_object(&self) -> &'static TypeToken;

    /// Returns `true` if `token` is this type's own token or the token of any
    /// of its ancestors, following every embedded base.
    #[doc(hidden)]
    fn override_is(&self, token: &TypeToken) -> bool;

    /// Returns the part of this value whose type is identified by `token`.
    #[doc(hidden)]
    fn view(&self, token: &TypeToken) -> Option<&dyn Any>;

    /// Mutable counterpart of [`view`](Object::view).
    #[doc(hidden)]
    fn view_mut(&mut self, token: &TypeToken) -> Option<&mut dyn Any>;
}

/// Instance checks and casts available on every [`Object`], including
/// `dyn Object`.
pub trait ObjectExt: Object {
    /// Returns `true` if this value is a `T` or has `T` as an ancestor.
    fn is<T: TypeClass + ?Sized>(&self) -> bool {
        self.override_is(T::type_class())
    }

    /// Casts this value to an ancestor or descendant type.
    ///
    /// Returns `None` when the value is neither a `T` nor derived from `T`.
    /// Only concrete object types are valid destinations.
    fn as_type<T: Object + TypeClass>(&self) -> Option<&T> {
        if !self.is::<T>() {
            return None;
        }
        self.view(T::type_class())
            .and_then(|part| part.downcast_ref::<T>())
    }

    /// Mutable counterpart of [`as_type`](ObjectExt::as_type).
    fn as_type_mut<T: Object + TypeClass>(&mut self) -> Option<&mut T> {
        if !self.is::<T>() {
            return None;
        }
        self.view_mut(T::type_class())
            .and_then(|part| part.downcast_mut::<T>())
    }
}

impl<O: Object + ?Sized> ObjectExt for O {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtti::Object;
    use std::ptr;

    // --- TEST HIERARCHY ---
    //
    //            Object
    //         /    |     \
    //  Interface Concrete Sibling
    //         \    /
    //         Derived

    #[derive(Object, Default)]
    #[object(name = "InterfaceBranch")]
    struct InterfaceBranch;

    #[derive(Object, Default)]
    #[object(name = "ConcreteBranch")]
    struct ConcreteBranch {
        value: u32,
    }

    #[derive(Object, Default)]
    struct Sibling {
        _value: u32,
    }

    #[derive(Object, Default)]
    struct Derived {
        #[object(base)]
        interface: InterfaceBranch,
        #[object(base)]
        concrete: ConcreteBranch,
    }

    #[test]
    fn test_exact_type_is_itself() {
        let derived = Derived::default();
        assert!(derived.is::<Derived>());
        assert_eq!(derived.type_object(), Derived::type_class());
        assert_eq!(Derived::type_class().name(), "Derived");
    }

    #[test]
    fn test_every_branch_of_a_diamond_is_an_ancestor() {
        let derived = Derived::default();
        assert!(derived.is::<InterfaceBranch>());
        assert!(derived.is::<ConcreteBranch>());
        assert!(derived.is::<dyn Object>());
        assert!(!derived.is::<Sibling>());
    }

    #[test]
    fn test_ancestor_is_not_descendant() {
        let concrete = ConcreteBranch::default();
        assert!(!concrete.is::<Derived>());
        assert!(concrete.as_type::<Derived>().is_none());
    }

    #[test]
    fn test_cast_to_ancestor_returns_embedded_base() {
        let mut derived = Derived::default();
        derived.concrete.value = 7;

        let concrete = derived.as_type::<ConcreteBranch>().unwrap();
        assert_eq!(concrete.value, 7);
        assert!(ptr::eq(concrete, &derived.concrete));
        assert!(derived.as_type::<InterfaceBranch>().is_some());
    }

    #[test]
    fn test_cast_to_own_type_is_same_object() {
        let derived = Derived::default();
        let same = derived.as_type::<Derived>().unwrap();
        assert!(ptr::eq(same, &derived));
    }

    #[test]
    fn test_cast_to_unrelated_type_is_none() {
        let derived = Derived::default();
        assert!(derived.as_type::<Sibling>().is_none());

        let sibling = Sibling::default();
        assert!(sibling.as_type::<ConcreteBranch>().is_none());
    }

    #[test]
    fn test_descendant_cast_through_trait_object() {
        let derived = Derived::default();
        let object: &dyn Object = &derived;

        assert_eq!(object.type_object(), Derived::type_class());
        assert!(object.as_type::<Derived>().is_some());
        assert!(object.as_type::<ConcreteBranch>().is_some());
        assert!(object.as_type::<Sibling>().is_none());
    }

    #[test]
    fn test_mutable_cast_writes_through() {
        let mut derived = Derived::default();
        if let Some(concrete) = derived.as_type_mut::<ConcreteBranch>() {
            concrete.value = 42;
        }
        assert_eq!(derived.concrete.value, 42);

        let object: &mut dyn Object = &mut derived;
        assert!(object.as_type_mut::<Sibling>().is_none());
        assert!(object.as_type_mut::<Derived>().is_some());
    }

    #[test]
    fn test_root_token() {
        assert_eq!(root_type().name(), "Object");
        assert_eq!(<dyn Object as TypeClass>::type_class(), root_type());
        assert_ne!(root_type(), Derived::type_class());
    }
}
