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

//! A link-time registry of every object type declared with `#[derive(Object)]`.
//!
//! Each derived type submits one [`RegisteredType`] through `inventory`, so the
//! full set of hierarchy tokens is available without any startup code.

use super::type_token::TypeToken;

/// One entry of the object type registry.
#[derive(Debug)]
pub struct RegisteredType {
    token: fn() -> &'static TypeToken,
}

impl RegisteredType {
    /// Creates an entry from the accessor of a type's static token.
    #[doc(hidden)]
    #[must_use]
    pub const fn new(token: fn() -> &'static TypeToken) -> Self {
        Self { token }
    }

    /// Returns the registered token.
    #[must_use]
    pub fn token(&self) -> &'static TypeToken {
        (self.token)()
    }
}

inventory::collect!(RegisteredType);

/// Iterates over the tokens of every registered object type.
pub fn registered_types() -> impl Iterator<Item = &'static TypeToken> {
    inventory::iter::<RegisteredType>
        .into_iter()
        .map(RegisteredType::token)
}

/// Finds the first registered type carrying `name`.
///
/// Names are not identities: if several types share a name, which one is
/// returned is unspecified.
#[must_use]
pub fn find_registered(name: &str) -> Option<&'static TypeToken> {
    registered_types().find(|token| token.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtti::{Object, TypeClass};

    #[derive(Object)]
    #[object(name = "RegisteredMarker")]
    struct RegisteredMarker;

    #[test]
    fn test_derived_types_are_registered() {
        assert!(registered_types().any(|token| token == RegisteredMarker::type_class()));
    }

    #[test]
    fn test_find_by_name() {
        let found = find_registered("RegisteredMarker").unwrap();
        assert_eq!(found, RegisteredMarker::type_class());
        assert!(find_registered("NoSuchType").is_none());
    }
}
