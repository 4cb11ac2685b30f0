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

//! Defines [`TypeToken`], the identity of one named type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

/// The process-wide identity of exactly one named type.
///
/// Tokens live in `static` items and are compared by address: two tokens
/// carrying the same name are still different types unless they are the
/// same `static`. A token is never cloned, so the address is its identity.
///
/// # Example
///
/// ```rust
/// use quimera_core::rtti::TypeToken;
///
/// static MESH: TypeToken = TypeToken::new("Mesh");
/// static OTHER_MESH: TypeToken = TypeToken::new("Mesh");
///
/// assert_eq!(MESH.name(), OTHER_MESH.name());
/// assert_ne!(MESH, OTHER_MESH);
/// assert_eq!(MESH, MESH);
/// ```
pub struct TypeToken {
    name: &'static str,
}

impl TypeToken {
    /// Creates a new token with the given name.
    ///
    /// This is a `const fn` so that tokens can be declared as plain statics,
    /// which have no initialization order to get wrong.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Returns the name given at construction.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn address(&self) -> usize {
        self as *const Self as usize
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeToken")
            .field("name", &self.name)
            .field("address", &format_args!("{:#x}", self.address()))
            .finish()
    }
}
