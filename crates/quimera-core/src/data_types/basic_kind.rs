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

//! The closed set of value kinds every classification recognizes.

use crate::rtti::TypeToken;

static BOOL_TYPE: TypeToken = TypeToken::new("bool");
static U8_TYPE: TypeToken = TypeToken::new("u8");
static U16_TYPE: TypeToken = TypeToken::new("u16");
static U32_TYPE: TypeToken = TypeToken::new("u32");
static U64_TYPE: TypeToken = TypeToken::new("u64");
static I8_TYPE: TypeToken = TypeToken::new("i8");
static I16_TYPE: TypeToken = TypeToken::new("i16");
static I32_TYPE: TypeToken = TypeToken::new("i32");
static I64_TYPE: TypeToken = TypeToken::new("i64");
static F32_TYPE: TypeToken = TypeToken::new("f32");
static F64_TYPE: TypeToken = TypeToken::new("f64");
static STRING_TYPE: TypeToken = TypeToken::new("string");

/// A basic value kind: booleans, fixed-width integers, the two float
/// widths and owned strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    /// `bool`.
    Bool,
    /// `u8`.
    U8,
    /// `u16`.
    U16,
    /// `u32`.
    U32,
    /// `u64`.
    U64,
    /// `i8`.
    I8,
    /// `i16`.
    I16,
    /// `i32`.
    I32,
    /// `i64`.
    I64,
    /// `f32`.
    F32,
    /// `f64`.
    F64,
    /// `String`.
    String,
}

impl BasicKind {
    /// Every basic kind, in declaration order.
    pub const ALL: [BasicKind; 12] = [
        BasicKind::Bool,
        BasicKind::U8,
        BasicKind::U16,
        BasicKind::U32,
        BasicKind::U64,
        BasicKind::I8,
        BasicKind::I16,
        BasicKind::I32,
        BasicKind::I64,
        BasicKind::F32,
        BasicKind::F64,
        BasicKind::String,
    ];

    /// Returns the token registered for this kind.
    #[must_use]
    pub fn token(self) -> &'static TypeToken {
        match self {
            BasicKind::Bool => &BOOL_TYPE,
            BasicKind::U8 => &U8_TYPE,
            BasicKind::U16 => &U16_TYPE,
            BasicKind::U32 => &U32_TYPE,
            BasicKind::U64 => &U64_TYPE,
            BasicKind::I8 => &I8_TYPE,
            BasicKind::I16 => &I16_TYPE,
            BasicKind::I32 => &I32_TYPE,
            BasicKind::I64 => &I64_TYPE,
            BasicKind::F32 => &F32_TYPE,
            BasicKind::F64 => &F64_TYPE,
            BasicKind::String => &STRING_TYPE,
        }
    }

    /// Returns the canonical display name (`"u8"`, `"f64"`, `"string"`...).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.token().name()
    }

    /// Returns the kind whose token is `token`, if any.
    #[must_use]
    pub fn from_token(token: &TypeToken) -> Option<BasicKind> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }
}
