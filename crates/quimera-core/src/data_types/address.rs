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

//! Text rendering of memory addresses.

use std::fmt::Write;
use std::mem;

/// The text written in place of a null pointer.
pub const NULL_POINTER: &str = "<Null>";

/// Number of hexadecimal digits of a full pointer-width address.
const ADDRESS_DIGITS: usize = mem::size_of::<usize>() * 2;

/// Returns the address of `value` as an integer.
pub fn address_of<T: ?Sized>(value: &T) -> usize {
    value as *const T as *const () as usize
}

/// Formats an address as `0x` followed by upper-case hexadecimal digits,
/// zero-padded to the pointer width.
#[must_use]
pub fn format_address(address: usize) -> String {
    let mut text = String::with_capacity(ADDRESS_DIGITS + 2);
    write_address(address, &mut text);
    text
}

/// Appends the [`format_address`] text to `out`.
pub fn write_address(address: usize, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = write!(out, "0x{address:0width$X}", width = ADDRESS_DIGITS);
}
