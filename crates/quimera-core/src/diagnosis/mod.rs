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

//! Diagnostic call tracing.
//!
//! An [`ArgumentTrace`] captures the type name and value of one argument, a
//! [`CallTrace`] groups them with the signature of the called function, and
//! the [`CallStackTracer`] keeps the active calls of every thread so they can
//! be printed when something goes wrong.

pub mod argument_trace;
pub mod call_stack_trace;
pub mod call_trace;
pub mod error;
pub mod formatter;
pub mod printer;
pub mod settings;
pub mod tracer;
pub mod wrappers;

pub use argument_trace::{ArgumentTrace, Indirection, Traceable};
pub use call_stack_trace::CallStackTrace;
pub use call_trace::CallTrace;
pub use error::{ConfigError, TracerError};
pub use formatter::{CallStackTraceFormatter, PlainTextFormatter};
pub use printer::{BufferPrinter, CallStackTracePrinter, ChannelPrinter, LogPrinter};
pub use settings::TracingSettings;
pub use tracer::{CallStackTracer, ScopedCallTraceNotifier};
pub use wrappers::{Described, Opaque};

/// Support for the tracing macros. Not part of the public API.
///
/// The macros call `argument_trace` on `&&&&&Candidate(&arg)`. Method lookup
/// strips one reference per step, so the first tier whose bounds hold wins:
/// a [`Traceable`] argument, then one to three reference levels over a type
/// without tracing support, then any other value.
#[doc(hidden)]
pub mod __private {
    use std::mem;

    use super::argument_trace::{
        opaque_pointer_name, write_indirection, write_unknown_value, Indirection,
    };
    use super::{ArgumentTrace, Traceable};
    use crate::data_types::address_of;

    /// Borrow of a macro argument, checked for its tracing capability.
    pub struct Candidate<'a, T: ?Sized>(pub &'a T);

    pub trait ViaTraceable {
        fn argument_trace(&self) -> ArgumentTrace;
    }

    impl<T: Traceable + ?Sized> ViaTraceable for &&&&Candidate<'_, T> {
        fn argument_trace(&self) -> ArgumentTrace {
            ArgumentTrace::new(self.0)
        }
    }

    pub trait ViaOpaqueThreeLevels {
        fn argument_trace(&self) -> ArgumentTrace;
    }

    impl<P> ViaOpaqueThreeLevels for &&&Candidate<'_, P>
    where
        P: Indirection,
        P::Pointee: Indirection,
        <P::Pointee as Indirection>::Pointee: Indirection,
        <<P::Pointee as Indirection>::Pointee as Indirection>::Pointee: Sized,
    {
        fn argument_trace(&self) -> ArgumentTrace {
            let mut value = String::new();
            if let Some(second) = write_indirection(self.0, &mut value) {
                if let Some(third) = write_indirection(second, &mut value) {
                    if let Some(pointee) = write_indirection(third, &mut value) {
                        write_unknown_value(address_of(pointee), &mut value);
                    }
                }
            }

            let shared = P::SHARED
                || <P::Pointee as Indirection>::SHARED
                || <<P::Pointee as Indirection>::Pointee as Indirection>::SHARED;
            let size = mem::size_of::<
                <<P::Pointee as Indirection>::Pointee as Indirection>::Pointee,
            >();
            ArgumentTrace::from_parts(opaque_pointer_name(shared, size, 3), value)
        }
    }

    pub trait ViaOpaqueTwoLevels {
        fn argument_trace(&self) -> ArgumentTrace;
    }

    impl<P> ViaOpaqueTwoLevels for &&Candidate<'_, P>
    where
        P: Indirection,
        P::Pointee: Indirection,
        <P::Pointee as Indirection>::Pointee: Sized,
    {
        fn argument_trace(&self) -> ArgumentTrace {
            ArgumentTrace::opaque_pointer_to_pointer(self.0)
        }
    }

    pub trait ViaOpaqueOneLevel {
        fn argument_trace(&self) -> ArgumentTrace;
    }

    impl<P> ViaOpaqueOneLevel for &Candidate<'_, P>
    where
        P: Indirection,
        P::Pointee: Sized,
    {
        fn argument_trace(&self) -> ArgumentTrace {
            ArgumentTrace::opaque_pointer(self.0)
        }
    }

    pub trait ViaOpaque {
        fn argument_trace(&self) -> ArgumentTrace;
    }

    impl<T> ViaOpaque for Candidate<'_, T> {
        fn argument_trace(&self) -> ArgumentTrace {
            ArgumentTrace::opaque(self.0)
        }
    }
}
