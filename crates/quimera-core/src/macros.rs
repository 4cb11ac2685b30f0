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

//! Tracing macros binding the global [`CallStackTracer`](crate::diagnosis::CallStackTracer)
//! to the enclosing scope.

/// Expands to the `&'static str` path of the enclosing function.
///
/// ```rust
/// fn load_scene() -> &'static str {
///     quimera_core::function_signature!()
/// }
///
/// assert!(load_scene().ends_with("load_scene"));
/// ```
#[macro_export]
macro_rules! function_signature {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        match name.strip_suffix("::__here") {
            Some(path) => path,
            None => name,
        }
    }};
}

/// Builds an array of [`ArgumentTrace`](crate::diagnosis::ArgumentTrace), one
/// per expression.
///
/// Arguments whose type implements [`Traceable`](crate::diagnosis::Traceable)
/// are traced with their type name and value. Any other argument is traced
/// as an unknown type. References to such a type, up to three levels deep,
/// keep their pointer levels and render `<Null>` when null.
///
/// ```rust
/// struct Handle(u32);
///
/// let handle = Handle(4);
/// let traces = quimera_core::trace_arguments!(7u8, handle);
/// assert_eq!(traces[0].type_name(), "u8");
/// assert_eq!(traces[1].type_name(), "<Unknown type (size: 4)>");
/// ```
#[macro_export]
macro_rules! trace_arguments {
    () => {
        [] as [$crate::diagnosis::ArgumentTrace; 0]
    };
    ($($arg:expr),+ $(,)?) => {
        [$({
            #[allow(unused_imports)]
            use $crate::diagnosis::__private::{
                ViaOpaque as _, ViaOpaqueOneLevel as _, ViaOpaqueThreeLevels as _,
                ViaOpaqueTwoLevels as _, ViaTraceable as _,
            };
            (&&&&&$crate::diagnosis::__private::Candidate(&$arg)).argument_trace()
        }),+]
    };
}

/// Traces the enclosing free function on the global tracer until the end of
/// the current block.
///
/// ```rust
/// use quimera_core::diagnosis::CallStackTracer;
///
/// fn resize(width: u32, height: u32) -> usize {
///     quimera_core::trace_function!(width, height);
///     CallStackTracer::global().depth()
/// }
///
/// assert_eq!(resize(800, 600), 1);
/// assert_eq!(CallStackTracer::global().depth(), 0);
/// ```
#[macro_export]
macro_rules! trace_function {
    ($($arg:expr),* $(,)?) => {
        let __quimera_arguments = $crate::trace_arguments!($($arg),*);
        let __quimera_notifier = $crate::diagnosis::ScopedCallTraceNotifier::new(
            $crate::diagnosis::CallTrace::new($crate::function_signature!(), &__quimera_arguments),
        );
    };
}

/// Traces the enclosing method of `class` on the global tracer until the end
/// of the current block.
#[macro_export]
macro_rules! trace_method {
    ($class:expr $(, $arg:expr)* $(,)?) => {
        let __quimera_arguments = $crate::trace_arguments!($($arg),*);
        let __quimera_class: &str = &$class;
        let __quimera_notifier = $crate::diagnosis::ScopedCallTraceNotifier::new(
            $crate::diagnosis::CallTrace::with_class_name(
                $crate::function_signature!(),
                &__quimera_arguments,
                __quimera_class,
            ),
        );
    };
}

/// Like [`trace_method!`], also recording a description of the calling
/// object's state.
#[macro_export]
macro_rules! trace_method_with_state {
    ($class:expr, $state:expr $(, $arg:expr)* $(,)?) => {
        let __quimera_arguments = $crate::trace_arguments!($($arg),*);
        let __quimera_class: &str = &$class;
        let __quimera_notifier = $crate::diagnosis::ScopedCallTraceNotifier::new(
            $crate::diagnosis::CallTrace::with_object_state(
                $crate::function_signature!(),
                &__quimera_arguments,
                __quimera_class,
                $state,
            ),
        );
    };
}
