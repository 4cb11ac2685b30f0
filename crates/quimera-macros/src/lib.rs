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

//! This crate provides procedural macros for the Quimera engine.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Index, LitStr, Member};

/// A derive macro that places a struct in the object hierarchy.
///
/// It generates the type's static token, registers it, and implements
/// `TypeClass`, `Object`, `Classify` and `Traceable` from `quimera_core`.
///
/// Supported attributes:
/// - `#[object(name = "...")]` on the struct overrides the token name, which
///   defaults to the struct identifier.
/// - `#[object(describe)]` on the struct traces values through their
///   `Display` implementation instead of as an unknown value.
/// - `#[object(base)]` on a field marks it as an embedded base. A struct may
///   have several bases.
#[proc_macro_derive(Object, attributes(object))]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_object(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct TypeOptions {
    name: String,
    describe: bool,
}

fn parse_type_options(input: &DeriveInput) -> syn::Result<TypeOptions> {
    let mut options = TypeOptions {
        name: input.ident.to_string(),
        describe: false,
    };

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("object")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let name: LitStr = meta.value()?.parse()?;
                options.name = name.value();
                Ok(())
            } else if meta.path.is_ident("describe") {
                options.describe = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `describe`"))
            }
        })?;
    }

    Ok(options)
}

fn collect_bases(fields: &Fields) -> syn::Result<Vec<Member>> {
    let mut bases = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let mut is_base = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("object")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("base") {
                    is_base = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `base`"))
                }
            })?;
        }

        if is_base {
            bases.push(match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(index)),
            });
        }
    }

    Ok(bases)
}

fn expand_object(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "`Object` can only be derived for structs",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "`Object` cannot be derived for generic types, each type needs a single static token",
        ));
    }

    let ident = &input.ident;
    let options = parse_type_options(input)?;
    let bases = collect_bases(&data.fields)?;
    let type_name = options.name;

    let write_value = if options.describe {
        quote! {
            let _ = ::std::fmt::Write::write_fmt(out, format_args!("{}", self));
        }
    } else {
        quote! {
            ::quimera_core::diagnosis::argument_trace::write_unknown_value(
                ::quimera_core::data_types::address_of(self),
                out,
            );
        }
    };

    let expanded = quote! {
        const _: () = {
            static __TYPE: ::quimera_core::rtti::TypeToken =
                ::quimera_core::rtti::TypeToken::new(#type_name);

            fn __type_token() -> &'static ::quimera_core::rtti::TypeToken {
                &__TYPE
            }

            ::quimera_core::inventory::submit! {
                ::quimera_core::rtti::RegisteredType::new(__type_token)
            }

            impl ::quimera_core::rtti::TypeClass for #ident {
                fn type_class() -> &'static ::quimera_core::rtti::TypeToken {
                    __type_token()
                }
            }

            impl ::quimera_core::rtti::Object for #ident {
                fn type_object(&self) -> &'static ::quimera_core::rtti::TypeToken {
                    __type_token()
                }

                fn override_is(&self, token: &::quimera_core::rtti::TypeToken) -> bool {
                    token == __type_token()
                        || token == ::quimera_core::rtti::root_type()
                        #( || ::quimera_core::rtti::Object::override_is(&self.#bases, token) )*
                }

                fn view(
                    &self,
                    token: &::quimera_core::rtti::TypeToken,
                ) -> ::std::option::Option<&dyn ::std::any::Any> {
                    if token == __type_token() || token == ::quimera_core::rtti::root_type() {
                        return ::std::option::Option::Some(self);
                    }
                    #(
                        if ::quimera_core::rtti::Object::override_is(&self.#bases, token) {
                            return ::quimera_core::rtti::Object::view(&self.#bases, token);
                        }
                    )*
                    ::std::option::Option::None
                }

                fn view_mut(
                    &mut self,
                    token: &::quimera_core::rtti::TypeToken,
                ) -> ::std::option::Option<&mut dyn ::std::any::Any> {
                    if token == __type_token() || token == ::quimera_core::rtti::root_type() {
                        return ::std::option::Option::Some(self);
                    }
                    #(
                        if ::quimera_core::rtti::Object::override_is(&self.#bases, token) {
                            return ::quimera_core::rtti::Object::view_mut(&mut self.#bases, token);
                        }
                    )*
                    ::std::option::Option::None
                }
            }

            impl ::quimera_core::rtti::Classify for #ident {
                fn classify_static() -> ::std::option::Option<&'static ::quimera_core::rtti::TypeToken> {
                    ::std::option::Option::Some(::quimera_core::rtti::root_type())
                }

                fn classify(&self) -> ::std::option::Option<&'static ::quimera_core::rtti::TypeToken> {
                    ::std::option::Option::Some(::quimera_core::rtti::Object::type_object(self))
                }
            }

            impl ::quimera_core::diagnosis::Traceable for #ident {
                const INNERMOST_SIZE: usize = ::std::mem::size_of::<#ident>();

                fn declared_token() -> ::std::option::Option<&'static ::quimera_core::rtti::TypeToken> {
                    ::std::option::Option::Some(__type_token())
                }

                fn write_value(&self, out: &mut ::std::string::String) {
                    #write_value
                }
            }
        };
    };

    Ok(expanded)
}
