/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */
#![forbid(unsafe_code)]

//! Courier Macro Library
//!
//! Attribute macros that turn plain structs into Courier message and actor types.
//!
//! # Message Macros
//!
//! ```ignore
//! // A request answered with a `u32`.
//! #[courier_event(reply = u32)]
//! pub struct Ping(pub u32);
//!
//! // A notification fanned out to every subscriber.
//! #[courier_broadcast]
//! pub struct Tick;
//! ```
//!
//! # Actor Macro
//!
//! ```ignore
//! #[courier_actor]
//! pub struct Counter {
//!     count: i32,
//! }
//! ```

use proc_macro::TokenStream;

use quote::{format_ident, quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::{parse_macro_input, parse_quote, DeriveInput, Ident, Token, Type};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

/// `#[derive(...)]` for whichever of `wanted` the item does not derive already.
fn missing_derives(input: &DeriveInput, wanted: &[&str]) -> impl ToTokens {
    let traits: Vec<Ident> = wanted
        .iter()
        .filter(|name| !has_derive(input, name))
        .map(|name| format_ident!("{}", name))
        .collect();
    if traits.is_empty() {
        quote!()
    } else {
        quote!(#[derive(#(#traits),*)])
    }
}

/// Options parsed from `#[courier_event(...)]`.
struct EventArgs {
    /// The type the handling actor completes the event with.
    reply: Type,
}

impl Parse for EventArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(Self {
                reply: parse_quote!(()),
            });
        }
        let key: Ident = input.parse()?;
        if key != "reply" {
            return Err(syn::Error::new(key.span(), "expected `reply = Type`"));
        }
        input.parse::<Token![=]>()?;
        let reply: Type = input.parse()?;
        input.parse::<Option<Token![,]>>()?;
        Ok(Self { reply })
    }
}

/// Turns a struct or enum into a Courier event.
///
/// Derives `Clone` and `Debug` where missing and implements `courier::prelude::Event`
/// with the given reply type (`()` when omitted). A compile-time assertion checks that
/// the type is `Send + Sync + 'static`.
///
/// ```ignore
/// #[courier_event(reply = String)]
/// pub struct Lookup {
///     pub key: u64,
/// }
/// ```
#[proc_macro_attribute]
pub fn courier_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as EventArgs);
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let derives = missing_derives(&input, &["Clone", "Debug"]);
    let reply = &args.reply;
    let assert_ident = format_ident!("_AssertCourierEvent_{}", name);

    let expanded = quote! {
        #derives
        #input

        impl #impl_generics ::courier::prelude::Event for #name #ty_generics #where_clause {
            type Reply = #reply;
        }

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + Sync + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };
    TokenStream::from(expanded)
}

/// Turns a struct or enum into a Courier broadcast.
///
/// Derives `Clone` and `Debug` where missing and implements
/// `courier::prelude::Broadcast`. A compile-time assertion checks that the type is
/// `Send + Sync + 'static`.
///
/// ```ignore
/// #[courier_broadcast]
/// pub struct Tick {
///     pub round: u64,
/// }
/// ```
#[proc_macro_attribute]
pub fn courier_broadcast(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let derives = missing_derives(&input, &["Clone", "Debug"]);
    let assert_ident = format_ident!("_AssertCourierBroadcast_{}", name);

    let expanded = quote! {
        #derives
        #input

        impl #impl_generics ::courier::prelude::Broadcast for #name #ty_generics #where_clause {}

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + Sync + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };
    TokenStream::from(expanded)
}

/// Prepares a struct to be an actor's model.
///
/// Derives `Default` and `Debug` where missing (pass `no_default` to supply `Default`
/// yourself) and asserts at compile time that the type is `Send + 'static`.
///
/// ```ignore
/// #[courier_actor]
/// pub struct Counter {
///     count: i32,
/// }
/// ```
#[proc_macro_attribute]
pub fn courier_actor(attr: TokenStream, item: TokenStream) -> TokenStream {
    let no_default = attr.to_string().split(',').any(|part| part.trim() == "no_default");
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let wanted: &[&str] = if no_default {
        &["Debug"]
    } else {
        &["Default", "Debug"]
    };
    let derives = missing_derives(&input, wanted);
    let assert_ident = format_ident!("_AssertCourierActor_{}", name);

    let expanded = quote! {
        #derives
        #input

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };
    TokenStream::from(expanded)
}
