//! `#[derive(Request)]` and `#[derive(Response)]`.
//!
//! | Derive | Impls | Parameter forms |
//! |--------|-------|-----------------|
//! | `Request` | `Request for T`, `Param for T` | `T` (owned), `&T` (shared) |
//! | `Response` | `Response for T` | `&mut T` (exclusive) |
//!
//! `&T` and `&mut T` are covered by blanket impls in `interactor_core`, so
//! the two derives never emit the same impl and a type may carry both.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, parse_quote, spanned::Spanned};

/// Which capability is derived.
#[derive(Clone, Copy)]
pub enum Capability {
    Request,
    Response,
}

pub fn derive_capability(input: &DeriveInput, capability: Capability) -> syn::Result<TokenStream> {
    if let Data::Union(_) = input.data {
        return Err(syn::Error::new(
            input.span(),
            "Request and Response cannot be derived for unions",
        ));
    }

    let name = &input.ident;
    let mut generics = input.generics.clone();
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let bounds = match capability {
        Capability::Request => quote!(::core::marker::Send + ::core::marker::Sync + 'static),
        Capability::Response => quote!(::core::marker::Send + 'static),
    };
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(#name #ty_generics: #bounds));
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let request_param = match capability {
        Capability::Request => quote! {
            impl #impl_generics ::interactor_core::Param for #name #ty_generics #where_clause {
                type This<'__a> = #name #ty_generics;

                fn info() -> ::interactor_core::ParamInfo {
                    ::interactor_core::ParamInfo::new::<Self>(::interactor_core::ParamKind::Request {
                        shape: ::interactor_core::Shape::of::<Self>(),
                        access: ::interactor_core::Access::Owned,
                    })
                }

                fn take<'__a>(
                    args: &mut ::interactor_core::Arguments<'__a>,
                ) -> ::core::option::Option<Self::This<'__a>> {
                    args.take_request::<Self>()
                }
            }
        },
        Capability::Response => TokenStream::new(),
    };
    let capability_trait = match capability {
        Capability::Request => quote!(::interactor_core::Request),
        Capability::Response => quote!(::interactor_core::Response),
    };

    Ok(quote! {
        impl #impl_generics #capability_trait for #name #ty_generics #where_clause {}

        #request_param
    })
}
