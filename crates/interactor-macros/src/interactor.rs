//! `#[interactor]` attribute implementation.
//!
//! Leaves the decorated impl block unchanged and appends an
//! `impl ::interactor_core::Interactor` whose `run_method` binds the
//! designated method to the shared receiver:
//!
//! ```rust,ignore
//! fn run_method(self: Arc<Self>) -> Option<Candidate> {
//!     Some(Candidate::new(move |__arg0: &dyn Context, __arg1: &Req, __arg2: &mut Resp| -> Result<(), E> {
//!         Self::run(&self, __arg0, __arg1, __arg2)
//!     }))
//! }
//! ```

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, ReturnType, spanned::Spanned};

pub fn expand(item: &ItemImpl, method: &str) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "#[interactor] must be placed on an inherent impl block",
        ));
    }

    let run = item.items.iter().find_map(|item| match item {
        ImplItem::Fn(f) if f.sig.ident == method => Some(f),
        _ => None,
    });

    let body = match run {
        Some(run) => {
            let candidate = bind(run)?;
            quote! {
                fn run_method(
                    self: ::std::sync::Arc<Self>,
                ) -> ::core::option::Option<::interactor_core::Candidate> {
                    ::core::option::Option::Some(#candidate)
                }
            }
        }
        // The default `run_method` reports the missing method at adaptation.
        None => TokenStream::new(),
    };

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics ::interactor_core::Interactor for #self_ty #where_clause {
            #body
        }
    })
}

/// Builds a `Candidate` expression calling `run` on the captured receiver.
fn bind(run: &ImplItemFn) -> syn::Result<TokenStream> {
    let sig = &run.sig;
    if sig.asyncness.is_some() {
        return Err(syn::Error::new(sig.span(), "run method cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new(
            sig.generics.span(),
            "run method cannot declare generic parameters",
        ));
    }

    let mut has_receiver = false;
    let mut params = Vec::new();
    let mut args = Vec::new();

    for input in &sig.inputs {
        match input {
            FnArg::Receiver(receiver) => {
                if receiver.reference.is_none() || receiver.mutability.is_some() {
                    return Err(syn::Error::new(
                        receiver.span(),
                        "run method must take `&self` or no receiver",
                    ));
                }
                has_receiver = true;
            }
            FnArg::Typed(typed) => {
                let arg = format_ident!("__arg{}", args.len());
                let ty = &typed.ty;
                params.push(quote!(#arg: #ty));
                args.push(arg);
            }
        }
    }

    let output = match &sig.output {
        ReturnType::Default => quote!(-> ()),
        ReturnType::Type(_, ty) => quote!(-> #ty),
    };

    let ident = &sig.ident;
    let call = if has_receiver {
        quote!(Self::#ident(&self, #(#args),*))
    } else {
        quote!(Self::#ident(#(#args),*))
    };

    Ok(quote! {
        ::interactor_core::Candidate::new(move |#(#params),*| #output { #call })
    })
}
