//! Procedural macros for interactor use cases.
//!
//! This crate provides:
//!
//! - `#[derive(Request)]` / `#[derive(Response)]` - Opt a type into a
//!   capability and make it usable as a use case parameter
//! - `#[interactor]` - Exposes the `run` method of an inherent impl block to
//!   the adapter
//!
//! The generated code refers to `::interactor_core`, so that crate must be a
//! direct dependency of the crate using these macros.
//!
//! ```rust,ignore
//! use interactor::prelude::*;
//!
//! #[derive(Request)]
//! pub struct CreateUser {
//!     pub name: String,
//! }
//!
//! #[derive(Default, Response)]
//! pub struct UserCreated {
//!     pub id: u64,
//! }
//!
//! pub struct CreateUserInteractor {
//!     repo: Arc<dyn UserRepository>,
//! }
//!
//! #[interactor]
//! impl CreateUserInteractor {
//!     fn run(&self, ctx: &dyn Context, req: &CreateUser, resp: &mut UserCreated) -> Result<(), RepoError> {
//!         resp.id = self.repo.insert(ctx, &req.name)?;
//!         Ok(())
//!     }
//! }
//! ```

mod interactor;
mod message;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

use crate::message::Capability;

/// Implements `Request` for a struct or enum.
///
/// Also implements `Param` for `T`, so the type can be declared as the second
/// parameter of a use case by value; `&T` is covered by `interactor_core`.
/// May be combined with `#[derive(Response)]` on the same type.
#[proc_macro_derive(Request)]
pub fn derive_request(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match message::derive_capability(&input, Capability::Request) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Implements `Response` for a struct or enum.
///
/// The type is then accepted as `&mut T` in the third parameter of a use
/// case.
#[proc_macro_derive(Response)]
pub fn derive_response(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match message::derive_capability(&input, Capability::Response) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Implements `Interactor` for the type of an inherent impl block.
///
/// The block's `run` method, or the method named by
/// `#[interactor(method = "...")]`, becomes the designated run method. It may
/// take `&self` or no receiver at all. A block without such a method still
/// gets an `Interactor` impl, which the adapter rejects.
///
/// # Example
///
/// ```rust,ignore
/// #[interactor(method = "execute")]
/// impl SendInvoice {
///     fn execute(&self, ctx: &dyn Context, req: &Invoice, resp: &mut Receipt) -> Result<(), MailError> {
///         // ...
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn interactor(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut method = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("method") {
            method = Some(meta.value()?.parse::<syn::LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported #[interactor] argument, expected `method = \"...\"`"))
        }
    });
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(item as ItemImpl);
    let method = method.map_or_else(|| "run".to_string(), |lit| lit.value());

    match interactor::expand(&item, &method) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
