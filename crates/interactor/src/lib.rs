//! # Interactor
//!
//! Type-directed dispatch of requests to use cases.
//!
//! ## Overview
//!
//! A use case is any function or method of the shape
//! `(&dyn Context, Request, &mut Response) -> Result<(), E>`. The adapter
//! checks that shape once, when the use case is registered, and wraps it into
//! a uniform [`UseCaseFn`](prelude::UseCaseFn). The dispatcher keys every
//! use case by the declared type of its request and routes each request to
//! the matching one.
//!
//! ```text
//! ┌────────┐  adapt   ┌───────────┐  register  ┌────────────┐
//! │ fn/obj │─────────▶│ UseCaseFn │───────────▶│ Dispatcher │
//! └────────┘          └───────────┘            └────────────┘
//!                                                    ▲
//!                       dispatch(ctx, req, &mut resp)│
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use interactor::prelude::*;
//!
//! #[derive(Request)]
//! struct Double {
//!     value: i64,
//! }
//!
//! #[derive(Default, Response)]
//! struct Doubled {
//!     value: i64,
//! }
//!
//! fn double(_: &dyn Context, req: Double, resp: &mut Doubled) -> Result<(), Infallible> {
//!     resp.value = req.value * 2;
//!     Ok(())
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let dispatcher = interactor::runtime::bootstrap(ConfigLoader::new())?;
//!     dispatcher.register(&Double { value: 0 }, adapt_fn(double)?);
//!
//!     let mut resp = Doubled::default();
//!     dispatcher.dispatch(&RunContext::background(), Double { value: 21 }, &mut resp)?;
//!     assert_eq!(resp.value, 42);
//!     Ok(())
//! }
//! ```
//!
//! The derive and attribute macros expand to paths under `::interactor_core`,
//! so applications depend on `interactor-core` next to this crate.
//!
//! ## Features
//!
//! - `toml-config`: `interactor.toml` configuration files (default)
//! - `yaml-config`: `interactor.yaml` configuration files
//! - `json-log`: JSON log output

pub use interactor_core as core;
pub use interactor_macros as macros;
pub use interactor_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use interactor::prelude::*;
/// ```
pub mod prelude {
    // Capabilities - what use cases consume and produce
    pub use interactor_core::{BoxedRequest, Context, Request, Response, RunContext};

    // Derives and attributes
    pub use interactor_macros::{Request, Response, interactor};

    // Adaptation
    pub use interactor_core::{
        Candidate, Interactor, adapt, adapt_any, adapt_fn, adapt_shared, must, must_adapt,
        must_adapt_fn,
    };

    // Dispatch
    pub use interactor_core::{Dispatcher, DuplicatePolicy, UseCaseFn, UseCaseRunner};

    // Errors
    pub use interactor_core::{AdaptError, ContextError, UseCaseError};

    // Runtime
    pub use interactor_runtime::{ConfigLoader, InteractorConfig};

    pub use std::convert::Infallible;
}
