//! # Interactor Core
//!
//! Type-directed dispatch of use cases.
//!
//! This crate provides:
//! - [`Request`] / [`Response`] capability markers and their runtime [`Shape`]
//! - [`Context`], the cancellation/deadline/value carrier handed to every use case
//! - The adapter, which validates a handler's signature and wraps it into a
//!   uniform [`UseCaseFn`]
//! - [`Dispatcher`], the registry routing requests to use cases by shape
//!
//! ## Example
//!
//! ```rust,ignore
//! use interactor_core::{Context, Dispatcher, RunContext, adapt_fn};
//!
//! #[derive(Request)]
//! struct Double { value: i64 }
//!
//! #[derive(Default, Response)]
//! struct Doubled { value: i64 }
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.register(
//!     &Double { value: 0 },
//!     adapt_fn(|_: &dyn Context, req: Double, resp: &mut Doubled| {
//!         resp.value = req.value * 2;
//!         Ok::<_, std::convert::Infallible>(())
//!     })?,
//! );
//!
//! let mut resp = Doubled::default();
//! dispatcher.dispatch(&RunContext::background(), Double { value: 21 }, &mut resp)?;
//! assert_eq!(resp.value, 42);
//! ```

// Lets derive output, which names `::interactor_core`, expand inside this crate.
extern crate self as interactor_core;

pub mod adapter;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod message;
pub mod runner;
pub mod shape;

pub use adapter::{
    ARITY, Access, Arguments, Candidate, Interactor, IntoCandidate, Outcome, Param, ParamInfo,
    ParamKind, Signature, adapt, adapt_any, adapt_fn, adapt_shared, must, must_adapt,
    must_adapt_fn,
};
pub use context::{Context, RunContext};
pub use dispatcher::{Dispatcher, DuplicatePolicy};
pub use error::{AdaptError, AdaptResult, BoxError, ContextError, UseCaseError, UseCaseResult};
pub use message::{AsAny, BoxedRequest, Request, Response};
pub use runner::{UseCaseFn, UseCaseRunner};
pub use shape::Shape;
