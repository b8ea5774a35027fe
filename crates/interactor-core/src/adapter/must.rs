//! Panicking adapters for wiring code that cannot continue without a runner.

use super::{Interactor, IntoCandidate, adapt, adapt_fn};
use crate::error::AdaptResult;
use crate::runner::UseCaseFn;

/// Unwraps an adaptation result, panicking with the adaptation error.
#[track_caller]
pub fn must(result: AdaptResult<UseCaseFn>) -> UseCaseFn {
    match result {
        Ok(runner) => runner,
        Err(err) => panic!("{err}"),
    }
}

/// Like [`adapt`], but panics if `interactor` cannot be adapted.
#[track_caller]
pub fn must_adapt<I: Interactor>(interactor: I) -> UseCaseFn {
    must(adapt(interactor))
}

/// Like [`adapt_fn`], but panics if `handler` cannot be adapted.
#[track_caller]
pub fn must_adapt_fn<M, F: IntoCandidate<M>>(handler: F) -> UseCaseFn {
    must(adapt_fn(handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::error::AdaptError;
    use interactor_macros::{Request, Response};
    use std::convert::Infallible;

    #[derive(Request)]
    struct Ping;

    #[derive(Response)]
    struct Pong;

    #[test]
    fn test_must_returns_runner() {
        let runner = must_adapt_fn(|_: &dyn Context, _: Ping, _: &mut Pong| Ok::<_, Infallible>(()));
        assert!(runner.name().contains("closure"));
    }

    #[test]
    #[should_panic(expected = "use case runner is not a function")]
    fn test_must_panics_with_error() {
        must(Err(AdaptError::NotAFunction));
    }

    #[test]
    #[should_panic(expected = "must have 3 input params")]
    fn test_must_adapt_fn_panics_on_arity() {
        must_adapt_fn(|_: &dyn Context| Ok::<_, Infallible>(()));
    }
}
