//! The uniform use case callable.

use std::fmt;
use std::sync::Arc;

use crate::adapter::Arguments;
use crate::adapter::candidate::Invoker;
use crate::adapter::signature::Contract;
use crate::context::Context;
use crate::error::UseCaseError;
use crate::message::{BoxedRequest, Request, Response};
use crate::shape::Shape;

/// Anything that can run a use case through the uniform signature.
pub trait UseCaseRunner: Send + Sync {
    fn run(
        &self,
        ctx: &dyn Context,
        req: BoxedRequest,
        resp: &mut dyn Response,
    ) -> Result<(), UseCaseError>;
}

impl<T: UseCaseRunner + ?Sized> UseCaseRunner for Arc<T> {
    fn run(
        &self,
        ctx: &dyn Context,
        req: BoxedRequest,
        resp: &mut dyn Response,
    ) -> Result<(), UseCaseError> {
        (**self).run(ctx, req, resp)
    }
}

type RunFn =
    dyn Fn(&dyn Context, BoxedRequest, &mut dyn Response) -> Result<(), UseCaseError> + Send + Sync;

// ============================================================================
// UseCaseFn
// ============================================================================

/// A use case with the uniform three-argument signature.
///
/// Produced by the adapter, or wrapped directly around a conforming closure
/// with [`UseCaseFn::from_fn`]. Cloning is cheap.
#[derive(Clone)]
pub struct UseCaseFn {
    name: &'static str,
    contract: Option<Contract>,
    run: Arc<RunFn>,
}

impl UseCaseFn {
    /// Wraps a closure that already has the uniform signature.
    ///
    /// No shapes are checked on its behalf.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Context, BoxedRequest, &mut dyn Response) -> Result<(), UseCaseError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: std::any::type_name::<F>(),
            contract: None,
            run: Arc::new(f),
        }
    }

    /// Wraps another runner, such as a nested [`Dispatcher`](crate::Dispatcher).
    pub fn from_runner<R: UseCaseRunner + 'static>(runner: R) -> Self {
        Self {
            name: std::any::type_name::<R>(),
            contract: None,
            run: Arc::new(
                move |ctx: &dyn Context, req: BoxedRequest, resp: &mut dyn Response| {
                    runner.run(ctx, req, resp)
                },
            ),
        }
    }

    pub(crate) fn adapted(name: &'static str, contract: Contract, invoker: Invoker) -> Self {
        let run = move |ctx: &dyn Context, req: BoxedRequest, resp: &mut dyn Response| {
            let got = resp.shape();
            if got != contract.response {
                return Err(UseCaseError::ResponseTypeMismatch {
                    expected: contract.response,
                    got,
                });
            }

            let got = req.shape();
            if got != contract.request {
                return Err(UseCaseError::RequestTypeMismatch {
                    expected: contract.request,
                    got,
                });
            }

            let mut request = Some(req);
            invoker(&mut Arguments::new(ctx, &mut request, resp))
        };

        Self {
            name,
            contract: Some(contract),
            run: Arc::new(run),
        }
    }

    /// Type name of the wrapped handler.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The request shape the use case declared, if it was adapted.
    pub fn request_shape(&self) -> Option<Shape> {
        self.contract.map(|c| c.request)
    }

    /// The response shape the use case declared, if it was adapted.
    pub fn response_shape(&self) -> Option<Shape> {
        self.contract.map(|c| c.response)
    }

    /// Runs the use case with a concrete request.
    pub fn call<R: Request>(
        &self,
        ctx: &dyn Context,
        req: R,
        resp: &mut dyn Response,
    ) -> Result<(), UseCaseError> {
        (self.run)(ctx, Box::new(req), resp)
    }
}

impl UseCaseRunner for UseCaseFn {
    fn run(
        &self,
        ctx: &dyn Context,
        req: BoxedRequest,
        resp: &mut dyn Response,
    ) -> Result<(), UseCaseError> {
        (self.run)(ctx, req, resp)
    }
}

impl fmt::Debug for UseCaseFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseCaseFn")
            .field("name", &self.name)
            .field("request", &self.request_shape())
            .field("response", &self.response_shape())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RunContext;
    use interactor_macros::{Request, Response};

    #[derive(Request)]
    struct Greet {
        name: &'static str,
    }

    #[derive(Default, Response)]
    struct Greeting {
        text: String,
    }

    #[test]
    fn test_from_fn_runs_without_checks() {
        let runner = UseCaseFn::from_fn(|_, req, resp| {
            let name = req.downcast_ref::<Greet>().map_or("nobody", |g| g.name);
            if let Some(greeting) = resp.downcast_mut::<Greeting>() {
                greeting.text = format!("hello, {name}");
            }
            Ok(())
        });
        assert_eq!(runner.request_shape(), None);

        let mut greeting = Greeting::default();
        runner
            .call(&RunContext::background(), Greet { name: "ada" }, &mut greeting)
            .unwrap();
        assert_eq!(greeting.text, "hello, ada");
    }

    #[test]
    fn test_runner_through_arc() {
        let runner: Arc<dyn UseCaseRunner> = Arc::new(UseCaseFn::from_fn(|_, _, _| {
            Err(UseCaseError::ArgumentUnavailable {
                position: 1,
                param: "none",
            })
        }));
        let wrapped = UseCaseFn::from_runner(runner);

        let mut greeting = Greeting::default();
        let result = wrapped.call(&RunContext::background(), Greet { name: "x" }, &mut greeting);
        assert!(matches!(result, Err(UseCaseError::ArgumentUnavailable { position: 1, .. })));
    }
}
