//! Handler adaptation.
//!
//! The adapter turns a handler of an unverified shape into a [`UseCaseFn`],
//! the uniform three-argument callable the [`Dispatcher`](crate::Dispatcher)
//! stores. Validation happens twice:
//!
//! - structurally, when adapting: parameter count and parameter kinds;
//! - nominally, on every call: the exact response and request shapes.
//!
//! # Example
//!
//! ```rust,ignore
//! fn create_user(ctx: &dyn Context, req: &CreateUser, resp: &mut UserCreated) -> Result<(), DbError> {
//!     resp.id = insert(ctx, &req.name)?;
//!     Ok(())
//! }
//!
//! let runner = adapt_fn(create_user)?;
//! ```

pub mod candidate;
mod must;
pub mod param;
pub mod signature;

use std::any::{Any, type_name};
use std::sync::Arc;

use tracing::debug;

pub use candidate::{Candidate, IntoCandidate, Outcome};
pub use must::{must, must_adapt, must_adapt_fn};
pub use param::{Access, Arguments, Param, ParamInfo, ParamKind};
pub use signature::{ARITY, Contract, Signature};

use crate::error::{AdaptError, AdaptResult};
use crate::runner::UseCaseFn;

/// An object exposing a designated run method.
///
/// Usually implemented with the `#[interactor]` attribute on the inherent
/// impl block that defines `run`:
///
/// ```rust,ignore
/// struct Greeter { greeting: String }
///
/// #[interactor]
/// impl Greeter {
///     fn run(&self, _: &dyn Context, req: &Greet, resp: &mut Greeting) -> Result<(), Infallible> {
///         resp.text = format!("{}, {}", self.greeting, req.name);
///         Ok(())
///     }
/// }
/// ```
pub trait Interactor: Send + Sync + 'static {
    /// The run method bound to this receiver, if the type has one.
    fn run_method(self: Arc<Self>) -> Option<Candidate> {
        None
    }
}

/// Adapts a closure or fn item.
pub fn adapt_fn<M, F: IntoCandidate<M>>(handler: F) -> AdaptResult<UseCaseFn> {
    adapt_candidate(&Candidate::new(handler))
}

/// Adapts the run method of `interactor`.
pub fn adapt<I: Interactor>(interactor: I) -> AdaptResult<UseCaseFn> {
    adapt_shared(Arc::new(interactor))
}

/// Adapts the run method of a shared `interactor`.
pub fn adapt_shared<I: Interactor>(interactor: Arc<I>) -> AdaptResult<UseCaseFn> {
    let candidate = interactor.run_method().ok_or(AdaptError::NoRunMethod {
        type_name: type_name::<I>(),
    })?;
    adapt_candidate(&candidate)
}

/// Adapts a handler taken out of a type-erased container.
///
/// Accepts a [`Candidate`] or an already adapted [`UseCaseFn`]; anything else
/// is not a function.
pub fn adapt_any(value: Arc<dyn Any + Send + Sync>) -> AdaptResult<UseCaseFn> {
    if let Some(runner) = value.downcast_ref::<UseCaseFn>() {
        return Ok(runner.clone());
    }
    match value.downcast_ref::<Candidate>() {
        Some(candidate) => adapt_candidate(candidate),
        None => Err(AdaptError::NotAFunction),
    }
}

/// Validates `candidate` and wraps it into a [`UseCaseFn`].
pub fn adapt_candidate(candidate: &Candidate) -> AdaptResult<UseCaseFn> {
    let signature = candidate.signature();
    let contract = signature.validate()?;
    let Some(invoker) = candidate.invoker() else {
        return Err(AdaptError::InvalidArity {
            expected: ARITY,
            given: signature.arity(),
        });
    };

    debug!(
        use_case = signature.name(),
        request = %contract.request,
        response = %contract.response,
        "Adapted use case runner"
    );
    Ok(UseCaseFn::adapted(signature.name(), contract, invoker.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, RunContext};
    use crate::error::UseCaseError;
    use crate::shape::Shape;
    use interactor_macros::{Request, Response, interactor};
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("some error")]
    struct SomeError;

    #[derive(Debug, Clone, PartialEq, Request)]
    struct TestRequest {
        id: i64,
    }

    #[derive(Debug, Default, PartialEq, Response)]
    struct TestResponse {
        result: i64,
    }

    #[derive(Debug, Default, Response)]
    struct AnotherResponse;

    struct ConcreteUseCase {
        fail: bool,
    }

    #[interactor]
    impl ConcreteUseCase {
        fn run(
            &self,
            _: &dyn Context,
            req: TestRequest,
            resp: &mut TestResponse,
        ) -> Result<(), SomeError> {
            if self.fail {
                return Err(SomeError);
            }
            resp.result = req.id;
            Ok(())
        }
    }

    struct NoRunUseCase;

    #[interactor]
    impl NoRunUseCase {
        #[allow(dead_code)]
        fn execute(&self) {}
    }

    struct RenamedUseCase;

    #[interactor(method = "handle")]
    impl RenamedUseCase {
        fn handle(_: &dyn Context, req: &TestRequest, resp: &mut TestResponse) -> Result<(), SomeError> {
            resp.result = req.id * 2;
            Ok(())
        }
    }

    fn echo(_: &dyn Context, req: TestRequest, resp: &mut TestResponse) -> Result<(), SomeError> {
        resp.result = req.id;
        Ok(())
    }

    fn call(runner: &UseCaseFn, id: i64) -> (Result<(), UseCaseError>, TestResponse) {
        let mut resp = TestResponse::default();
        let result = runner.call(&RunContext::background(), TestRequest { id }, &mut resp);
        (result, resp)
    }

    #[test]
    fn test_adapt_fn_arity() {
        let cases: Vec<(&str, AdaptResult<UseCaseFn>, usize)> = vec![
            ("no params", adapt_fn(|| Ok::<_, SomeError>(())), 0),
            ("one param", adapt_fn(|_: &dyn Context| Ok::<_, SomeError>(())), 1),
            (
                "two params",
                adapt_fn(|_: &dyn Context, _: TestRequest| Ok::<_, SomeError>(())),
                2,
            ),
            (
                "four params",
                adapt_fn(|_: &dyn Context, _: TestRequest, _: &mut TestResponse, _: u8| {
                    Ok::<_, SomeError>(())
                }),
                4,
            ),
        ];

        for (name, result, given) in cases {
            assert_eq!(
                result.err(),
                Some(AdaptError::InvalidArity { expected: 3, given }),
                "{name}"
            );
        }
    }

    #[test]
    fn test_adapt_fn_param_kinds() {
        let err = adapt_fn(|_: u32, _: TestRequest, _: &mut TestResponse| Ok::<_, SomeError>(())).err();
        assert_eq!(err, Some(AdaptError::InvalidContextParam { given: "u32" }));

        let err = adapt_fn(|_: &dyn Context, _: String, _: &mut TestResponse| Ok::<_, SomeError>(())).err();
        assert_eq!(err, Some(AdaptError::InvalidRequestParam { given: "alloc::string::String" }));

        let err = adapt_fn(|_: &dyn Context, _: &mut TestResponse, _: &mut TestResponse| {
            Ok::<_, SomeError>(())
        })
        .err();
        assert!(matches!(err, Some(AdaptError::InvalidRequestParam { .. })));

        let err = adapt_fn(|_: &dyn Context, _: TestRequest, _: TestRequest| Ok::<_, SomeError>(())).err();
        assert!(matches!(err, Some(AdaptError::InvalidResponseParam { .. })));

        let err = adapt_fn(|_: &dyn Context, _: TestRequest, _: &TestRequest| Ok::<_, SomeError>(())).err();
        assert!(matches!(err, Some(AdaptError::InvalidResponseParam { .. })));

        let err = adapt_fn(|_: &dyn Context, _: TestRequest, _: u64| Ok::<_, SomeError>(())).err();
        assert_eq!(err, Some(AdaptError::InvalidResponseParam { given: "u64" }));
    }

    #[test]
    fn test_adapted_fn_runs_once() {
        let runner = adapt_fn(echo).unwrap();
        let (result, resp) = call(&runner, 123);
        assert!(result.is_ok());
        assert_eq!(resp, TestResponse { result: 123 });
        assert_eq!(runner.request_shape(), Some(Shape::of::<TestRequest>()));
        assert_eq!(runner.response_shape(), Some(Shape::of::<TestResponse>()));
    }

    #[test]
    fn test_adapted_fn_counts_calls() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&calls);
        let runner = adapt_fn(move |_: &dyn Context, _: &TestRequest, _: &mut TestResponse| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok::<_, SomeError>(())
        })
        .unwrap();

        let _ = call(&runner, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut wrong = AnotherResponse;
        let result = runner.call(&RunContext::background(), TestRequest { id: 1 }, &mut wrong);
        assert!(matches!(result, Err(UseCaseError::ResponseTypeMismatch { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_response_mismatch_names_both_shapes() {
        let runner = adapt_fn(echo).unwrap();
        let mut resp = AnotherResponse;
        let err = runner
            .call(&RunContext::background(), TestRequest { id: 1 }, &mut resp)
            .unwrap_err();
        match err {
            UseCaseError::ResponseTypeMismatch { expected, got } => {
                assert_eq!(expected, Shape::of::<TestResponse>());
                assert_eq!(got, Shape::of::<AnotherResponse>());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_request_mismatch_is_rejected() {
        #[derive(Request)]
        struct OtherRequest;

        let runner = adapt_fn(echo).unwrap();
        let mut resp = TestResponse::default();
        let result = runner.call(&RunContext::background(), OtherRequest, &mut resp);
        assert!(matches!(result, Err(UseCaseError::RequestTypeMismatch { .. })));
        assert_eq!(resp, TestResponse::default());
    }

    #[test]
    fn test_handler_error_is_returned_unwrapped() {
        let runner = adapt_fn(|_: &dyn Context, _: TestRequest, _: &mut TestResponse| {
            Err::<(), _>(SomeError)
        })
        .unwrap();
        let (result, _) = call(&runner, 1);
        let err = result.unwrap_err();
        assert!(err.is::<SomeError>());
        assert_eq!(err.to_string(), "some error");
    }

    #[test]
    fn test_same_type_as_request_and_response() {
        #[derive(Debug, Default, PartialEq, Request, Response)]
        struct Item {
            n: i64,
        }

        let runner = adapt_fn(|_: &dyn Context, req: Item, resp: &mut Item| {
            resp.n = req.n * 10;
            Ok::<_, SomeError>(())
        })
        .unwrap();
        assert_eq!(runner.request_shape(), Some(Shape::of::<Item>()));
        assert_eq!(runner.response_shape(), Some(Shape::of::<Item>()));

        let mut resp = Item::default();
        runner
            .call(&RunContext::background(), Item { n: 7 }, &mut resp)
            .unwrap();
        assert_eq!(resp, Item { n: 70 });
    }

    #[test]
    fn test_adapt_interactor() {
        let runner = adapt(ConcreteUseCase { fail: false }).unwrap();
        let (result, resp) = call(&runner, 123);
        assert!(result.is_ok());
        assert_eq!(resp.result, 123);

        let runner = adapt(ConcreteUseCase { fail: true }).unwrap();
        let (result, resp) = call(&runner, 123);
        assert!(result.is_err_and(|err| err.is::<SomeError>()));
        assert_eq!(resp.result, 0);
    }

    #[test]
    fn test_adapt_interactor_without_run_method() {
        let err = adapt(NoRunUseCase).unwrap_err();
        assert!(matches!(err, AdaptError::NoRunMethod { type_name } if type_name.ends_with("NoRunUseCase")));
    }

    #[test]
    fn test_adapt_interactor_with_named_method() {
        let runner = adapt_shared(Arc::new(RenamedUseCase)).unwrap();
        let (result, resp) = call(&runner, 21);
        assert!(result.is_ok());
        assert_eq!(resp.result, 42);
    }

    #[test]
    fn test_adapt_any() {
        let runner = adapt_fn(echo).unwrap();
        assert!(adapt_any(Arc::new(runner)).is_ok());

        let candidate = Candidate::new(echo);
        let runner = adapt_any(Arc::new(candidate)).unwrap();
        assert_eq!(call(&runner, 5).1.result, 5);

        assert_eq!(adapt_any(Arc::new(42_u32)).err(), Some(AdaptError::NotAFunction));
    }
}
