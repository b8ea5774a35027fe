//! Error types for adaptation, dispatch and contexts.

use std::error::Error as StdError;

use thiserror::Error;

use crate::shape::Shape;

/// An opaque error returned by a use case.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors detected while adapting a handler, before it can ever be called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdaptError {
    /// The value handed to the adapter is not a callable handler.
    #[error("use case runner is not a function")]
    NotAFunction,

    /// The handler does not take exactly three parameters.
    #[error("use case runner must have {expected} input params, got {given}")]
    InvalidArity {
        /// Required parameter count.
        expected: usize,
        /// Declared parameter count.
        given: usize,
    },

    /// The first parameter is not a context.
    #[error("first input argument must have context type, got `{given}`")]
    InvalidContextParam {
        /// Declared type of the parameter.
        given: &'static str,
    },

    /// The second parameter is neither a request nor a shared reference to one.
    #[error("second input argument must implement Request, got `{given}`")]
    InvalidRequestParam {
        /// Declared type of the parameter.
        given: &'static str,
    },

    /// The third parameter is not an exclusive reference to a response.
    #[error("third input argument must be a mutable Response reference, got `{given}`")]
    InvalidResponseParam {
        /// Declared type of the parameter.
        given: &'static str,
    },

    /// The object exposes no designated run method.
    #[error("use case runner `{type_name}` has no valid run method")]
    NoRunMethod {
        /// Type of the object that was adapted.
        type_name: &'static str,
    },
}

/// Errors produced when a use case is invoked.
#[derive(Debug, Error)]
pub enum UseCaseError {
    /// The response handed in is not the one the use case declared.
    #[error("result type mismatch: want {expected}, got {got}")]
    ResponseTypeMismatch { expected: Shape, got: Shape },

    /// The request handed in is not the one the use case declared.
    #[error("request type mismatch: want {expected}, got {got}")]
    RequestTypeMismatch { expected: Shape, got: Shape },

    /// No use case is registered for the request's shape.
    #[error("use case runner not registered for the given request type: {0}")]
    HandlerNotFound(Shape),

    /// A use case is already registered for the request's shape.
    #[error("use case runner already registered for request type: {0}")]
    AlreadyRegistered(Shape),

    /// An argument slot could not be filled for the use case.
    #[error("argument {position} of type `{param}` could not be supplied")]
    ArgumentUnavailable {
        /// One-based parameter position.
        position: usize,
        /// Declared type of the parameter.
        param: &'static str,
    },

    /// The use case itself failed.
    #[error(transparent)]
    Handler(BoxError),
}

impl UseCaseError {
    /// Wraps an error returned by a use case.
    ///
    /// A `UseCaseError` is passed through as-is instead of being nested.
    pub fn handler<E: Into<BoxError>>(err: E) -> Self {
        let err: BoxError = err.into();
        match err.downcast::<UseCaseError>() {
            Ok(err) => *err,
            Err(err) => Self::Handler(err),
        }
    }

    /// Returns `true` if this is a use case error of type `E`.
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }

    /// Returns the use case error as `E`, if it is one.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Handler(err) => err.downcast_ref(),
            _ => None,
        }
    }

    /// Unwraps the error returned by the use case.
    pub fn into_inner(self) -> Option<BoxError> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }
}

/// Why a [`Context`](crate::Context) is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The context was cancelled explicitly or through a parent.
    #[error("context canceled")]
    Cancelled,

    /// The context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Result type for adaptation.
pub type AdaptResult<T> = Result<T, AdaptError>;

/// Result type for use case invocation.
pub type UseCaseResult<T = ()> = Result<T, UseCaseError>;
