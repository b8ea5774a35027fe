//! Unverified handlers and their runtime signatures.
//!
//! A [`Candidate`] is what the adapter inspects: the handler's [`Signature`]
//! together with a way to call it. Closures and fn items of any arity up to
//! six become candidates through [`IntoCandidate`]; only three-parameter
//! handlers whose parameters all implement [`Param`] can actually be invoked,
//! every other shape is merely described so the adapter can reject it.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::adapter::param::{Arguments, Param, ParamInfo};
use crate::adapter::signature::Signature;
use crate::error::UseCaseError;

/// Calls a handler with the arguments of one invocation.
pub(crate) type Invoker = Arc<dyn Fn(&mut Arguments<'_>) -> Result<(), UseCaseError> + Send + Sync>;

/// A handler that has not been validated yet.
#[derive(Clone)]
pub struct Candidate {
    signature: Signature,
    invoker: Option<Invoker>,
}

impl Candidate {
    /// Describes `handler`.
    pub fn new<M, F: IntoCandidate<M>>(handler: F) -> Self {
        handler.into_candidate()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn invoker(&self) -> Option<&Invoker> {
        self.invoker.as_ref()
    }

    fn described(signature: Signature) -> Self {
        Self {
            signature,
            invoker: None,
        }
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("signature", &self.signature)
            .field("invocable", &self.invoker.is_some())
            .finish()
    }
}

// ============================================================================
// Outcome - what a handler returns
// ============================================================================

/// Return types a handler may declare.
pub trait Outcome {
    fn into_result(self) -> Result<(), UseCaseError>;
}

impl<E> Outcome for Result<(), E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_result(self) -> Result<(), UseCaseError> {
        self.map_err(UseCaseError::handler)
    }
}

// ============================================================================
// IntoCandidate
// ============================================================================

/// Conversion of a closure or fn item into a [`Candidate`].
///
/// `M` is a marker of the form `fn(P1, .., Pn) -> O` that keeps the impls for
/// different arities apart.
pub trait IntoCandidate<M>: Send + Sync + 'static {
    fn into_candidate(self) -> Candidate;
}

impl<F, O, P1, P2, P3> IntoCandidate<fn(P1, P2, P3) -> O> for F
where
    F: Fn(P1, P2, P3) -> O + Send + Sync + 'static,
    F: for<'a> Fn(P1::This<'a>, P2::This<'a>, P3::This<'a>) -> O,
    P1: Param,
    P2: Param,
    P3: Param,
    O: Outcome,
{
    fn into_candidate(self) -> Candidate {
        let signature = Signature::new(type_name::<F>(), vec![P1::info(), P2::info(), P3::info()]);
        let invoker: Invoker = Arc::new(move |args: &mut Arguments<'_>| {
            let p1 = P1::take(args).ok_or_else(unavailable::<P1>(1))?;
            let p2 = P2::take(args).ok_or_else(unavailable::<P2>(2))?;
            let p3 = P3::take(args).ok_or_else(unavailable::<P3>(3))?;
            (self)(p1, p2, p3).into_result()
        });

        Candidate {
            signature,
            invoker: Some(invoker),
        }
    }
}

fn unavailable<P: Param>(position: usize) -> impl FnOnce() -> UseCaseError {
    move || UseCaseError::ArgumentUnavailable {
        position,
        param: P::info().type_name(),
    }
}

/// Implements [`IntoCandidate`] for an arity the contract never accepts.
///
/// The parameters are only named, so the adapter can report the arity.
macro_rules! impl_described {
    ($($ty:ident),*) => {
        impl<F, O, $($ty,)*> IntoCandidate<fn($($ty),*) -> O> for F
        where
            F: Fn($($ty),*) -> O + Send + Sync + 'static,
        {
            fn into_candidate(self) -> Candidate {
                Candidate::described(Signature::new(
                    type_name::<F>(),
                    vec![$(ParamInfo::opaque::<$ty>()),*],
                ))
            }
        }
    };
}

impl_described!();
impl_described!(T1);
impl_described!(T1, T2);
impl_described!(T1, T2, T3, T4);
impl_described!(T1, T2, T3, T4, T5);
impl_described!(T1, T2, T3, T4, T5, T6);
