//! Parameter classification for handler signatures.
//!
//! Every type that can appear as a handler parameter implements [`Param`],
//! which reports what the parameter *is* (a context, a request, a response or
//! something else) and knows how to pull its argument out of [`Arguments`].
//!
//! Reference parameters are described with a `'static` placeholder lifetime
//! (`&'static R`) and produced with the real call lifetime through
//! [`Param::This`].

use crate::context::Context;
use crate::message::{BoxedRequest, Request, Response};
use crate::shape::Shape;

/// How a parameter holds its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Taken by value.
    Owned,
    /// Borrowed as `&T`.
    Shared,
    /// Borrowed as `&mut T`.
    Exclusive,
}

/// What a parameter is, as far as the three-argument contract is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `&dyn Context`.
    Context,
    /// A request type, however it is held.
    Request { shape: Shape, access: Access },
    /// A response type, however it is held.
    Response { shape: Shape, access: Access },
    /// Anything else.
    Other,
}

/// A classified handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    kind: ParamKind,
    type_name: &'static str,
}

impl ParamInfo {
    /// Describes the parameter type `P` as `kind`.
    pub fn new<P: ?Sized>(kind: ParamKind) -> Self {
        Self {
            kind,
            type_name: std::any::type_name::<P>(),
        }
    }

    /// Describes a parameter type that is not classified at all.
    pub fn opaque<P: ?Sized>() -> Self {
        Self::new::<P>(ParamKind::Other)
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Declared type of the parameter, as written in the handler.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// ============================================================================
// Arguments: the live values of one call
// ============================================================================

/// The arguments of a single use case call.
///
/// Each slot can be claimed once; a second claim yields `None`.
pub struct Arguments<'a> {
    context: &'a dyn Context,
    request: Option<&'a mut Option<BoxedRequest>>,
    response: Option<&'a mut dyn Response>,
}

impl<'a> Arguments<'a> {
    pub fn new(
        context: &'a dyn Context,
        request: &'a mut Option<BoxedRequest>,
        response: &'a mut dyn Response,
    ) -> Self {
        Self {
            context,
            request: Some(request),
            response: Some(response),
        }
    }

    pub fn context(&self) -> &'a dyn Context {
        self.context
    }

    /// Claims the request by value.
    pub fn take_request<R: Request>(&mut self) -> Option<R> {
        let slot = self.request.take()?;
        let request = slot.take()?;
        request.downcast::<R>().map(|request| *request)
    }

    /// Claims the request as a shared borrow.
    pub fn borrow_request<R: Request>(&mut self) -> Option<&'a R> {
        let slot: &'a Option<BoxedRequest> = self.request.take()?;
        slot.as_deref()?.downcast_ref::<R>()
    }

    /// Claims the response.
    pub fn take_response<S: Response>(&mut self) -> Option<&'a mut S> {
        self.response.take()?.downcast_mut::<S>()
    }
}

// ============================================================================
// Param
// ============================================================================

/// A type usable as a handler parameter.
///
/// Implemented for `&dyn Context`, for primitives, for `&R` of every request,
/// for `&mut S` of every response, and, through `#[derive(Request)]`, for
/// request types taken by value.
pub trait Param {
    /// The parameter type with the call's lifetime substituted.
    type This<'a>;

    /// Classifies the parameter.
    fn info() -> ParamInfo;

    /// Produces the argument for this parameter, or `None` if it cannot.
    fn take<'a>(args: &mut Arguments<'a>) -> Option<Self::This<'a>>;
}

impl Param for &'static dyn Context {
    type This<'a> = &'a dyn Context;

    fn info() -> ParamInfo {
        ParamInfo::new::<&dyn Context>(ParamKind::Context)
    }

    fn take<'a>(args: &mut Arguments<'a>) -> Option<Self::This<'a>> {
        Some(args.context())
    }
}

impl<R: Request> Param for &'static R {
    type This<'a> = &'a R;

    fn info() -> ParamInfo {
        ParamInfo::new::<Self>(ParamKind::Request {
            shape: Shape::of::<R>(),
            access: Access::Shared,
        })
    }

    fn take<'a>(args: &mut Arguments<'a>) -> Option<Self::This<'a>> {
        args.borrow_request::<R>()
    }
}

impl<S: Response> Param for &'static mut S {
    type This<'a> = &'a mut S;

    fn info() -> ParamInfo {
        ParamInfo::new::<Self>(ParamKind::Response {
            shape: Shape::of::<S>(),
            access: Access::Exclusive,
        })
    }

    fn take<'a>(args: &mut Arguments<'a>) -> Option<Self::This<'a>> {
        args.take_response::<S>()
    }
}

/// Implements [`Param`] for types that never satisfy a contract position.
macro_rules! impl_opaque_param {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Param for $ty {
                type This<'a> = $ty;

                fn info() -> ParamInfo {
                    ParamInfo::opaque::<$ty>()
                }

                fn take<'a>(_args: &mut Arguments<'a>) -> Option<Self::This<'a>> {
                    None
                }
            }
        )*
    };
}

impl_opaque_param!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
);
