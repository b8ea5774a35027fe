//! Request and response capabilities.
//!
//! Both are marker traits: any aggregate type can opt in, usually through
//! `#[derive(Request)]` / `#[derive(Response)]`, and a type may carry both.
//! `&R` and `&mut S` parameters work for every implementor; taking a request
//! by value needs the [`Param`](crate::Param) impl `#[derive(Request)]`
//! generates. Type-erased values are recovered through the inherent helpers
//! on `dyn Request` and `dyn Response`.

use std::any::Any;

use crate::shape::Shape;

// ============================================================================
// AsAny: downcasting support shared by both capabilities
// ============================================================================

/// Object-safe access to the concrete type behind a capability object.
///
/// Implemented for every `'static` type. Call it through the helpers on
/// `dyn Request` / `dyn Response` rather than directly: on a `&mut dyn
/// Response` receiver method resolution would otherwise pick the reference
/// type itself.
#[doc(hidden)]
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn shape_of(&self) -> Shape;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn shape_of(&self) -> Shape {
        Shape::of::<T>()
    }
}

// ============================================================================
// Request
// ============================================================================

/// Input of a use case.
///
/// The declared type of a request is its dispatch key: every value of the
/// same type routes to the same use case.
///
/// ```rust,ignore
/// #[derive(Request)]
/// struct CreateUser {
///     name: String,
/// }
/// ```
pub trait Request: AsAny + Send + Sync {}

/// A type-erased, owned request.
pub type BoxedRequest = Box<dyn Request>;

impl dyn Request {
    /// Returns the shape of the concrete request type.
    pub fn shape(&self) -> Shape {
        AsAny::shape_of(self)
    }

    /// Returns `true` if the concrete type is `R`.
    pub fn is<R: Request>(&self) -> bool {
        AsAny::as_any(self).is::<R>()
    }

    pub fn downcast_ref<R: Request>(&self) -> Option<&R> {
        AsAny::as_any(self).downcast_ref()
    }

    /// Recovers the owned concrete request.
    pub fn downcast<R: Request>(self: Box<Self>) -> Option<Box<R>> {
        AsAny::into_any(self).downcast().ok()
    }
}

impl std::fmt::Debug for dyn Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Request").field(&self.shape()).finish()
    }
}

// ============================================================================
// Response
// ============================================================================

/// Output sink of a use case.
///
/// Use cases always receive their response as `&mut`, so the caller observes
/// the mutation once the call returns.
pub trait Response: AsAny + Send {}

impl dyn Response {
    /// Returns the shape of the concrete response type.
    pub fn shape(&self) -> Shape {
        AsAny::shape_of(self)
    }

    /// Returns `true` if the concrete type is `S`.
    pub fn is<S: Response>(&self) -> bool {
        AsAny::as_any(self).is::<S>()
    }

    pub fn downcast_ref<S: Response>(&self) -> Option<&S> {
        AsAny::as_any(self).downcast_ref()
    }

    pub fn downcast_mut<S: Response>(&mut self) -> Option<&mut S> {
        AsAny::as_any_mut(self).downcast_mut()
    }
}

impl std::fmt::Debug for dyn Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Response").field(&self.shape()).finish()
    }
}
