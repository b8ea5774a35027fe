//! Use case dispatcher.
//!
//! This module provides the [`Dispatcher`], which maps request shapes to
//! use cases and routes every dispatched request to the use case registered
//! for its declared type.
//!
//! ```rust,ignore
//! use interactor_core::{Dispatcher, RunContext, must_adapt_fn};
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.register(&CreateUser::default(), must_adapt_fn(create_user));
//! dispatcher.register(&DeleteUser::default(), must_adapt(DeleteUserInteractor::new(db)));
//!
//! let mut created = UserCreated::default();
//! dispatcher.dispatch(&RunContext::background(), CreateUser { name }, &mut created)?;
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use parking_lot::RwLock;
use tracing::{Level, debug, span, trace, warn};

use crate::context::Context;
use crate::error::UseCaseError;
use crate::message::{BoxedRequest, Request, Response};
use crate::runner::{UseCaseFn, UseCaseRunner};
use crate::shape::Shape;

/// What [`Dispatcher::register`] does when the shape is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The new use case replaces the old one.
    #[default]
    Replace,
    /// The first use case stays; the new one is dropped with a warning.
    Reject,
}

/// The registry routing requests to use cases.
///
/// # Thread Safety
///
/// `Dispatcher` is `Send + Sync` and is usually shared as an
/// `Arc<Dispatcher>`. Registration may race with dispatch; the lock is only
/// held for the map access, never while a use case runs, so use cases may
/// dispatch again.
#[derive(Default)]
pub struct Dispatcher {
    runners: RwLock<HashMap<Shape, UseCaseFn>>,
    policy: DuplicatePolicy,
}

impl Dispatcher {
    /// Creates a new, empty dispatcher that replaces on re-registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty dispatcher with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            runners: RwLock::default(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Registers `runner` for the declared type of `sample`.
    ///
    /// The sample's field values are irrelevant; only its type is used.
    pub fn register<R: Request>(&self, _sample: &R, runner: UseCaseFn) {
        self.register_shape(Shape::of::<R>(), runner);
    }

    /// Registers `runner` for requests of type `R`.
    pub fn register_for<R: Request>(&self, runner: UseCaseFn) {
        self.register_shape(Shape::of::<R>(), runner);
    }

    /// Registers `runner` for `shape`, applying the duplicate policy.
    pub fn register_shape(&self, shape: Shape, runner: UseCaseFn) {
        let mut runners = self.runners.write();
        match runners.entry(shape) {
            Entry::Vacant(entry) => {
                debug!(request = %shape, use_case = runner.name(), "Registered use case runner");
                entry.insert(runner);
            }
            Entry::Occupied(mut entry) => match self.policy {
                DuplicatePolicy::Replace => {
                    debug!(
                        request = %shape,
                        use_case = runner.name(),
                        replaced = entry.get().name(),
                        "Replaced use case runner"
                    );
                    entry.insert(runner);
                }
                DuplicatePolicy::Reject => {
                    warn!(
                        request = %shape,
                        use_case = runner.name(),
                        kept = entry.get().name(),
                        "Use case runner already registered, ignoring"
                    );
                }
            },
        }
    }

    /// Registers `runner` for the declared type of `sample`, refusing to
    /// replace an existing registration regardless of policy.
    pub fn try_register<R: Request>(&self, _sample: &R, runner: UseCaseFn) -> Result<(), UseCaseError> {
        let shape = Shape::of::<R>();
        match self.runners.write().entry(shape) {
            Entry::Vacant(entry) => {
                debug!(request = %shape, use_case = runner.name(), "Registered use case runner");
                entry.insert(runner);
                Ok(())
            }
            Entry::Occupied(_) => Err(UseCaseError::AlreadyRegistered(shape)),
        }
    }

    /// Runs the use case registered for the declared type of `req`.
    pub fn dispatch<R: Request>(
        &self,
        ctx: &dyn Context,
        req: R,
        resp: &mut dyn Response,
    ) -> Result<(), UseCaseError> {
        self.run(ctx, Box::new(req), resp)
    }

    /// Returns `true` if a use case is registered for `R`.
    pub fn contains<R: Request>(&self) -> bool {
        self.runners.read().contains_key(&Shape::of::<R>())
    }

    /// Returns the number of registered use cases.
    pub fn len(&self) -> usize {
        self.runners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.read().is_empty()
    }
}

impl UseCaseRunner for Dispatcher {
    fn run(
        &self,
        ctx: &dyn Context,
        req: BoxedRequest,
        resp: &mut dyn Response,
    ) -> Result<(), UseCaseError> {
        let shape = req.shape();
        let span = span!(Level::DEBUG, "dispatch", request = %shape);
        let _enter = span.enter();

        let runner = self.runners.read().get(&shape).cloned();
        let Some(runner) = runner else {
            trace!("No use case runner registered");
            return Err(UseCaseError::HandlerNotFound(shape));
        };

        runner.run(ctx, req, resp)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("runner_count", &self.len())
            .field("policy", &self.policy)
            .finish()
    }
}
