//! Execution context threaded through every use case.
//!
//! A [`Context`] carries a cancellation signal, an optional deadline and a
//! set of typed values. The dispatch layer never inspects it; it is handed to
//! the use case untouched.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::ContextError;

/// Cancellation, deadline and value lookup for a single call.
pub trait Context: Send + Sync {
    /// Returns `true` once the context has been cancelled.
    fn is_cancelled(&self) -> bool;

    /// The instant after which work should be abandoned, if any.
    fn deadline(&self) -> Option<Instant>;

    /// Looks up a value by its type.
    fn lookup(&self, key: TypeId) -> Option<&(dyn Any + Send + Sync)>;

    /// Returns why the context is done, or `None` while it is still live.
    fn err(&self) -> Option<ContextError> {
        if self.is_cancelled() {
            Some(ContextError::Cancelled)
        } else if self.deadline().is_some_and(|d| Instant::now() >= d) {
            Some(ContextError::DeadlineExceeded)
        } else {
            None
        }
    }

    fn is_done(&self) -> bool {
        self.err().is_some()
    }
}

impl dyn Context + '_ {
    /// Returns the value of type `T` carried by this context.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.lookup(TypeId::of::<T>())?.downcast_ref()
    }
}

// ============================================================================
// RunContext
// ============================================================================

/// The provided [`Context`] implementation.
///
/// Cheap to clone. Derived contexts (`child`, `with_*`) are cancelled along
/// with their parent, can only tighten the deadline, and inherit every value.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = RunContext::background()
///     .with_timeout(Duration::from_secs(5))
///     .with_value(RequestId(42));
///
/// dispatcher.dispatch(&ctx, request, &mut response)?;
/// ```
#[derive(Clone)]
pub struct RunContext {
    inner: Arc<Inner>,
}

struct Inner {
    token: CancellationToken,
    deadline: Option<Instant>,
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl RunContext {
    /// An empty root context: never cancelled unless asked, no deadline.
    pub fn background() -> Self {
        Self {
            inner: Arc::new(Inner {
                token: CancellationToken::new(),
                deadline: None,
                values: HashMap::new(),
            }),
        }
    }

    /// A child that can be cancelled independently of this context.
    pub fn child(&self) -> Self {
        self.derive(self.inner.deadline, self.inner.values.clone())
    }

    /// A child whose deadline is the earlier of `deadline` and this context's.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.inner.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        };
        self.derive(Some(deadline), self.inner.values.clone())
    }

    /// A child that expires after `timeout`.
    ///
    /// A timeout too large to represent leaves the deadline unchanged.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Instant::now()
            .checked_add(timeout)
            .map_or_else(|| self.child(), |deadline| self.with_deadline(deadline))
    }

    /// A child carrying `value`, replacing any inherited value of the same type.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values = self.inner.values.clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        self.derive(self.inner.deadline, values)
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.inner.token.cancel();
    }

    /// The underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.inner.token
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) {
        let cancelled = self.inner.token.cancelled();
        match self.inner.deadline {
            Some(deadline) => {
                let _ = tokio::time::timeout_at(deadline.into(), cancelled).await;
            }
            None => cancelled.await,
        }
    }

    fn derive(
        &self,
        deadline: Option<Instant>,
        values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                token: self.inner.token.child_token(),
                deadline,
                values,
            }),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::background()
    }
}

impl Context for RunContext {
    fn is_cancelled(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    fn lookup(&self, key: TypeId) -> Option<&(dyn Any + Send + Sync)> {
        self.inner.values.get(&key).map(|value| value.as_ref())
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("cancelled", &self.is_cancelled())
            .field("deadline", &self.inner.deadline)
            .field("value_count", &self.inner.values.len())
            .finish_non_exhaustive()
    }
}
