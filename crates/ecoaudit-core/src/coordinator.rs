//! The Trust coordinator: sole writer of the daylight state.

use std::collections::BTreeSet;

use ecoaudit_canonical::Address;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::daylight::{adjust_daylight_saving, DaylightObserver, DaylightState};
use crate::errors::CoreError;
use crate::identity::ComponentIdentity;
use crate::record::{AuditLogRecord, AuditSink};
use crate::registry::ComponentRegistry;

/// Decides which callers may run a transition.
pub trait AccessPolicy {
    /// True if `caller` may invoke the coordinator.
    fn is_authorized(&self, caller: &Address) -> bool;
}

/// Explicit set of authorized caller addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    callers: BTreeSet<Address>,
}

impl AllowList {
    /// Allows exactly `callers`.
    pub fn new<I: IntoIterator<Item = Address>>(callers: I) -> Self {
        Self {
            callers: callers.into_iter().collect(),
        }
    }

    /// Allows only the Trust component's registered address.
    pub fn trust_only(registry: &ComponentRegistry) -> Self {
        Self::new([registry.address(ComponentIdentity::Trust).clone()])
    }
}

impl AccessPolicy for AllowList {
    fn is_authorized(&self, caller: &Address) -> bool {
        self.callers.contains(caller)
    }
}

/// Source of execution timestamps (unix seconds).
pub trait Clock {
    /// Current time.
    fn now(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

struct Inner<S> {
    state: DaylightState,
    sink: S,
}

/// Owns the daylight state and serializes every transition.
///
/// Reading the current state, computing the target, appending the audit
/// record and committing the new state happen under one lock. If the append
/// fails the state is left untouched.
pub struct Coordinator<S, A = AllowList, C = SystemClock> {
    inner: Mutex<Inner<S>>,
    access: A,
    clock: C,
}

impl<S, A, C> Coordinator<S, A, C>
where
    S: AuditSink,
    A: AccessPolicy,
    C: Clock,
{
    /// Creates a coordinator starting from `initial`.
    pub fn new(initial: DaylightState, sink: S, access: A, clock: C) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: initial,
                sink,
            }),
            access,
            clock,
        }
    }

    /// Flips the season on behalf of `caller` and returns the logged record.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnauthorizedTransition`] if `caller` is not allowed
    /// - [`CoreError::LogAppend`] if the sink rejects the record
    ///
    /// In both cases the state is unchanged and no record is logged.
    pub fn adjust_daylight_saving(&self, caller: &Address) -> Result<AuditLogRecord, CoreError> {
        if !self.access.is_authorized(caller) {
            warn!(%caller, "rejected daylight-saving transition");
            return Err(CoreError::UnauthorizedTransition {
                caller: caller.clone(),
            });
        }

        let mut inner = self.inner.lock();
        let (next, record) = adjust_daylight_saving(inner.state, self.clock.now());
        inner.sink.append(&record)?;
        inner.state = next;

        info!(
            subject = %record.subject,
            timestamp = record.timestamp,
            season = %next.season(),
            "daylight-saving transition applied"
        );
        Ok(record)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DaylightState {
        self.inner.lock().state
    }

    /// Consumes the coordinator, returning the final state and the sink.
    pub fn into_parts(self) -> (DaylightState, S) {
        let inner = self.inner.into_inner();
        (inner.state, inner.sink)
    }
}

impl<S, A, C> DaylightObserver for Coordinator<S, A, C>
where
    S: AuditSink,
    A: AccessPolicy,
    C: Clock,
{
    fn is_winter_time(&self) -> bool {
        self.state().is_winter_time
    }

    fn daylight_saving_scheduled(&self) -> bool {
        self.state().scheduled
    }
}
