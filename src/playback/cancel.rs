use std::time::Duration;

/// Issues [`CancelToken`]s and invalidates all outstanding ones at once.
///
/// Every scheduled continuation (a stroke finishing, a pause between characters) carries a token
/// from its owner's scope. Cancelling the scope makes those continuations stale: when their time
/// comes they are dropped without applying any effect.
#[derive(Clone, Debug, Default)]
pub struct CancelScope {
    generation: u64,
}

/// Snapshot of a [`CancelScope`] generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelToken {
    generation: u64,
}

impl CancelScope {
    /// Fresh scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that stays live until the next [`Self::cancel`].
    pub fn token(&self) -> CancelToken {
        CancelToken {
            generation: self.generation,
        }
    }

    /// Invalidate every token issued so far.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `token` was issued since the last cancellation.
    pub fn is_live(&self, token: CancelToken) -> bool {
        token.generation == self.generation
    }
}

/// A point in host time at which a continuation should run, guarded by a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deadline {
    /// Host timestamp of the continuation.
    pub at: Duration,
    /// Token checked before the continuation applies anything.
    pub token: CancelToken,
}

impl Deadline {
    /// Deadline at `at` guarded by a fresh token from `scope`.
    pub fn new(at: Duration, scope: &CancelScope) -> Self {
        Self {
            at,
            token: scope.token(),
        }
    }

    /// Whether host time `now` has reached the deadline.
    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.at
    }
}
