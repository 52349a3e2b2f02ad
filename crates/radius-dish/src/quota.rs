//! Download gating.
//!
//! The engine does not count downloads itself. Callers hand in a
//! [`QuotaGate`] and every download action consumes one use from it: a
//! single tile or a whole grid counts the same.

/// Grants or refuses one download action.
pub trait QuotaGate {
    /// Consume one use if any remain. Returns `false` when refused.
    fn check_and_consume(&mut self) -> bool;
}

/// Gate that never refuses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl QuotaGate for Unlimited {
    fn check_and_consume(&mut self) -> bool {
        true
    }
}

/// Free uses before a subscription is required.
pub const DEFAULT_FREE_USES: u32 = 3;

/// In-memory counter of free uses, optionally lifted by a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeUses {
    limit: u32,
    used: u32,
    subscribed: bool,
}

impl FreeUses {
    /// Gate allowing `limit` downloads.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            used: 0,
            subscribed: false,
        }
    }

    /// Resume from a persisted use count.
    pub fn with_used(limit: u32, used: u32) -> Self {
        Self {
            limit,
            used,
            subscribed: false,
        }
    }

    /// Lift the limit.
    pub fn subscribe(&mut self) {
        self.subscribed = true;
    }

    /// True once [`subscribe`](Self::subscribe) was called.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Downloads consumed so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Free downloads left.
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }
}

impl Default for FreeUses {
    fn default() -> Self {
        Self::new(DEFAULT_FREE_USES)
    }
}

impl QuotaGate for FreeUses {
    fn check_and_consume(&mut self) -> bool {
        if self.subscribed {
            return true;
        }
        if self.used >= self.limit {
            return false;
        }
        self.used += 1;
        true
    }
}
