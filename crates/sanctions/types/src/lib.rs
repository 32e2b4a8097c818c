//! Sanctions Types - shared vocabulary of the sanctions registry.
//!
//! Everything here is pure data: principals, heights, the sanction record,
//! derived views, and the unified error taxonomy. The authority and ledger
//! crates build their rules on top of these types.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque unique identifier of an account.
///
/// Principals are supplied by the platform after authentication; the registry
/// never mints or derives them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External monotonic block counter, advanced by the platform between
/// operations. The registry only ever reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    /// The height `blocks` ticks later. Saturates at the counter maximum.
    pub const fn advance(self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }
}

impl std::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A time-bounded restriction record held against a target principal.
///
/// Existence alone does not mean "currently sanctioned": activity is the
/// computed projection [`SanctionRecord::is_active`], never stored state, so
/// it cannot go stale independent of height advancement. Expired records
/// remain queryable until explicitly removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionRecord {
    /// Cause for the sanction. Non-empty, bounded at ledger construction.
    pub reason: String,
    /// Height at and beyond which the record is inactive.
    pub expires_at: BlockHeight,
    /// Authority that created the record. Immutable across updates.
    pub issued_by: PrincipalId,
    /// Height of first creation. Immutable across updates.
    pub created_at: BlockHeight,
}

impl SanctionRecord {
    /// Whether the sanction is in force at `now`.
    pub fn is_active(&self, now: BlockHeight) -> bool {
        now < self.expires_at
    }
}

/// Composite answer for callers that need both the activity predicate and the
/// stored record in one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanctionStatus {
    pub sanctioned: bool,
    pub details: Option<SanctionRecord>,
}

/// Registry-wide counters, derived from the two stores at query time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// All stored sanction records, expired included.
    pub total_sanctions: usize,
    /// All active authorities, owner included.
    pub total_authorities: usize,
    pub current_height: BlockHeight,
    pub owner: PrincipalId,
}

/// Unified error taxonomy of the registry.
///
/// Every failure is returned as a value - unauthorized callers are a routine
/// branch, not an exception. A failed operation makes zero state changes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("caller {0} is not an active authority")]
    NotAuthorized(PrincipalId),

    #[error("a sanction record already exists for {0}")]
    AlreadySanctioned(PrincipalId),

    #[error("no sanction record exists for {0}")]
    NotSanctioned(PrincipalId),

    #[error("expiration height {expires_at} is not beyond current height {now}")]
    InvalidExpiration {
        expires_at: BlockHeight,
        now: BlockHeight,
    },

    #[error("{0} is already an active authority")]
    AlreadyAuthority(PrincipalId),

    #[error("{0} is not an active authority")]
    AuthorityNotFound(PrincipalId),

    #[error("the registry owner cannot be removed")]
    CannotRemoveOwner,

    #[error("sanction reason is empty or exceeds the configured bound")]
    InvalidReason,

    #[error("registry state lock poisoned")]
    Poisoned,
}

impl RegistryError {
    /// Stable numeric wire code, for callers that branch programmatically.
    /// `Poisoned` is an internal fault with no wire code.
    pub const fn code(&self) -> Option<u32> {
        match self {
            Self::NotAuthorized(_) => Some(100),
            Self::AlreadySanctioned(_) => Some(101),
            Self::NotSanctioned(_) => Some(102),
            Self::InvalidExpiration { .. } => Some(103),
            Self::AlreadyAuthority(_) => Some(104),
            Self::AuthorityNotFound(_) => Some(105),
            Self::CannotRemoveOwner => Some(106),
            Self::InvalidReason => Some(107),
            Self::Poisoned => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(expires_at: u64) -> SanctionRecord {
        SanctionRecord {
            reason: "market manipulation".into(),
            expires_at: BlockHeight::new(expires_at),
            issued_by: PrincipalId::new("authority-1"),
            created_at: BlockHeight::new(10),
        }
    }

    #[test]
    fn activity_is_strict_below_expiration() {
        let rec = record(15);
        assert!(rec.is_active(BlockHeight::new(14)));
        assert!(!rec.is_active(BlockHeight::new(15)));
        assert!(!rec.is_active(BlockHeight::new(20)));
    }

    #[test]
    fn height_ordering_and_advance() {
        let h = BlockHeight::new(10);
        assert!(h < h.advance(1));
        assert_eq!(h.advance(5), BlockHeight::new(15));
        assert_eq!(BlockHeight::new(u64::MAX).advance(1), BlockHeight::new(u64::MAX));
    }

    #[test]
    fn wire_codes_are_stable() {
        let caller = PrincipalId::new("w1");
        assert_eq!(RegistryError::NotAuthorized(caller.clone()).code(), Some(100));
        assert_eq!(RegistryError::AlreadySanctioned(caller.clone()).code(), Some(101));
        assert_eq!(RegistryError::NotSanctioned(caller.clone()).code(), Some(102));
        assert_eq!(
            RegistryError::InvalidExpiration {
                expires_at: BlockHeight::new(1),
                now: BlockHeight::new(2),
            }
            .code(),
            Some(103)
        );
        assert_eq!(RegistryError::AlreadyAuthority(caller.clone()).code(), Some(104));
        assert_eq!(RegistryError::AuthorityNotFound(caller).code(), Some(105));
        assert_eq!(RegistryError::CannotRemoveOwner.code(), Some(106));
        assert_eq!(RegistryError::InvalidReason.code(), Some(107));
        assert_eq!(RegistryError::Poisoned.code(), None);
    }
}
