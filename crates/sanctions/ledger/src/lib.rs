//! Sanctions Ledger - sanction records keyed by target principal, with
//! height-based expiry.
//!
//! The ledger enforces record-level rules only: existence, reason and
//! expiration validation, and issuer/owner removal rights. Whether the caller
//! is an authority at all is decided upstream, so this crate never sees the
//! roster. "Sanctioned" is always a computed projection of the stored record
//! against the height passed in, never persisted state.

#![deny(unsafe_code)]

use std::collections::HashMap;

use sanctions_types::{BlockHeight, PrincipalId, RegistryError, SanctionRecord, SanctionStatus};
use tracing::{info, warn};

/// Default bound on sanction reason length, in characters.
pub const DEFAULT_REASON_LIMIT: usize = 256;

/// In-memory sanction store. At most one record per target.
pub struct SanctionLedger {
    records: HashMap<PrincipalId, SanctionRecord>,
    reason_limit: usize,
}

impl SanctionLedger {
    pub fn new() -> Self {
        Self::with_reason_limit(DEFAULT_REASON_LIMIT)
    }

    /// Create a ledger with an explicit reason length bound.
    pub fn with_reason_limit(reason_limit: usize) -> Self {
        Self {
            records: HashMap::new(),
            reason_limit,
        }
    }

    /// Number of stored records, expired included.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Create a record for `target`.
    ///
    /// Existence, not activity, blocks re-creation: an expired record must be
    /// removed before the target can be sanctioned again.
    pub fn insert(
        &mut self,
        issuer: &PrincipalId,
        target: PrincipalId,
        reason: impl Into<String>,
        expires_at: BlockHeight,
        now: BlockHeight,
    ) -> Result<(), RegistryError> {
        if self.records.contains_key(&target) {
            return Err(RegistryError::AlreadySanctioned(target));
        }
        let reason = validate_reason(reason.into(), self.reason_limit)?;
        validate_expiration(expires_at, now)?;

        info!(target = %target, issued_by = %issuer, expires_at = %expires_at, "sanction added");
        self.records.insert(
            target,
            SanctionRecord {
                reason,
                expires_at,
                issued_by: issuer.clone(),
                created_at: now,
            },
        );
        Ok(())
    }

    /// Replace the reason and expiration of an existing record.
    ///
    /// `created_at` and `issued_by` are preserved; validation matches
    /// [`SanctionLedger::insert`].
    pub fn amend(
        &mut self,
        target: &PrincipalId,
        reason: impl Into<String>,
        expires_at: BlockHeight,
        now: BlockHeight,
    ) -> Result<(), RegistryError> {
        let record = self
            .records
            .get_mut(target)
            .ok_or_else(|| RegistryError::NotSanctioned(target.clone()))?;
        let reason = validate_reason(reason.into(), self.reason_limit)?;
        validate_expiration(expires_at, now)?;

        record.reason = reason;
        record.expires_at = expires_at;

        info!(target = %target, expires_at = %expires_at, "sanction updated");
        Ok(())
    }

    /// Delete the record for `target`.
    ///
    /// Only the record's issuing authority or the registry `owner` may
    /// revoke; any other caller is rejected even if it is an authority.
    pub fn revoke(
        &mut self,
        caller: &PrincipalId,
        target: &PrincipalId,
        owner: &PrincipalId,
    ) -> Result<(), RegistryError> {
        let record = self
            .records
            .get(target)
            .ok_or_else(|| RegistryError::NotSanctioned(target.clone()))?;

        if caller != &record.issued_by && caller != owner {
            return Err(RegistryError::NotAuthorized(caller.clone()));
        }

        self.records.remove(target);
        warn!(target = %target, removed_by = %caller, "sanction removed");
        Ok(())
    }

    /// Whether `target` is sanctioned at `now`. Never fails.
    pub fn is_sanctioned(&self, target: &PrincipalId, now: BlockHeight) -> bool {
        self.records
            .get(target)
            .map(|record| record.is_active(now))
            .unwrap_or(false)
    }

    /// The stored record verbatim, regardless of expiry, so expired but not
    /// yet removed sanctions stay auditable.
    pub fn details(&self, target: &PrincipalId) -> Option<&SanctionRecord> {
        self.records.get(target)
    }

    /// Predicate and record in one call.
    pub fn status(&self, target: &PrincipalId, now: BlockHeight) -> SanctionStatus {
        SanctionStatus {
            sanctioned: self.is_sanctioned(target, now),
            details: self.details(target).cloned(),
        }
    }

    /// Elementwise [`SanctionLedger::is_sanctioned`] over `targets`, order
    /// and length preserved. No deduplication.
    pub fn check_many(&self, targets: &[PrincipalId], now: BlockHeight) -> Vec<bool> {
        targets
            .iter()
            .map(|target| self.is_sanctioned(target, now))
            .collect()
    }
}

impl Default for SanctionLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_reason(reason: String, limit: usize) -> Result<String, RegistryError> {
    if reason.is_empty() || reason.chars().count() > limit {
        return Err(RegistryError::InvalidReason);
    }
    Ok(reason)
}

fn validate_expiration(expires_at: BlockHeight, now: BlockHeight) -> Result<(), RegistryError> {
    if expires_at <= now {
        return Err(RegistryError::InvalidExpiration { expires_at, now });
    }
    Ok(())
}
