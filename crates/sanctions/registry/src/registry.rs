use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use sanctions_authority::AuthorityRoster;
use sanctions_ledger::{SanctionLedger, DEFAULT_REASON_LIMIT};
use sanctions_types::{
    BlockHeight, PrincipalId, RegistryError, RegistryStats, SanctionRecord, SanctionStatus,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::height::HeightProvider;

/// Construction-time configuration. The owner is fixed for the registry's
/// lifetime and never reassignable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub owner: PrincipalId,
    /// Upper bound on sanction reason length, in characters.
    #[serde(default = "default_reason_limit")]
    pub reason_limit: usize,
}

impl RegistryConfig {
    pub fn new(owner: PrincipalId) -> Self {
        Self {
            owner,
            reason_limit: DEFAULT_REASON_LIMIT,
        }
    }
}

fn default_reason_limit() -> usize {
    DEFAULT_REASON_LIMIT
}

/// Both stores under the one lock that makes each operation atomic.
struct RegistryState {
    authorities: AuthorityRoster,
    sanctions: SanctionLedger,
}

impl RegistryState {
    fn authorize(&self, caller: &PrincipalId) -> Result<(), RegistryError> {
        if self.authorities.is_active(caller) {
            Ok(())
        } else {
            Err(RegistryError::NotAuthorized(caller.clone()))
        }
    }
}

/// The sanctions registry surface.
///
/// Every mutating operation authorizes the caller against the roster before
/// touching the ledger; both live behind a single `RwLock` so a check and its
/// mutation cannot interleave with another operation (two concurrent
/// `add_sanction` calls for one target cannot both succeed). Reads are
/// snapshot-consistent against the single height sample they use.
pub struct SanctionsRegistry {
    heights: Arc<dyn HeightProvider>,
    inner: RwLock<RegistryState>,
}

impl SanctionsRegistry {
    pub fn new(config: RegistryConfig, heights: Arc<dyn HeightProvider>) -> Self {
        info!(owner = %config.owner, "sanctions registry initialized");
        Self {
            heights,
            inner: RwLock::new(RegistryState {
                authorities: AuthorityRoster::new(config.owner),
                sanctions: SanctionLedger::with_reason_limit(config.reason_limit),
            }),
        }
    }

    // ── authority operations ────────────────────────────────────────────

    /// Add `target` to the authority roster. Caller must be active.
    pub fn add_authority(
        &self,
        caller: &PrincipalId,
        target: PrincipalId,
    ) -> Result<(), RegistryError> {
        let mut state = self.write_state()?;
        state.authorities.add(caller, target)
    }

    /// Remove `target` from the roster. The owner can never be removed.
    pub fn remove_authority(
        &self,
        caller: &PrincipalId,
        target: &PrincipalId,
    ) -> Result<(), RegistryError> {
        let mut state = self.write_state()?;
        state.authorities.remove(caller, target)
    }

    /// Pure membership test. Never fails.
    pub fn is_active_authority(&self, principal: &PrincipalId) -> bool {
        self.read_state().authorities.is_active(principal)
    }

    // ── sanction operations ─────────────────────────────────────────────

    /// Create a sanction record for `target`, issued by `caller`.
    pub fn add_sanction(
        &self,
        caller: &PrincipalId,
        target: PrincipalId,
        reason: impl Into<String>,
        expires_at: BlockHeight,
    ) -> Result<(), RegistryError> {
        let now = self.heights.current_height();
        let mut state = self.write_state()?;
        state.authorize(caller)?;
        state.sanctions.insert(caller, target, reason, expires_at, now)
    }

    /// Replace the reason and expiration of `target`'s record.
    ///
    /// Any active authority may update, not only the original issuer;
    /// provenance (`issued_by`, `created_at`) is preserved.
    pub fn update_sanction(
        &self,
        caller: &PrincipalId,
        target: &PrincipalId,
        reason: impl Into<String>,
        expires_at: BlockHeight,
    ) -> Result<(), RegistryError> {
        let now = self.heights.current_height();
        let mut state = self.write_state()?;
        state.authorize(caller)?;
        state.sanctions.amend(target, reason, expires_at, now)
    }

    /// Delete `target`'s record. Only the issuing authority or the owner may
    /// remove; other authorities are rejected.
    pub fn remove_sanction(
        &self,
        caller: &PrincipalId,
        target: &PrincipalId,
    ) -> Result<(), RegistryError> {
        let mut state = self.write_state()?;
        state.authorize(caller)?;
        let owner = state.authorities.owner().clone();
        state.sanctions.revoke(caller, target, &owner)
    }

    /// Whether `target` is sanctioned at the current height. Never fails.
    pub fn is_sanctioned(&self, target: &PrincipalId) -> bool {
        let now = self.heights.current_height();
        self.read_state().sanctions.is_sanctioned(target, now)
    }

    /// The stored record regardless of expiry, or `None`. Never fails.
    pub fn sanction_details(&self, target: &PrincipalId) -> Option<SanctionRecord> {
        self.read_state().sanctions.details(target).cloned()
    }

    /// Predicate and record in one call. Never fails.
    pub fn sanction_status(&self, target: &PrincipalId) -> SanctionStatus {
        let now = self.heights.current_height();
        self.read_state().sanctions.status(target, now)
    }

    /// Elementwise `is_sanctioned` over `targets` against one height sample,
    /// order and length preserved. Never fails.
    pub fn batch_check(&self, targets: &[PrincipalId]) -> Vec<bool> {
        let now = self.heights.current_height();
        self.read_state().sanctions.check_many(targets, now)
    }

    /// Registry-wide counters, derived at query time. Never fails.
    pub fn stats(&self) -> RegistryStats {
        let now = self.heights.current_height();
        let state = self.read_state();
        RegistryStats {
            total_sanctions: state.sanctions.count(),
            total_authorities: state.authorities.count(),
            current_height: now,
            owner: state.authorities.owner().clone(),
        }
    }

    // ── locking ─────────────────────────────────────────────────────────

    /// Read access recovers a poisoned guard: mutations are validate-then-
    /// apply, so the state a panicked writer left behind is never partial.
    fn read_state(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, RegistryState>, RegistryError> {
        self.inner.write().map_err(|_| RegistryError::Poisoned)
    }
}
