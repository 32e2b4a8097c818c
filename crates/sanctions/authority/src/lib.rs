//! Sanctions Authority - the roster of principals permitted to mutate the
//! registry.
//!
//! Membership is the only fact: a principal is either in the roster (active)
//! or absent (inactive). The distinguished owner is seeded at construction
//! and can never be removed, by anyone, itself included.

#![deny(unsafe_code)]

use std::collections::HashSet;

use sanctions_types::{PrincipalId, RegistryError};
use tracing::{info, warn};

/// Flat authority set plus the permanent owner.
///
/// A flat set keeps authorization checks O(1); the owner invariant is a
/// single guard clause in [`AuthorityRoster::remove`].
pub struct AuthorityRoster {
    owner: PrincipalId,
    members: HashSet<PrincipalId>,
}

impl AuthorityRoster {
    /// Create a roster with `owner` as its first and permanent member.
    pub fn new(owner: PrincipalId) -> Self {
        let mut members = HashSet::new();
        members.insert(owner.clone());
        Self { owner, members }
    }

    /// The permanent owner principal.
    pub fn owner(&self) -> &PrincipalId {
        &self.owner
    }

    /// Pure membership test. Never fails.
    pub fn is_active(&self, principal: &PrincipalId) -> bool {
        self.members.contains(principal)
    }

    /// Number of active authorities, owner included. Never zero.
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Add `target` to the roster on behalf of `caller`.
    pub fn add(&mut self, caller: &PrincipalId, target: PrincipalId) -> Result<(), RegistryError> {
        if !self.is_active(caller) {
            return Err(RegistryError::NotAuthorized(caller.clone()));
        }
        if self.is_active(&target) {
            return Err(RegistryError::AlreadyAuthority(target));
        }

        info!(authority = %target, added_by = %caller, "authority added");
        self.members.insert(target);
        Ok(())
    }

    /// Remove `target` from the roster on behalf of `caller`.
    ///
    /// The owner guard applies before the membership check, so removing the
    /// owner reports `CannotRemoveOwner` even though the owner is active.
    /// Non-owner authorities may remove themselves.
    pub fn remove(
        &mut self,
        caller: &PrincipalId,
        target: &PrincipalId,
    ) -> Result<(), RegistryError> {
        if !self.is_active(caller) {
            return Err(RegistryError::NotAuthorized(caller.clone()));
        }
        if *target == self.owner {
            return Err(RegistryError::CannotRemoveOwner);
        }
        if !self.members.remove(target) {
            return Err(RegistryError::AuthorityNotFound(target.clone()));
        }

        warn!(authority = %target, removed_by = %caller, "authority removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(id: &str) -> PrincipalId {
        PrincipalId::new(id)
    }

    fn roster() -> AuthorityRoster {
        AuthorityRoster::new(principal("owner"))
    }

    #[test]
    fn owner_is_seeded_at_construction() {
        let roster = roster();
        assert!(roster.is_active(&principal("owner")));
        assert_eq!(roster.count(), 1);
    }

    #[test]
    fn authority_can_add_another() {
        let mut roster = roster();
        roster.add(&principal("owner"), principal("a")).unwrap();
        assert!(roster.is_active(&principal("a")));

        // The new authority can itself add members.
        roster.add(&principal("a"), principal("b")).unwrap();
        assert!(roster.is_active(&principal("b")));
        assert_eq!(roster.count(), 3);
    }

    #[test]
    fn non_authority_cannot_add() {
        let mut roster = roster();
        let err = roster.add(&principal("stranger"), principal("a")).unwrap_err();
        assert_eq!(err, RegistryError::NotAuthorized(principal("stranger")));
        assert!(!roster.is_active(&principal("a")));
    }

    #[test]
    fn duplicate_add_rejected() {
        let mut roster = roster();
        roster.add(&principal("owner"), principal("a")).unwrap();
        let err = roster.add(&principal("owner"), principal("a")).unwrap_err();
        assert_eq!(err, RegistryError::AlreadyAuthority(principal("a")));
    }

    #[test]
    fn self_removal_allowed_for_non_owner() {
        let mut roster = roster();
        roster.add(&principal("owner"), principal("a")).unwrap();
        roster.remove(&principal("a"), &principal("a")).unwrap();
        assert!(!roster.is_active(&principal("a")));
    }

    #[test]
    fn owner_can_never_be_removed() {
        let mut roster = roster();
        roster.add(&principal("owner"), principal("a")).unwrap();

        let by_other = roster.remove(&principal("a"), &principal("owner")).unwrap_err();
        assert_eq!(by_other, RegistryError::CannotRemoveOwner);

        let by_self = roster.remove(&principal("owner"), &principal("owner")).unwrap_err();
        assert_eq!(by_self, RegistryError::CannotRemoveOwner);

        assert!(roster.is_active(&principal("owner")));
    }

    #[test]
    fn removing_inactive_target_fails() {
        let mut roster = roster();
        let err = roster.remove(&principal("owner"), &principal("ghost")).unwrap_err();
        assert_eq!(err, RegistryError::AuthorityNotFound(principal("ghost")));
    }

    #[test]
    fn removed_authority_loses_mutation_rights() {
        let mut roster = roster();
        roster.add(&principal("owner"), principal("a")).unwrap();
        roster.remove(&principal("owner"), &principal("a")).unwrap();

        let err = roster.add(&principal("a"), principal("b")).unwrap_err();
        assert_eq!(err, RegistryError::NotAuthorized(principal("a")));
    }

    #[test]
    fn readd_after_removal() {
        let mut roster = roster();
        roster.add(&principal("owner"), principal("a")).unwrap();
        roster.remove(&principal("owner"), &principal("a")).unwrap();
        roster.add(&principal("owner"), principal("a")).unwrap();
        assert!(roster.is_active(&principal("a")));
    }
}
