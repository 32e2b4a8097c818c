//! Sanctions Registry - the unified caller-facing surface.
//!
//! Composes the authority roster and the sanction ledger behind one lock so
//! every operation's authorization check and mutation are atomic with respect
//! to all other operations. The platform supplies two things the registry
//! only reads: an authenticated caller principal per call, and the current
//! block height through the [`HeightProvider`] seam.

#![deny(unsafe_code)]

mod height;
mod registry;

pub use height::{HeightProvider, ManualHeight};
pub use registry::{RegistryConfig, SanctionsRegistry};

pub use sanctions_authority::AuthorityRoster;
pub use sanctions_ledger::{SanctionLedger, DEFAULT_REASON_LIMIT};
pub use sanctions_types::{
    BlockHeight, PrincipalId, RegistryError, RegistryStats, SanctionRecord, SanctionStatus,
};
