//! Crowdfunding escrow program
//!
//! Holds contributor funds in custody per campaign and releases them either
//! to the campaign owner (target reached) or back to contributors (deadline
//! passed without reaching the target).
//!
//! # Modules
//! - `address`: deterministic record address derivation
//! - `clock`: time source for deadline gates
//! - `config`: program limits and storage deposits
//! - `errors`: program, ledger, config and snapshot errors
//! - `events`: events emitted by successful transitions
//! - `instructions`: create, donate, withdraw, refund
//! - `invariants`: whole-state consistency checks
//! - `ledger`: external balance system boundary
//! - `program`: the program state and read accessors
//! - `shared`: thread-safe handle serializing transitions
//! - `snapshot`: record snapshots with integrity hashing
//! - `store`: records keyed by derived address
//!
//! The library never installs a `tracing` subscriber.

pub mod address;
pub mod clock;
pub mod config;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod invariants;
pub mod ledger;
pub mod program;
pub mod shared;
pub mod snapshot;
pub mod store;

pub use address::{campaign_address, contribution_address, PROGRAM_ID};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ProgramConfig;
pub use errors::{ErrorCategory, ProgramError};
pub use ledger::{InMemoryLedger, Ledger, Transfer};
pub use program::Crowdfunding;
pub use shared::SharedCrowdfunding;

/// Program ABI version. Instruction signatures and the addressing scheme are
/// frozen under it.
pub const PROGRAM_ABI_VERSION: &str = "1.0.0";
