//! Types library for the crowdfunding escrow program
//!
//! Frozen record and identifier definitions shared by the program and by any
//! client that locates or decodes its records.
//!
//! # Modules
//! - `ids`: 32-byte keys for signers and derived record addresses
//! - `numeric`: integer amounts and timestamps
//! - `campaign`: campaign record
//! - `contribution`: per-contributor refundable claim
//! - `record`: tagged union stored at each address

pub mod ids;
pub mod numeric;
pub mod campaign;
pub mod contribution;
pub mod record;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::campaign::*;
    pub use crate::contribution::*;
    pub use crate::record::*;
}
