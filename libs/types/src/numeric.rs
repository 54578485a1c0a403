//! Integer amounts and timestamps
//!
//! Every amount is an unsigned count of the smallest currency unit. There is
//! no floating-point representation anywhere in the program.

/// Amount in the smallest currency unit.
pub type Lamports = u64;

/// Seconds since the Unix epoch.
pub type UnixTimestamp = i64;

/// Smallest units per whole unit, for callers that display amounts.
pub const LAMPORTS_PER_SOL: Lamports = 1_000_000_000;
