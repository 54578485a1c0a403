//! The four state transitions: create, donate, withdraw, refund
//!
//! Each submodule adds one operation to [`crate::program::Crowdfunding`].

mod create;
mod donate;
mod refund;
mod withdraw;
