//! Cache Module
//!
//! In-memory storage for issued passcodes. Records live for the lifetime of
//! the process; expired entries are rejected lazily by the OTP service and
//! reclaimed periodically by the sweeper.

pub mod memory_store;

pub use memory_store::{MemoryOtpStore, DEFAULT_SHARDS};

#[cfg(test)]
mod tests;
