//! Infrastructure adapters and ports.

pub mod clock;
pub mod config;
pub mod event_log;
pub mod memory;
pub mod ports;
