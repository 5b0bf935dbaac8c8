//! Zoo Engine - coordinating services over the zoo domain.
//!
//! The domain crate decides what a transfer or a feeding means. This crate
//! loads aggregates through repository ports, runs the domain rules, and
//! writes the results back.

pub mod app;
pub mod infrastructure;
pub mod seed;
pub mod use_cases;


pub use app::App;
