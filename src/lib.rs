//! Text Compare library
//!
//! A line-level text diff engine with a navigation index over changed
//! segments, lazy row rendering and plain-text report export.

pub mod config;
pub mod constant;
pub mod diff;
pub mod messages;
pub mod saver;
pub mod session;
pub mod worker;
