//! CDLS site: server-rendered pages over a headless content store.
//!
//! The binary in `main.rs` wires these modules together; integration tests
//! drive [`site::build_router`] directly.

pub mod calendar;
pub mod config;
pub mod content;
pub mod error;
pub mod listing;
pub mod logger;
pub mod richtext;
pub mod site;
