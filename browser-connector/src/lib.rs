//! Browser Connector module for the tab organizer
//!
//! This module defines the boundary between the organizer engine and the
//! host windowing system (a browser's windows/tabs API).
//!
//! # Features
//! - [`WindowHost`]: async trait the engine drives for queries and mutations
//! - [`InMemoryWindowHost`]: in-process host with Chromium-like semantics,
//!   used for tests and for embedding the engine without a live browser

pub mod traits;
pub mod memory;

pub use traits::*;
pub use memory::{HostCallLog, InMemoryWindowHost};
