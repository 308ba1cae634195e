//! Shared utilities for the campfire chat relay.

pub mod logger;
pub mod time;
