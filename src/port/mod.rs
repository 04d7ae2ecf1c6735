//! Seams where alternative algorithm backends plug in.

pub mod search;

pub use search::{AssignmentSearch, SearchOutcome, StopReason};
