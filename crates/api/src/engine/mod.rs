//! Continuity engine (detect, classify, record).
//!
//! Runs one detection pass per request: load a consistent snapshot of the
//! scope, apply the rule set, and replace the scope's unresolved conflicts.

pub mod continuity;
