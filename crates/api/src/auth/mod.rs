//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation (and issuance, for tooling and tests).
//!
//! Identity is established by the platform's auth service; this server only
//! verifies the tokens it hands out.

pub mod jwt;
