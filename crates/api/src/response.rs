//! Shared response envelope types for API handlers.
//!
//! Review endpoints use a `{ "data": ... }` envelope. The detection endpoint
//! is the exception and returns its outcome unwrapped.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
