pub mod athletes;
pub mod health;
pub mod players;
pub mod report;
pub mod session;

use crate::api::ApiError;
use crate::models::JerseyNumber;

/// Parse a jersey number from a path segment.
pub(crate) fn parse_jersey(raw: &str) -> Result<JerseyNumber, ApiError> {
    raw.parse::<JerseyNumber>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}
