pub mod auth;
pub mod items;
pub mod pantries;

use uuid::Uuid;

use crate::error::ApiError;

/// Path ids that do not parse cannot name a stored document, so they get
/// the same answer a missing document would.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Record not found"))
}
