//! Rule rejecting requests that carry no payload.

use crate::domain::entities::Request;
use crate::domain::errors::{ConversionError, FilterError};
use crate::ports::inbound::Rule;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct PayloadNotEmptyRule;

impl Rule for PayloadNotEmptyRule {
    fn name(&self) -> &'static str {
        "payload_not_empty"
    }

    fn apply(&self, request: Option<&Request>) -> Result<(), FilterError> {
        let request = request.ok_or(ConversionError::NilRequest)?;
        if request.payload.is_empty() {
            debug!("rejecting request with empty payload");
            return Err(FilterError::EmptyPayload);
        }
        Ok(())
    }
}
