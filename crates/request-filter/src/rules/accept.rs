//! Rule that admits every request.

use crate::domain::entities::Request;
use crate::domain::errors::FilterError;
use crate::ports::inbound::Rule;

/// Admits everything, including a nil request.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptRule;

impl Rule for AcceptRule {
    fn name(&self) -> &'static str {
        "accept"
    }

    fn apply(&self, _request: Option<&Request>) -> Result<(), FilterError> {
        Ok(())
    }
}
