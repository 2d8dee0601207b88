//! Rule bounding the request payload size.

use crate::domain::entities::Request;
use crate::domain::errors::{ConfigError, ConversionError, FilterError};
use crate::ports::inbound::{Rule, UpdatableRule};
use crate::ports::outbound::FilterConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Rejects payloads larger than the configured `request_max_bytes`.
///
/// The limit is a single scalar, so an atomic is enough for tear-free reads.
#[derive(Debug)]
pub struct MaxSizeFilter {
    max_bytes: AtomicU64,
}

impl MaxSizeFilter {
    pub fn new(config: &dyn FilterConfig) -> Result<Self, FilterError> {
        let max = Self::read_limit(config)?;
        Ok(Self {
            max_bytes: AtomicU64::new(max),
        })
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes.load(Ordering::Acquire)
    }

    fn read_limit(config: &dyn FilterConfig) -> Result<u64, ConfigError> {
        match config.request_max_bytes() {
            0 => Err(ConfigError::ZeroRequestMaxBytes),
            max => Ok(max),
        }
    }
}

impl Rule for MaxSizeFilter {
    fn name(&self) -> &'static str {
        "max_size"
    }

    fn apply(&self, request: Option<&Request>) -> Result<(), FilterError> {
        let request = request.ok_or(ConversionError::NilRequest)?;
        let max = self.max_bytes();
        let size = request.payload.len();

        if size as u64 > max {
            debug!(size, max, "request payload too large");
            return Err(FilterError::PayloadTooLarge { size, max });
        }
        Ok(())
    }

    fn as_updatable(&self) -> Option<&dyn UpdatableRule> {
        Some(self)
    }
}

impl UpdatableRule for MaxSizeFilter {
    fn update(&self, config: &dyn FilterConfig) -> Result<(), FilterError> {
        let max = Self::read_limit(config).map_err(|e| {
            warn!(error = %e, "rejected max size update");
            FilterError::InvalidConfig(e)
        })?;
        let previous = self.max_bytes.swap(max, Ordering::AcqRel);
        info!(previous, max, "max request size updated");
        Ok(())
    }
}
