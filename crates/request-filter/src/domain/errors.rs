//! # Filter Errors
//!
//! Error taxonomy of the admission chain. Every variant is terminal for the
//! request being checked; nothing here is retried.
//!
//! The rendered messages are relied on by clients and downstream components,
//! so they must stay stable.

use crate::ports::outbound::PolicyError;
use thiserror::Error;

/// Structural failures while turning a request into `SignedData`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// No request was supplied at all.
    #[error("nil request")]
    NilRequest,

    /// The payload does not decode, or decodes without a header.
    #[error("missing header in request's payload")]
    MissingHeader,

    /// The header carries no signature header bytes.
    #[error("missing signature header in payload's header")]
    MissingSignatureHeader,

    #[error("failed unmarshalling signature header: {0}")]
    SignatureHeaderDecode(prost::DecodeError),

    #[error("failed unmarshalling channel header: {0}")]
    ChannelHeaderDecode(prost::DecodeError),
}

/// Rejected `FilterConfig` or `FilterSettings`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Enforcement is on but there is nothing to evaluate against.
    #[error("client signature verification is required but no policy manager is configured")]
    MissingPolicyManager,

    #[error("request max bytes must be greater than zero")]
    ZeroRequestMaxBytes,

    #[error("policy name must not be empty")]
    EmptyPolicyName,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors returned by rules and by the rule chain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The envelope could not be decoded into `SignedData`.
    #[error("failed to convert request to signedData : {0}")]
    SignedData(#[from] ConversionError),

    /// The channel has no policy bound to the required name.
    ///
    /// Signals a configuration gap rather than a client error.
    #[error("no policies in config block for channel {channel_id} (policy {policy_name})")]
    PolicyNotFound {
        channel_id: String,
        policy_name: String,
    },

    /// The signer failed policy evaluation.
    #[error("signature did not satisfy policy {policy_name}: {source}")]
    PolicyNotSatisfied {
        policy_name: String,
        #[source]
        source: PolicyError,
    },

    /// An update carried a configuration that failed validation.
    #[error("invalid filter config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("empty payload field")]
    EmptyPayload,

    #[error("request payload size {size} exceeds max request size {max}")]
    PayloadTooLarge { size: usize, max: u64 },
}

impl FilterError {
    /// True when the rejection stems from node configuration rather than the
    /// submitted request.
    pub fn is_configuration_gap(&self) -> bool {
        matches!(self, Self::PolicyNotFound { .. } | Self::InvalidConfig(_))
    }
}
