//! # Domain Entities
//!
//! Envelope structures as they travel on the wire, plus the `SignedData`
//! tuple handed to policy evaluation.
//!
//! The protobuf messages are declared with `prost` derives and keep the field
//! numbers of the ordering network's common transaction schema, so bytes
//! produced here interoperate with routers, batchers and assemblers.

use prost::Message;

// =============================================================================
// Wire Messages
// =============================================================================

/// An inbound submission as delivered by the transport layer.
///
/// The signature is detached: it covers `payload` and travels beside it.
#[derive(Clone, PartialEq, Message)]
pub struct Request {
    /// Opaque trace identifier assigned by the router.
    #[prost(bytes = "vec", tag = "1")]
    pub trace_id: Vec<u8>,
    /// Serialized `Payload`.
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
    /// Client signature over `payload`.
    #[prost(bytes = "vec", tag = "3")]
    pub signature: Vec<u8>,
}

/// Decoded form of `Request::payload`.
#[derive(Clone, PartialEq, Message)]
pub struct Payload {
    #[prost(message, optional, tag = "1")]
    pub header: Option<Header>,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

/// Both sub-headers are carried as nested serialized messages.
#[derive(Clone, PartialEq, Message)]
pub struct Header {
    #[prost(bytes = "vec", tag = "1")]
    pub channel_header: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature_header: Vec<u8>,
}

/// Routing metadata: which channel the submission targets.
#[derive(Clone, PartialEq, Message)]
pub struct ChannelHeader {
    #[prost(int32, tag = "1")]
    pub r#type: i32,
    #[prost(int32, tag = "2")]
    pub version: i32,
    #[prost(message, optional, tag = "3")]
    pub timestamp: Option<prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub channel_id: String,
    #[prost(string, tag = "5")]
    pub tx_id: String,
    #[prost(uint64, tag = "6")]
    pub epoch: u64,
    #[prost(bytes = "vec", tag = "7")]
    pub extension: Vec<u8>,
    #[prost(bytes = "vec", tag = "8")]
    pub tls_cert_hash: Vec<u8>,
}

/// Signer identity and anti-replay nonce.
#[derive(Clone, PartialEq, Message)]
pub struct SignatureHeader {
    /// Serialized identity of the submitting client.
    #[prost(bytes = "vec", tag = "1")]
    pub creator: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub nonce: Vec<u8>,
}

// =============================================================================
// Policy Input
// =============================================================================

/// The canonical tuple a policy evaluator judges.
///
/// Only ever constructed from a fully decoded envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedData {
    /// Signer identity (the signature header's creator).
    pub identity: Vec<u8>,
    /// Bytes the client signed (the serialized payload).
    pub data: Vec<u8>,
    /// Detached client signature.
    pub signature: Vec<u8>,
    /// Channel the request is addressed to.
    pub channel_id: String,
}

// =============================================================================
// Request Builder
// =============================================================================

/// Header type for a plain client transaction.
pub const HEADER_TYPE_MESSAGE: i32 = 1;

/// Builds well-formed structured requests.
///
/// Used by clients assembling submissions and by tests that need a valid
/// envelope to start from.
#[derive(Clone, Debug, Default)]
pub struct RequestBuilder {
    channel_id: String,
    tx_id: String,
    creator: Vec<u8>,
    nonce: Vec<u8>,
    data: Vec<u8>,
    signature: Vec<u8>,
    trace_id: Vec<u8>,
}

impl RequestBuilder {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    pub fn tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = tx_id.into();
        self
    }

    pub fn creator(mut self, creator: impl Into<Vec<u8>>) -> Self {
        self.creator = creator.into();
        self
    }

    pub fn nonce(mut self, nonce: impl Into<Vec<u8>>) -> Self {
        self.nonce = nonce.into();
        self
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    pub fn signature(mut self, signature: impl Into<Vec<u8>>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn trace_id(mut self, trace_id: impl Into<Vec<u8>>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    /// Serialize the nested headers and wrap them into a `Request`.
    pub fn build(self) -> Request {
        let channel_header = ChannelHeader {
            r#type: HEADER_TYPE_MESSAGE,
            channel_id: self.channel_id,
            tx_id: self.tx_id,
            ..ChannelHeader::default()
        };
        let signature_header = SignatureHeader {
            creator: self.creator,
            nonce: self.nonce,
        };
        let payload = Payload {
            header: Some(Header {
                channel_header: channel_header.encode_to_vec(),
                signature_header: signature_header.encode_to_vec(),
            }),
            data: self.data,
        };

        Request {
            trace_id: self.trace_id,
            payload: payload.encode_to_vec(),
            signature: self.signature,
        }
    }
}
