//! # Envelope Codec
//!
//! Structural decoding of a request into `SignedData`. No cryptography and
//! no policy lookup happen here; only decoding and presence checks.

use super::entities::{ChannelHeader, Payload, Request, SignatureHeader, SignedData};
use super::errors::ConversionError;
use prost::Message;

/// Decode `request` into the tuple a policy evaluator consumes.
///
/// Checks run in a fixed order and the first failure wins:
/// nil request, header, signature header presence, signature header
/// decoding, channel header decoding.
pub fn to_signed_data(request: Option<&Request>) -> Result<SignedData, ConversionError> {
    let request = request.ok_or(ConversionError::NilRequest)?;

    let header = Payload::decode(request.payload.as_slice())
        .ok()
        .and_then(|payload| payload.header)
        .ok_or(ConversionError::MissingHeader)?;

    if header.signature_header.is_empty() {
        return Err(ConversionError::MissingSignatureHeader);
    }

    let signature_header = SignatureHeader::decode(header.signature_header.as_slice())
        .map_err(ConversionError::SignatureHeaderDecode)?;

    let channel_header = ChannelHeader::decode(header.channel_header.as_slice())
        .map_err(ConversionError::ChannelHeaderDecode)?;

    Ok(SignedData {
        identity: signature_header.creator,
        data: request.payload.clone(),
        signature: request.signature.clone(),
        channel_id: channel_header.channel_id,
    })
}
