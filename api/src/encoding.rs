//! Decoding of base64 byte fields (addresses, hashes) for display.
//!
//! The query service stores byte arrays as standard base64. Addresses are
//! shown as lowercase hex everywhere in the dashboard; there is no raw-string
//! rendering.

use base64::engine::general_purpose::STANDARD;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not valid base64: {0}")]
pub struct DecodeError(String);

/// Decodes a base64 field, accepting both padded and unpadded input.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let encoded = encoded.trim();
    STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|e| DecodeError(e.to_string()))
}

/// Decodes a base64-encoded address into its hex form.
pub fn decode_address(encoded: &str) -> Result<String, DecodeError> {
    decode_base64(encoded).map(hex::encode)
}

/// Whether `s` is a non-empty base64 string.
pub fn is_base64(s: &str) -> bool {
    !s.trim().is_empty() && decode_base64(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_decodes_to_hex() {
        assert_eq!(decode_address("dGVzdA==").unwrap(), "74657374");
    }

    #[test]
    fn unpadded_input_is_accepted() {
        assert_eq!(decode_address("dGVzdA").unwrap(), "74657374");
    }

    #[test]
    fn invalid_input_is_an_error() {
        assert!(decode_address("not base64!").is_err());
        assert!(!is_base64("ey!!"));
        assert!(!is_base64(""));
        assert!(is_base64("eyJhIjoxfQ=="));
    }
}
