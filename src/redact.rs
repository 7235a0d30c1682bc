//! Base64 helpers for secrets kept in test data.
//!
//! Secrets are stored encoded so they are not readable at a glance; they
//! are decoded only right before typing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;

/// Encodes a string.
#[must_use]
pub fn encode(input: &str) -> String {
    encode_bytes(input.as_bytes())
}

/// Encodes raw bytes.
#[must_use]
pub fn encode_bytes(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Decodes to a string. Invalid UTF-8 sequences are replaced.
///
/// # Errors
///
/// [`Error::Decode`](crate::Error::Decode) if `encoded` is not valid base64.
pub fn decode(encoded: &str) -> Result<String> {
    let bytes = decode_to_bytes(encoded)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decodes to raw bytes.
///
/// # Errors
///
/// [`Error::Decode`](crate::Error::Decode) if `encoded` is not valid base64.
pub fn decode_to_bytes(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    #[test]
    fn test_known_vector() {
        assert_eq!(encode("P@ssw0rd"), "UEBzc3cwcmQ=");
        assert_eq!(decode("UEBzc3cwcmQ=").unwrap(), "P@ssw0rd");
    }

    #[test]
    fn test_bytes() {
        assert_eq!(encode_bytes(&[0xff, 0x00]), "/wA=");
        assert_eq!(decode_to_bytes("/wA=").unwrap(), vec![0xff, 0x00]);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(decode(" aGk=\n").unwrap(), "hi");
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(decode("not base64!").unwrap_err(), Error::Decode(_)));
    }
}
