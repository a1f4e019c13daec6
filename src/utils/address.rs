//! EVM address and transaction hash helpers.
//!
//! Addresses are compared case-insensitively everywhere; the canonical stored
//! form is lowercase.

use validator::ValidationError;

/// Returns true for a 0x-prefixed, 40-hex-character address.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Returns true for a 0x-prefixed, 64-hex-character transaction hash.
pub fn is_valid_tx_hash(hash: &str) -> bool {
    let Some(hex) = hash.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Canonical (lowercase) form of an address.
pub fn normalize_address(address: &str) -> String {
    address.to_ascii_lowercase()
}

/// `validator` custom function for address fields.
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(ValidationError::new("address").with_message("Invalid address".into()))
    }
}

/// `validator` custom function for transaction hash fields.
pub fn validate_tx_hash(hash: &str) -> Result<(), ValidationError> {
    if is_valid_tx_hash(hash) {
        Ok(())
    } else {
        Err(ValidationError::new("tx_hash").with_message("Invalid transaction hash".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        assert!(is_valid_address(
            "0xabcdef0123456789abcdef0123456789abcdef01"
        ));
        assert!(is_valid_address(
            "0xABCDEF0123456789ABCDEF0123456789ABCDEF01"
        ));
    }

    #[test]
    fn test_invalid_address() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x"));
        assert!(!is_valid_address("abcdef0123456789abcdef0123456789abcdef01"));
        // 39 hex chars
        assert!(!is_valid_address(
            "0xabcdef0123456789abcdef0123456789abcdef0"
        ));
        // 41 hex chars
        assert!(!is_valid_address(
            "0xabcdef0123456789abcdef0123456789abcdef012"
        ));
        // non-hex character
        assert!(!is_valid_address(
            "0xabcdef0123456789abcdef0123456789abcdefg1"
        ));
    }

    #[test]
    fn test_valid_tx_hash() {
        assert!(is_valid_tx_hash(&format!("0x{}", "ab".repeat(32))));
        assert!(!is_valid_tx_hash(&format!("0x{}", "ab".repeat(31))));
        assert!(!is_valid_tx_hash("0xzz"));
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("0xABCDEF0123456789ABCDEF0123456789ABCDEF01"),
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
    }
}
