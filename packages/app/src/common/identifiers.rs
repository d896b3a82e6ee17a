use sha2::{Digest, Sha256};

/// Hash a phone number using SHA256.
///
/// Log lines carry this instead of the raw number.
pub fn hash_phone_number(phone_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone_number.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Short, stable tag for a phone number in tracing fields.
pub fn phone_log_tag(phone_number: &str) -> String {
    hash_phone_number(phone_number)[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_hash_consistency() {
        let hash1 = hash_phone_number("+46760000000");
        let hash2 = hash_phone_number(" +46760000000 ");
        assert_eq!(hash1, hash2, "Surrounding whitespace should not change the hash");
    }

    #[test]
    fn test_phone_hash_uniqueness() {
        assert_ne!(hash_phone_number("+46760000000"), hash_phone_number("+46760000001"));
    }

    #[test]
    fn test_log_tag_is_hash_prefix() {
        let tag = phone_log_tag("+46760000000");
        assert_eq!(tag.len(), 12);
        assert!(hash_phone_number("+46760000000").starts_with(&tag));
    }
}
