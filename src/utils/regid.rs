use sha2::{Digest, Sha256};

pub const REGID_PREFIX: &str = "EMP";

/// Derives the registration id from an email address.
///
/// The id is the prefix followed by the first 16 bytes of the SHA-256 digest
/// of the trimmed, lower-cased address, hex encoded. It is stable across
/// processes, so the same email always maps to the same key.
pub fn generate_regid(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    let digest = hasher.finalize();
    format!("{}{}", REGID_PREFIX, hex::encode(&digest[..16]))
}
