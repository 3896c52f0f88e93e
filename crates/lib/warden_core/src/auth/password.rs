//! Password hashing via bcrypt.

use tracing::warn;

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 10;

/// Hash a password with bcrypt (cost 10, random salt).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
///
/// A hash that bcrypt cannot parse never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matched) => matched,
        Err(e) => {
            warn!(error = %e, "stored password hash is not a valid bcrypt hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_original() {
        let hash = hash_password("p1").unwrap();
        assert!(verify_password("p1", &hash));
    }

    #[test]
    fn verify_rejects_other_strings() {
        let hash = hash_password("p1").unwrap();
        for other in ["", "p2", "P1", "p1 ", " p1", "p1p1"] {
            assert!(!verify_password(other, &hash), "{other:?} should not match");
        }
    }

    #[test]
    fn hash_is_salted_and_not_plaintext() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("same"));
        assert!(a.starts_with("$2"));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("p1", "not-a-bcrypt-hash"));
        assert!(!verify_password("p1", "p1"));
    }
}
