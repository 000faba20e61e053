use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id keyed with a service-wide secret. Every digest also carries its
/// own random salt, so equal passwords never produce equal digests.
#[derive(Clone)]
pub struct PasswordHasher {
    secret: Vec<u8>,
}

impl PasswordHasher {
    /// Create a new password hasher keyed with `secret`.
    ///
    /// # Arguments
    /// * `secret` - Service-wide secret mixed into every digest
    ///
    /// # Errors
    /// * `EmptySecret` - The secret is empty
    pub fn new(secret: &[u8]) -> Result<Self, PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::EmptySecret);
        }

        Ok(Self {
            secret: secret.to_vec(),
        })
    }

    fn argon2(&self) -> Result<Argon2<'_>, argon2::Error> {
        Argon2::new_with_secret(
            &self.secret,
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - The hash primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = self
            .argon2()
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// Malformed digests and digests produced under another secret report
    /// `false` like any other mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };
        let Ok(argon2) = self.argon2() else {
            return false;
        };

        argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(b"pepper").unwrap();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = PasswordHasher::new(b"pepper").unwrap();

        let first = hasher.hash("secret1").unwrap();
        let second = hasher.hash("secret1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first));
        assert!(hasher.verify("secret1", &second));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new(b"pepper").unwrap();
        assert!(!hasher.verify("password", "invalid_hash"));
    }

    #[test]
    fn test_verify_with_other_secret() {
        let hasher = PasswordHasher::new(b"pepper").unwrap();
        let other = PasswordHasher::new(b"another pepper").unwrap();

        let hash = hasher.hash("secret1").unwrap();

        assert!(!other.verify("secret1", &hash));
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            PasswordHasher::new(b""),
            Err(PasswordError::EmptySecret)
        ));
    }
}
