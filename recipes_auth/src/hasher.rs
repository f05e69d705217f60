use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum ArgonHasherError {
    #[error("argon2 error: {}", .error)]
    Argon2Error { error: argon2::password_hash::Error },
}



/// Argon2id password hasher, salted with the salt from the configuration.
pub struct ArgonHasher {
    salt_string: SaltString,
    argon_hasher: Argon2<'static>,
}

impl ArgonHasher {
    pub fn new(base64_hash_salt: &str) -> Result<Self, ArgonHasherError> {
        let salt_string = SaltString::from_b64(base64_hash_salt)
            .map_err(|error| ArgonHasherError::Argon2Error { error })?;

        let argon_hasher = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            argon2::Params::default(),
        );

        Ok(Self {
            salt_string,
            argon_hasher,
        })
    }

    /// Hashes the password, returning the hash in PHC string format.
    pub fn hash_password(&self, password: &str) -> Result<String, ArgonHasherError> {
        self.argon_hasher
            .hash_password(password.as_bytes(), &self.salt_string)
            .map(|hash| hash.to_string())
            .map_err(|error| ArgonHasherError::Argon2Error { error })
    }

    pub fn verify_password_against_hash(
        &self,
        password: &str,
        hashed_password: &str,
    ) -> Result<bool, ArgonHasherError> {
        let hashed_password = PasswordHash::new(hashed_password)
            .map_err(|error| ArgonHasherError::Argon2Error { error })?;

        Ok(self
            .argon_hasher
            .verify_password(password.as_bytes(), &hashed_password)
            .is_ok())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verifies_only_the_original_password() {
        let hasher = ArgonHasher::new("c29tZXNhbHRzb21lc2FsdA").unwrap();

        let hash = hasher.hash_password("admin1234").unwrap();

        assert!(hasher
            .verify_password_against_hash("admin1234", &hash)
            .unwrap());
        assert!(!hasher
            .verify_password_against_hash("user1234", &hash)
            .unwrap());
    }

    #[test]
    fn rejects_invalid_salt() {
        assert!(ArgonHasher::new("!").is_err());
    }
}
