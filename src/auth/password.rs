use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Salt and hash pair produced at registration; both are stored on the
/// record as opaque strings.
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub salt: String,
    pub hash: String,
}

pub fn hash_password(plain: &str) -> anyhow::Result<HashedPassword> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(HashedPassword {
        salt: salt.as_str().to_string(),
        hash,
    })
}

/// Recomputes the salted hash of `plain` using the salt embedded in the
/// PHC string and compares inside the argon2 primitive. A mismatch is
/// `Ok(false)`; only a malformed stored hash is an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hashed = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hashed.hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "Correct-horse1";
        let hashed = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("Wrong-password1", &hashed.hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        let msg = err.to_string();
        assert!(!msg.is_empty());
    }

    #[test]
    fn salt_is_fresh_per_call() {
        let first = hash_password("Abcde1!").expect("hash");
        let second = hash_password("Abcde1!").expect("hash");
        assert!(!first.salt.is_empty());
        assert_ne!(first.salt, second.salt);
        assert_ne!(first.hash, second.hash);
    }
}
