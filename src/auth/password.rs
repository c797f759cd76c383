use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::error;

/// Check the registration password policy. Returns the violated rule.
pub fn check_password_policy(plain: &str) -> Result<(), &'static str> {
    if plain.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    let has_upper = plain.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = plain.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = plain.chars().any(|c| c.is_ascii_digit());
    if !has_upper || !has_lower || !has_digit {
        return Err("Password must contain uppercase, lowercase, and number");
    }
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

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
    fn policy_accepts_minimal_valid_password() {
        assert!(check_password_policy("Abcdefg1").is_ok());
    }

    #[test]
    fn policy_rejects_missing_uppercase() {
        assert_eq!(
            check_password_policy("abcdefg1"),
            Err("Password must contain uppercase, lowercase, and number")
        );
    }

    #[test]
    fn policy_rejects_missing_digit() {
        assert!(check_password_policy("Abcdefgh").is_err());
    }

    #[test]
    fn policy_rejects_short_password() {
        assert_eq!(
            check_password_policy("Ab1"),
            Err("Password must be at least 8 characters")
        );
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn hashes_are_salted() {
        let hash_a = hash_password("Passw0rd1").expect("hash a");
        let hash_b = hash_password("Passw0rd1").expect("hash b");
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("Passw0rd1").expect("hashing should succeed");
        assert!(!verify_password("Passw0rd2", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
