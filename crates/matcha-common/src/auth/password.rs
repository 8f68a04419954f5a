//! Password hashing and the account password policy
//!
//! Hashes use Argon2id with a random salt per password.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

const MIN_PASSWORD_LENGTH: usize = 8;
const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/\\|";

/// Passwords rejected regardless of composition (compared case-insensitively)
const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "123456", "1234567890", "qwerty", "qwerty123",
    "abc123", "admin", "letmein", "welcome", "monkey", "dragon", "master", "hello",
    "freedom", "whatever", "qazwsx", "trustno1", "iloveyou", "sunshine", "princess",
    "football", "baseball", "starwars", "passw0rd", "p@ssw0rd", "welcome1", "changeme",
];

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check a new password against the account policy.
///
/// Rules are checked in order and the first failure is reported:
/// minimum length, not a common password, then at least one lowercase
/// letter, uppercase letter, digit and special character.
///
/// # Errors
/// Returns `AppError::Validation` naming the first unmet rule
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let fail = |msg: &str| Err(AppError::Validation(msg.to_string()));

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return fail("Password must be at least 8 characters long");
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        return fail("Password is too common, please choose a stronger one");
    }

    if !password.chars().any(char::is_lowercase) {
        return fail("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(char::is_uppercase) {
        return fail("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return fail("Password must contain at least one number");
    }

    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return fail("Password must contain at least one special character");
    }

    Ok(())
}
