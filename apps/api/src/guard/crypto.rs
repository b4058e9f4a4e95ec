//! Random tokens and password-based authenticated encryption.
//!
//! Ciphertext layout, before base64 (standard alphabet, padded):
//! `salt (16) ‖ nonce (12) ‖ AES-256-GCM ciphertext ‖ tag (16)`.
//! The key is PBKDF2-HMAC-SHA256 over the password with 100 000 iterations.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

pub const PBKDF2_ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;
const TAG_LEN: usize = 16;

/// Decryption failures carry no detail: a wrong password, a tampered payload
/// and a malformed encoding are indistinguishable to the caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Encryption failed")]
    Encryption,

    #[error("Decryption failed")]
    Decryption,
}

/// Hex string of `len` random bytes from the OS generator (`2 * len` chars).
pub fn generate_secure_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

pub fn encrypt_data(plaintext: &str, password: &str) -> Result<String, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut salt);
    OsRng.fill_bytes(&mut nonce);

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|_| CryptoError::Encryption)?;

    let mut payload = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);
    Ok(STANDARD.encode(payload))
}

pub fn decrypt_data(encoded: &str, password: &str) -> Result<String, CryptoError> {
    let payload = STANDARD
        .decode(encoded.trim())
        .map_err(|_| CryptoError::Decryption)?;
    if payload.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::Decryption);
    }

    let (salt, rest) = payload.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_key(password, salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Decryption)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::{Alphanumeric, DistString};
    use rand::Rng;

    #[test]
    fn test_token_length_is_twice_byte_count() {
        for len in [0, 1, 16, 32, 64] {
            let token = generate_secure_token(len);
            assert_eq!(token.len(), 2 * len);
            assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_secure_token(32), generate_secure_token(32));
    }

    #[test]
    fn test_round_trip_random_pairs() {
        let mut rng = rand::thread_rng();
        for i in 0..20 {
            let msg_len = rng.gen_range(0..256);
            let pw_len = rng.gen_range(1..40);
            let mut message = Alphanumeric.sample_string(&mut rng, msg_len);
            if i % 4 == 0 {
                message.push_str(" — ünïcødé ✓");
            }
            let password = Alphanumeric.sample_string(&mut rng, pw_len);

            let encrypted = encrypt_data(&message, &password).unwrap();
            assert_eq!(decrypt_data(&encrypted, &password).unwrap(), message);
        }
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let encrypted = encrypt_data("salary expectations: 90k", "correct horse").unwrap();
        assert_eq!(
            decrypt_data(&encrypted, "battery staple"),
            Err(CryptoError::Decryption)
        );
    }

    #[test]
    fn test_tampered_ciphertext_is_rejected() {
        let encrypted = encrypt_data("hello", "pw").unwrap();
        let mut bytes = STANDARD.decode(&encrypted).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        let tampered = STANDARD.encode(bytes);
        assert_eq!(decrypt_data(&tampered, "pw"), Err(CryptoError::Decryption));
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        assert_eq!(decrypt_data("not base64!!", "pw"), Err(CryptoError::Decryption));
        assert_eq!(decrypt_data("", "pw"), Err(CryptoError::Decryption));
        let short = STANDARD.encode([0u8; SALT_LEN + NONCE_LEN]);
        assert_eq!(decrypt_data(&short, "pw"), Err(CryptoError::Decryption));
    }

    #[test]
    fn test_salt_and_nonce_are_fresh_per_call() {
        let a = encrypt_data("same", "pw").unwrap();
        let b = encrypt_data("same", "pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_payload_layout() {
        let encrypted = encrypt_data("abc", "pw").unwrap();
        let bytes = STANDARD.decode(encrypted).unwrap();
        assert_eq!(bytes.len(), SALT_LEN + NONCE_LEN + 3 + TAG_LEN);
    }

    #[test]
    fn test_error_message_is_opaque() {
        assert_eq!(CryptoError::Decryption.to_string(), "Decryption failed");
    }
}
