/*
 * Responsibility
 * - パスワードの one-way ハッシュと照合 (bcrypt)
 * - 「平文か既ハッシュか」を型で区別し、保存前の二重ハッシュを防ぐ
 */

/// bcrypt work factor. salt は bcrypt が呼び出しごとに生成し、出力に埋め込む。
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password.
pub fn hash_password(plain: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(plain, BCRYPT_COST)
}

/// Verify a plaintext password against a stored hash.
///
/// Returns false on mismatch or a malformed hash; a normal mismatch never errors.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// A password on its way to the users table.
///
/// The hash is computed exactly once, when a plaintext value is persisted.
/// Re-persisting an already hashed value passes it through untouched.
#[derive(Debug, Clone)]
pub enum Password {
    Plain(String),
    Hashed(String),
}

impl Password {
    pub fn into_hash(self) -> Result<String, bcrypt::BcryptError> {
        match self {
            Password::Plain(plain) => hash_password(&plain),
            Password::Hashed(hash) => Ok(hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        assert!(!verify_password("secret1", "not-a-bcrypt-hash"));
    }

    #[test]
    fn into_hash_hashes_plaintext() {
        let hash = Password::Plain("secret1".to_string()).into_hash().unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_password("secret1", &hash));
    }

    #[test]
    fn into_hash_passes_hashed_values_through() {
        let hash = hash_password("secret1").unwrap();
        let again = Password::Hashed(hash.clone()).into_hash().unwrap();
        assert_eq!(again, hash);
    }
}
