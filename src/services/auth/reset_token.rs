/*
 * Responsibility
 * - パスワードリセット用シークレットの生成とハッシュ化
 * - 平文シークレットは呼び出し元に返すのみ。DB にはダイジェストだけを置く
 *   (DB を取得されてもリセットを偽造できない)
 */
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};

/// Reset secrets are valid for 10 minutes from issuance.
const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// 平文シークレットと、保存用ダイジェスト・有効期限の組
#[derive(Debug, Clone)]
pub struct GeneratedResetToken {
    pub secret: String,
    pub secret_hash: Vec<u8>,
    pub expires_at: DateTime<Utc>,
}

/// Generate a fresh reset secret.
///
/// 20 bytes of OS entropy, hex-encoded for the caller. Only the SHA-256
/// digest of the hex string is intended for storage.
pub fn generate() -> GeneratedResetToken {
    let mut bytes = [0u8; 20];
    getrandom::fill(&mut bytes).expect("getrandom failed");

    let secret = hex::encode(bytes);
    let secret_hash = hash_secret(&secret);
    let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

    GeneratedResetToken {
        secret,
        secret_hash,
        expires_at,
    }
}

/// sha256(secret) -> raw 32 bytes (stored as BYTEA)
pub fn hash_secret(secret: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_is_40_hex_chars() {
        let t = generate();
        assert_eq!(t.secret.len(), 40);
        assert!(t.secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_deterministic_sha256() {
        let t = generate();
        assert_eq!(t.secret_hash, hash_secret(&t.secret));
        assert_eq!(t.secret_hash.len(), 32);
    }

    #[test]
    fn distinct_calls_produce_distinct_secrets() {
        assert_ne!(generate().secret, generate().secret);
    }

    #[test]
    fn expiry_is_ten_minutes_out() {
        let before = Utc::now();
        let t = generate();
        let after = Utc::now();
        assert!(t.expires_at >= before + Duration::minutes(10));
        assert!(t.expires_at <= after + Duration::minutes(10));
    }
}
