/*
 * Responsibility
 * - Auth の request/response DTO
 * - validation (形式チェック) は handler の入口で validate() を呼ぶ
 * - password hash は response に決して載せない
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum plaintext password length accepted at signup/reset.
pub const PASSWORD_MIN_LENGTH: usize = 6;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if !is_valid_email(self.email.trim()) {
            return Err("a valid email is required");
        }
        if self.password.len() < PASSWORD_MIN_LENGTH {
            return Err("password must be at least 6 characters");
        }
        Ok(())
    }

    /// 保存・検索用の正規化済み email
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.password.len() < PASSWORD_MIN_LENGTH {
            return Err("password must be at least 6 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// signup / login / reset 成功時のレスポンス (user + token)
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ResetTokenResponse {
    pub message: &'static str,
    // 本来はメールで配送する値。このシステムは配信を持たないため body で返す
    pub reset_token: String,
}

#[derive(Debug, Serialize)]
pub struct PasswordResetResponse {
    pub message: &'static str,
    pub token: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// 形式チェック: local@domain で、domain がドット区切りの空でないラベルを持つこと
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    domain.split('.').count() >= 2 && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(signup("Ann", "ann@x.com", "secret1").validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(signup("  ", "ann@x.com", "secret1").validate().is_err());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "ann", "@x.com", "ann@", "ann@x", "a nn@x.com", "ann@x@y.com"] {
            assert!(signup("Ann", email, "secret1").validate().is_err(), "{email}");
        }
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(signup("Ann", "ann@x.com", "five5").validate().is_err());
        assert!(signup("Ann", "ann@x.com", "sixsix").validate().is_ok());
    }

    #[test]
    fn email_is_normalized() {
        let req = signup("Ann", "  Ann@X.Com ", "secret1");
        assert_eq!(req.normalized_email(), "ann@x.com");
    }
}
