/*
 * Responsibility
 * - Notes の request/response DTO
 * - 公開 ID を返す場合は、encode 済みの値を返す (内部 ID を漏らさない)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateNoteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(content) = &self.content
            && content.trim().is_empty()
        {
            return Err("content cannot be empty");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: String, // encoded
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NoteDeletedResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_content() {
        let ok = CreateNoteRequest {
            title: "t".to_string(),
            content: "c".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank_title = CreateNoteRequest {
            title: " ".to_string(),
            content: "c".to_string(),
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn update_allows_partial_but_not_blank_fields() {
        let partial = UpdateNoteRequest {
            title: Some("t".to_string()),
            content: None,
        };
        assert!(partial.validate().is_ok());

        let blank = UpdateNoteRequest {
            title: None,
            content: Some("".to_string()),
        };
        assert!(blank.validate().is_err());
    }
}
