//! User-facing account models.

use persona_db::queries::users::UserRow;
use serde::Serialize;

/// Account details returned by the API. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub linked_person_id: Option<String>,
    pub is_linked: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            is_active: row.is_active,
            linked_person_id: row.linked_person_id,
            is_linked: row.is_linked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_does_not_leak_password_hash() {
        let row = UserRow {
            id: 1,
            email: "ada@example.com".to_string(),
            hashed_password: "$2b$12$secret".to_string(),
            full_name: None,
            is_active: true,
            linked_person_id: None,
            is_linked: false,
            created_at: "2026-01-01 00:00:00".to_string(),
            updated_at: None,
        };

        let json = serde_json::to_string(&UserResponse::from(row)).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
