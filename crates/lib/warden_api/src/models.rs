//! Request and response bodies.
//!
//! Request fields default to empty so that a missing field reaches
//! validation and is reported as a 400 rather than a JSON rejection.

use serde::{Deserialize, Serialize};
use warden_core::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Body of `POST /api/v1/users/`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Body of `PUT /api/v1/users/{id}`. Any other field in the payload
/// (password, active, timestamps) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub full_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub message: String,
    pub user: User,
}

/// Query string of `GET /api/v1/users/`. Unparseable numbers count as 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
}

impl ListUsersQuery {
    pub fn offset(&self) -> i64 {
        parse_or_zero(self.offset.as_deref())
    }

    pub fn limit(&self) -> i64 {
        parse_or_zero(self.limit.as_deref())
    }
}

fn parse_or_zero(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub data: Vec<User>,
    pub total: i64,
    pub page_size: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

impl UserPage {
    /// Build page metadata for a window starting at `offset` of size `limit`.
    /// `limit` must be positive.
    pub fn new(data: Vec<User>, total: i64, offset: i64, limit: i64) -> Self {
        Self {
            data,
            total,
            page_size: limit,
            current_page: (offset / limit).saturating_add(1),
            total_pages: total / limit + i64::from(total % limit != 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_arithmetic() {
        let page = UserPage::new(Vec::new(), 25, 10, 10);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);

        let page = UserPage::new(Vec::new(), 0, 0, 10);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);

        // Offsets need not be page-aligned.
        let page = UserPage::new(Vec::new(), 100, 15, 10);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 10);
    }

    #[test]
    fn page_arithmetic_saturates_at_extremes() {
        let page = UserPage::new(Vec::new(), 3, i64::MAX, 1);
        assert_eq!(page.current_page, i64::MAX);
        assert_eq!(page.total_pages, 3);

        let page = UserPage::new(Vec::new(), i64::MAX, 0, 100);
        assert_eq!(page.total_pages, i64::MAX / 100 + 1);

        let page = UserPage::new(Vec::new(), i64::MAX, i64::MAX, i64::MAX);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn query_numbers_fall_back_to_zero() {
        let q = ListUsersQuery {
            offset: Some("abc".into()),
            limit: None,
        };
        assert_eq!(q.offset(), 0);
        assert_eq!(q.limit(), 0);

        let q = ListUsersQuery {
            offset: Some("20".into()),
            limit: Some("-5".into()),
        };
        assert_eq!(q.offset(), 20);
        assert_eq!(q.limit(), -5);
    }

    #[test]
    fn update_request_ignores_guarded_fields() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"first_name":"A","last_name":"B","email":"a@b.co","password":"x","active":false}"#,
        )
        .unwrap();
        assert_eq!(req.first_name, "A");
        assert_eq!(req.full_name, None);
    }
}
