//! Route paths.

pub const POST_AUTH_LOGIN: &str = "/api/v1/auth/login";

pub const USERS: &str = "/api/v1/users";
pub const USERS_SLASH: &str = "/api/v1/users/";
pub const USERS_ID: &str = "/api/v1/users/{id}";
pub const POST_USERS_RESET_PASSWORD: &str = "/api/v1/users/reset_password";
