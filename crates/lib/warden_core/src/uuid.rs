// User identifiers are random (v4) UUIDs rendered as lowercase hyphenated
// text. Path parameters and token subjects are checked against the same
// shape before they reach a workflow.

use uuid::Uuid;

/// Generate a new user identifier (UUIDv4, hyphenated).
pub fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns `true` when `value` parses as a UUID whose version nibble is 4.
pub fn is_uuid_v4(value: &str) -> bool {
    Uuid::parse_str(value).is_ok_and(|id| id.get_version_num() == 4)
}
