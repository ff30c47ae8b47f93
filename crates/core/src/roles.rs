//! Well-known role name constants.
//!
//! Roles are derived from the `users.is_admin` flag when a session is opened.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// Resolve the role name embedded in session tokens.
pub fn role_for(is_admin: bool) -> &'static str {
    if is_admin {
        ROLE_ADMIN
    } else {
        ROLE_STAFF
    }
}
