//! Standard messages for consistent error responses.

pub const INTERNAL_ERROR: &str = "An internal error occurred";
pub const NOT_FOUND_RESOURCE: &str = "The requested resource was not found";

// Auth gate
pub const NOT_LOGGED_IN: &str = "User not logged in";
pub const NOT_AUTHENTICATED: &str = "User not authenticated";
