//! Well-known keys persisted by the client.

/// Bearer token returned by `POST /auth/login`.
pub const TOKEN: &str = "token";
/// Dark mode preference, serialised as a JSON boolean.
pub const DARK_MODE: &str = "darkMode";
/// Cached identity of the logged-in user, serialised as a JSON object.
pub const USER: &str = "user";
