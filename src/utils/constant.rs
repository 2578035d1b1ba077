//! # Application Constants
//!
//! This module defines configuration defaults and fixed messages used
//! throughout the application.

/// Address the HTTP server binds to when `BIND_ADDR` is not set
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8090";

/// Pool size used when `DB_MAX_CONNECTIONS` is not set or unparsable
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Default `skip` for `GET /users/`
pub const DEFAULT_PAGE_SKIP: u32 = 0;

/// Default `limit` for `GET /users/`
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Column limits, mirrored by the `users` table definition
pub const MAX_NAME_LENGTH: u64 = 50;
pub const MAX_GENDER_LENGTH: u64 = 15;
pub const MAX_EMAIL_LENGTH: u64 = 50;
pub const MAX_CITY_LENGTH: u64 = 50;
pub const MAX_INTERESTS_LENGTH: u64 = 255;

/// Separator between interest tokens in the `interests` field
pub const INTEREST_SEPARATOR: &str = ", ";

pub const MSG_INVALID_FORMAT: &str = "Invalid email address format";
pub const MSG_NO_MX_RECORDS: &str = "Domain does not have MX records";
pub const MSG_NO_SUCH_DOMAIN: &str = "Domain does not exist";
pub const MSG_VALID_EMAIL: &str = "Valid email address";
