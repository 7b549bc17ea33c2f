//! Constants used throughout the application
//!
//! This module centralizes magic strings, API paths, and user-facing messages
//! to improve maintainability and consistency.

// Application identity
pub const APP_NAME: &str = "bucketry";
pub const CONFIG_FILE_NAME: &str = "bucketry.toml";
pub const LOG_FILE_NAME: &str = "bucketry.log";

// Server defaults
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9090";
pub const DEFAULT_TOKEN_ENV: &str = "BUCKETRY_TOKEN";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 600;
pub const SESSION_COOKIE_NAME: &str = "token";

// API paths
pub const API_PREFIX: &str = "/api/v1";

// Display defaults
pub const DEFAULT_COLUMN_GAP: usize = 2;
pub const MAX_COLUMN_GAP: usize = 8;

// Success Messages
pub const SUCCESS_ACCESS_RULE_SAVED: &str = "✅ Access rule saved";
pub const SUCCESS_ACCESS_RULE_DELETED: &str = "✅ Access rule deleted";
pub const SUCCESS_USER_CREATED: &str = "✅ User created";
pub const SUCCESS_USER_UPDATED: &str = "✅ User updated";
pub const SUCCESS_USER_DELETED: &str = "✅ User deleted";

// Error Messages
pub const ERROR_LIST_LOAD_FAILED: &str = "❌ Failed to load";
pub const ERROR_SAVE_FAILED: &str = "❌ Failed to save";
pub const ERROR_DELETE_FAILED: &str = "❌ Failed to delete";
pub const ERROR_TOKEN_MISSING: &str = "⚠️  No session token found in environment variable";

// Validation Error Messages
pub const ERROR_ACCESS_KEY_REQUIRED: &str = "Access Key is required";
pub const ERROR_SECRET_KEY_REQUIRED: &str = "Secret Key is required";
pub const ERROR_PREFIX_REQUIRED: &str = "Prefix is required";

// Config Messages
pub const CONFIG_GENERATED: &str = "✅ Default configuration written to";
