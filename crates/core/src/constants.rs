//! Constants used throughout the condo workspace

// Remote authority functions
pub const VERIFY_ACCESS_FUNCTION: &str = "verifySuperAdminAccess";
pub const VALIDATE_SESSION_FUNCTION: &str = "validateSuperAdminSession";
pub const OPERATION_FUNCTION: &str = "superAdminOperation";

// Placeholder sent when the caller's public IP cannot be determined
pub const UNKNOWN_IP: &str = "unknown";

// Client identification string sent with every mint request
pub const DEFAULT_CLIENT_ID: &str = "CondoAdmin-SuperAdmin-Console/1.0";

// Default endpoints
pub const DEFAULT_FUNCTIONS_BASE_URL: &str = "http://127.0.0.1:5001/condo-admin/us-central1";
pub const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

// Environment variable names
pub const CONDO_LOG_VAR: &str = "CONDO_LOG";
pub const CONDO_CONFIG_VAR: &str = "CONDO_CONFIG";
pub const CONDO_FUNCTIONS_URL_VAR: &str = "CONDO_FUNCTIONS_URL";
pub const CONDO_IP_LOOKUP_URL_VAR: &str = "CONDO_IP_LOOKUP_URL";
pub const CONDO_CLIENT_ID_VAR: &str = "CONDO_CLIENT_ID";
pub const CONDO_REQUEST_TIMEOUT_VAR: &str = "CONDO_REQUEST_TIMEOUT_SECS";
pub const CONDO_IDENTITY_TOKEN_VAR: &str = "CONDO_IDENTITY_TOKEN";
