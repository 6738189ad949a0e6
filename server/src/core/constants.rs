// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "PetCare";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "petcare";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".petcare";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "petcare.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "PETCARE_CONFIG";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "PETCARE_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "PETCARE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "PETCARE_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "PETCARE_LOG";

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "PETCARE_DATA_DIR";

/// Environment variable for the record store backend (sqlite or memory)
pub const ENV_DATABASE_BACKEND: &str = "PETCARE_DATABASE_BACKEND";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default body limit for API requests (256 KB)
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Seconds to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Pagination
// =============================================================================

/// First page number (pages are 1-based)
pub const DEFAULT_PAGE: u32 = 1;

/// Page size when the request does not set one
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest accepted page size
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Response header carrying the unpaged total for list endpoints
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "petcare.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -16000 = 16MB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;
