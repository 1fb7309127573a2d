/// Application name
pub const APP_NAME: &str = "Maestro";

/// Application version
pub const APP_VERSION: &str = "0.1.0";

/// Manifest file name expected in each module location
pub const MANIFEST_FILE_NAME: &str = "extension.json";

/// Memory store file name under the base directory
pub const MEMORY_FILE_NAME: &str = "maestro.json";

/// Directory under the base directory scanned for module locations
pub const EXTENSIONS_DIR_NAME: &str = "extensions";

/// Memory key path caching the available extension set
pub const AVAILABLE_KEY: &str = "extensions.available";

/// Memory key path persisting the active extension set
pub const ACTIVE_KEY: &str = "extensions.active";

/// Memory key path listing the ACL actions granted to the operator
pub const ACL_ACTIONS_KEY: &str = "acl.actions";

/// ACL action gating user management
pub const ACTION_MANAGE_USERS: &str = "manage-users";

/// ACL action gating platform administration
pub const ACTION_MANAGE_PLATFORM: &str = "manage-platform";
