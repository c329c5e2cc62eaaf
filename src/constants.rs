//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the tabular column names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Color Family Classifier";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "colorfamily";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "ColorFamily";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "COLORFAMILY_CONFIG_DIR";

/// Default number of records per progress update.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Default worksheet name for exported workbooks.
pub const DEFAULT_SHEET_NAME: &str = "Classified Colors";

/// Name column header.
pub const NAME_COLUMN: &str = "Name";

/// Hex color column header.
pub const HEX_COLUMN: &str = "HEX";

/// RGB color column header.
pub const RGB_COLUMN: &str = "RGB";

/// Main family output column header.
pub const FAMILY_COLUMN: &str = "ColorFamily";

/// Sub-family output column header.
pub const SUB_FAMILY_COLUMN: &str = "ColorSubFamily";
