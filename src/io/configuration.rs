//! Board limits and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for the random board mode
/// Fixed seed for reproducible random boards
pub const DEFAULT_SEED: u64 = 42;
/// Width of a generated board
pub const DEFAULT_RANDOM_WIDTH: usize = 24;
/// Height of a generated board
pub const DEFAULT_RANDOM_HEIGHT: usize = 12;
/// Number of exits placed on a generated board
pub const DEFAULT_EXIT_COUNT: usize = 3;
/// Fraction of the remaining cells turned into obstacles
pub const DEFAULT_OBSTACLE_DENSITY: f64 = 0.25;

// Batch processing settings
/// Extension of batch-edit script files
pub const SCRIPT_EXTENSION: &str = "grid";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_field";
/// Edge length of one cell in exported PNG images (in pixels)
pub const PNG_CELL_SCALE: u32 = 16;
/// Largest heat map rendered, in pixels (1 GiB of RGBA)
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
