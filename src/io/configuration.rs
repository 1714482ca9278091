//! Runtime defaults and output naming conventions

/// Default cell edge length in pixels
pub const DEFAULT_CELL_SIZE: u32 = 25;

/// Pixel count from which the parallel reconstruction path is used
pub const PARALLEL_PIXEL_THRESHOLD: u64 = 1 << 20;

/// Input extensions picked up when processing a directory
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

// Output settings
/// Prefix added to reconstructed image file names
pub const RECONSTRUCTED_PREFIX: &str = "reconstructed_";
/// Suffix of the full analysis document
pub const ANALYSIS_SUFFIX: &str = "_analysis";
/// Suffix of the pixel data document
pub const PIXEL_DATA_SUFFIX: &str = "_pixel_data";
/// Extension used for reconstructions from JSON when none is requested
pub const DEFAULT_OUTPUT_EXTENSION: &str = "png";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
