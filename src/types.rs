use crate::geometry::{CenterBox, Polygon4};

/// Folder name written into every generated RoLabelImg document
pub const DEFAULT_FOLDER: &str = "Unknown";

/// Channel count written into every generated RoLabelImg document
pub const DEFAULT_DEPTH: u32 = 3;

// One labelled rotated box from a RoLabelImg document
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationObject {
    pub name: String,
    /// Difficulty flag, kept as written in the source file
    pub difficult: String,
    pub bbox: CenterBox,
}

// Pixel dimensions of the annotated image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            depth: DEFAULT_DEPTH,
        }
    }
}

// A whole RoLabelImg XML document
#[derive(Debug, Clone, PartialEq)]
pub struct RoLabelAnnotation {
    pub folder: String,
    pub filename: String,
    pub size: ImageSize,
    pub objects: Vec<AnnotationObject>,
}

impl RoLabelAnnotation {
    pub fn new(filename: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_string(),
            filename: filename.into(),
            size: ImageSize {
                width,
                height,
                ..ImageSize::default()
            },
            objects: Vec::new(),
        }
    }
}

// One line of a DOTA label file
#[derive(Debug, Clone, PartialEq)]
pub struct DotaObject {
    pub polygon: Polygon4,
    pub name: String,
    pub difficult: String,
}

// Struct to hold processing statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub total_files_processed: usize,
    pub successful_conversions: usize,
    pub skipped_missing_image: usize,
    pub skipped_malformed_lines: usize,
    pub objects_converted: usize,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_total(&mut self) {
        self.total_files_processed += 1;
    }

    pub fn increment_successful(&mut self) {
        self.successful_conversions += 1;
    }

    pub fn increment_skipped_missing_image(&mut self) {
        self.skipped_missing_image += 1;
    }

    pub fn add_skipped_lines(&mut self, count: usize) {
        self.skipped_malformed_lines += count;
    }

    pub fn add_objects(&mut self, count: usize) {
        self.objects_converted += count;
    }

    pub fn print_summary(&self) {
        log::info!("=== Processing Summary ===");
        log::info!("Total files processed: {}", self.total_files_processed);
        log::info!("Successful conversions: {}", self.successful_conversions);
        log::info!("Objects converted: {}", self.objects_converted);

        if self.skipped_missing_image > 0 {
            log::warn!(
                "Skipped (missing image file): {}",
                self.skipped_missing_image
            );
        }
        if self.skipped_malformed_lines > 0 {
            log::warn!(
                "Dropped malformed label lines: {}",
                self.skipped_malformed_lines
            );
        }
    }
}
