//! RoLabelImg <-> DOTA annotation converter
//!
//! This library converts rotated-box annotations between the RoLabelImg XML
//! format (center, size, angle) and the DOTA text format (four vertices).

pub mod config;
pub mod conversion;
pub mod dota;
pub mod error;
pub mod geometry;
pub mod io;
pub mod rolabelimg;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Cli, Command, Dota2RoArgs, ImageExt, Ro2DotaArgs};
pub use conversion::{convert_dota_to_rolabelimg, convert_rolabelimg_to_dota};
pub use error::{ConvertError, FormatError, Result};
pub use geometry::{
    center_box_to_polygon, order_clockwise_from_top_left, polygon_to_center_box, rotate_point,
    CenterBox, Point, Polygon4,
};
pub use types::{AnnotationObject, DotaObject, ImageSize, ProcessingStats, RoLabelAnnotation};
