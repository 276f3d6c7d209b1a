use glob::{glob, Pattern};
use image::ImageReader;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Collect the files in `dir` (not recursive) ending in `.{ext}`, sorted by name
pub fn list_files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .ok_or_else(|| ConvertError::NonUtf8Path(dir.to_path_buf()))?;
    let pattern = format!("{}/*.{}", Pattern::escape(dir_str), ext);

    let mut files = Vec::new();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Failed to read directory entry: {}", e),
        }
    }
    files.sort();
    Ok(files)
}

/// Create the output directory if needed, keeping whatever it already holds
pub fn ensure_output_directory(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))?;
    Ok(path.to_path_buf())
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))
}

pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| ConvertError::io(path, e))
}

/// Pixel width and height of an image, read from its header. The format is
/// guessed from the file content, so a PNG named `.jpg` still works.
pub fn image_size(path: &Path) -> Result<(u32, u32)> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| ConvertError::io(path, e))?
        .into_dimensions()
        .map_err(|source| ConvertError::Image {
            path: path.to_path_buf(),
            source,
        })
}

/// `dir/<stem of file>.<ext>`
pub fn sibling_path(dir: &Path, file: &Path, ext: &str) -> PathBuf {
    let mut name = file.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(ext);
    dir.join(name)
}
