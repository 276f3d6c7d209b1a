use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Annotation format converter for rotated object detection.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert RoLabelImg XML to DOTA TXT format
    #[command(name = "ro2dota")]
    Ro2Dota(Ro2DotaArgs),

    /// Convert DOTA TXT to RoLabelImg XML format
    #[command(name = "dota2ro")]
    Dota2Ro(Dota2RoArgs),
}

#[derive(Args, Debug, Clone)]
pub struct Ro2DotaArgs {
    /// Directory containing RoLabelImg XML files
    #[arg(long = "xml-dir")]
    pub xml_dir: PathBuf,

    /// Directory to save the converted DOTA TXT files
    #[arg(long = "txt-dir")]
    pub txt_dir: PathBuf,

    /// Reorder each polygon clockwise starting from its top-left vertex
    #[arg(long = "canonical-order")]
    pub canonical_order: bool,
}

#[derive(Args, Debug, Clone)]
pub struct Dota2RoArgs {
    /// Directory containing DOTA TXT files
    #[arg(long = "txt-dir")]
    pub txt_dir: PathBuf,

    /// Directory containing the original images
    #[arg(long = "img-dir")]
    pub img_dir: PathBuf,

    /// Directory to save the converted RoLabelImg XML files
    #[arg(long = "xml-dir")]
    pub xml_dir: PathBuf,

    /// Extension of the image that shares each label file's name
    #[arg(long = "img-ext", value_enum, default_value = "jpg")]
    pub img_ext: ImageExt,
}

// Image extensions the build can read a size from
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum ImageExt {
    Jpg,
    Jpeg,
    Png,
    Bmp,
    Tif,
    Tiff,
}

impl ImageExt {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExt::Jpg => "jpg",
            ImageExt::Jpeg => "jpeg",
            ImageExt::Png => "png",
            ImageExt::Bmp => "bmp",
            ImageExt::Tif => "tif",
            ImageExt::Tiff => "tiff",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_img_ext(ext: &str) -> Result<ImageExt, clap::Error> {
        Cli::try_parse_from([
            "rolabelimg2dota",
            "dota2ro",
            "--txt-dir",
            "labels",
            "--img-dir",
            "images",
            "--xml-dir",
            "xml",
            "--img-ext",
            ext,
        ])
        .map(|cli| match cli.command {
            Command::Dota2Ro(args) => args.img_ext,
            other => panic!("unexpected command: {:?}", other),
        })
    }

    #[test]
    fn test_img_ext_accepts_decodable_formats() {
        assert_eq!(parse_img_ext("png").unwrap(), ImageExt::Png);
        assert_eq!(parse_img_ext("bmp").unwrap(), ImageExt::Bmp);
        assert_eq!(parse_img_ext("tif").unwrap(), ImageExt::Tif);
        assert_eq!(parse_img_ext("tiff").unwrap().as_str(), "tiff");
        assert_eq!(parse_img_ext("jpeg").unwrap().as_str(), "jpeg");
    }

    #[test]
    fn test_img_ext_rejects_unsupported_formats() {
        assert!(parse_img_ext("gif").is_err());
        assert!(parse_img_ext("webp").is_err());
        assert!(parse_img_ext("").is_err());
        assert!(parse_img_ext("../x").is_err());
    }

    #[test]
    fn test_parse_ro2dota() {
        let cli = Cli::try_parse_from([
            "rolabelimg2dota",
            "ro2dota",
            "--xml-dir",
            "in",
            "--txt-dir",
            "out",
        ])
        .unwrap();

        match cli.command {
            Command::Ro2Dota(args) => {
                assert_eq!(args.xml_dir, PathBuf::from("in"));
                assert_eq!(args.txt_dir, PathBuf::from("out"));
                assert!(!args.canonical_order);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_dota2ro_defaults_to_jpg() {
        let cli = Cli::try_parse_from([
            "rolabelimg2dota",
            "dota2ro",
            "--txt-dir",
            "labels",
            "--img-dir",
            "images",
            "--xml-dir",
            "xml",
        ])
        .unwrap();

        match cli.command {
            Command::Dota2Ro(args) => {
                assert_eq!(args.txt_dir, PathBuf::from("labels"));
                assert_eq!(args.img_dir, PathBuf::from("images"));
                assert_eq!(args.xml_dir, PathBuf::from("xml"));
                assert_eq!(args.img_ext, ImageExt::Jpg);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_dir_is_rejected() {
        let result = Cli::try_parse_from(["rolabelimg2dota", "dota2ro", "--txt-dir", "labels"]);
        assert!(result.is_err());
        assert!(Cli::try_parse_from(["rolabelimg2dota"]).is_err());
    }
}
