use indicatif::ProgressBar;
use log::{info, warn};
use std::path::Path;

use crate::config::{Dota2RoArgs, Ro2DotaArgs};
use crate::error::{ConvertError, Result};
use crate::geometry::{
    center_box_to_polygon, order_clockwise_from_top_left, polygon_to_center_box,
};
use crate::io::{
    ensure_output_directory, image_size, list_files_with_extension, read_file, sibling_path,
    write_file,
};
use crate::types::{AnnotationObject, DotaObject, ProcessingStats, RoLabelAnnotation};
use crate::utils::create_progress_bar;
use crate::{dota, rolabelimg};

/// Convert every object of a RoLabelImg document to a DOTA object
pub fn annotation_to_dota(
    annotation: &RoLabelAnnotation,
    canonical_order: bool,
) -> Vec<DotaObject> {
    annotation
        .objects
        .iter()
        .map(|object| {
            let polygon = center_box_to_polygon(&object.bbox);
            DotaObject {
                polygon: if canonical_order {
                    order_clockwise_from_top_left(&polygon)
                } else {
                    polygon
                },
                name: object.name.clone(),
                difficult: object.difficult.clone(),
            }
        })
        .collect()
}

/// Build a RoLabelImg document for `filename` from DOTA objects
pub fn dota_to_annotation(
    objects: &[DotaObject],
    filename: &str,
    width: u32,
    height: u32,
) -> RoLabelAnnotation {
    let mut annotation = RoLabelAnnotation::new(filename, width, height);
    annotation.objects = objects
        .iter()
        .map(|object| AnnotationObject {
            name: object.name.clone(),
            difficult: object.difficult.clone(),
            bbox: polygon_to_center_box(&object.polygon),
        })
        .collect();
    annotation
}

/// Convert a directory of RoLabelImg XML files into DOTA TXT files
pub fn convert_rolabelimg_to_dota(args: &Ro2DotaArgs) -> Result<ProcessingStats> {
    let txt_dir = ensure_output_directory(&args.txt_dir)?;
    let xml_files = list_files_with_extension(&args.xml_dir, "xml")?;
    info!(
        "Found {} XML files in {}",
        xml_files.len(),
        args.xml_dir.display()
    );

    let mut stats = ProcessingStats::new();
    let pb = create_progress_bar(xml_files.len() as u64, "RoLabelImg -> DOTA");

    for xml_path in &xml_files {
        stats.increment_total();
        let result = convert_xml_file(xml_path, &txt_dir, args.canonical_order, &mut stats);
        pb.inc(1);
        result.inspect_err(|_| pb.abandon())?;
    }

    pb.finish_and_clear();
    Ok(stats)
}

fn convert_xml_file(
    xml_path: &Path,
    txt_dir: &Path,
    canonical_order: bool,
    stats: &mut ProcessingStats,
) -> Result<()> {
    let content = read_file(xml_path)?;
    let annotation =
        rolabelimg::parse_str(&content).map_err(|e| ConvertError::format(xml_path, e))?;

    let objects = annotation_to_dota(&annotation, canonical_order);
    let txt_path = sibling_path(txt_dir, xml_path, "txt");
    write_file(&txt_path, &dota::to_string(&objects))?;

    stats.add_objects(objects.len());
    stats.increment_successful();
    Ok(())
}

/// Convert a directory of DOTA TXT files into RoLabelImg XML files.
///
/// Each label file needs an image with the same name in `img_dir` to supply
/// the pixel size; label files without one are skipped.
pub fn convert_dota_to_rolabelimg(args: &Dota2RoArgs) -> Result<ProcessingStats> {
    let xml_dir = ensure_output_directory(&args.xml_dir)?;
    let txt_files = list_files_with_extension(&args.txt_dir, "txt")?;
    info!(
        "Found {} TXT files in {}",
        txt_files.len(),
        args.txt_dir.display()
    );

    let mut stats = ProcessingStats::new();
    let pb = create_progress_bar(txt_files.len() as u64, "DOTA -> RoLabelImg");

    for txt_path in &txt_files {
        stats.increment_total();
        let result = convert_txt_file(txt_path, &xml_dir, args, &pb, &mut stats);
        pb.inc(1);
        result.inspect_err(|_| pb.abandon())?;
    }

    pb.finish_and_clear();
    Ok(stats)
}

fn convert_txt_file(
    txt_path: &Path,
    xml_dir: &Path,
    args: &Dota2RoArgs,
    pb: &ProgressBar,
    stats: &mut ProcessingStats,
) -> Result<()> {
    let img_path = sibling_path(&args.img_dir, txt_path, args.img_ext.as_str());
    if !img_path.exists() {
        pb.suspend(|| {
            warn!(
                "Image file not found for {}, skipping: {}",
                txt_path.display(),
                img_path.display()
            )
        });
        stats.increment_skipped_missing_image();
        return Ok(());
    }

    let (width, height) = image_size(&img_path)?;
    let content = read_file(txt_path)?;
    let parsed = dota::parse_str(&content).map_err(|e| ConvertError::format(txt_path, e))?;
    stats.add_skipped_lines(parsed.skipped_lines);

    let filename = img_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let annotation = dota_to_annotation(&parsed.objects, &filename, width, height);
    let xml =
        rolabelimg::to_xml_string(&annotation).map_err(|e| ConvertError::format(txt_path, e))?;

    let xml_path = sibling_path(xml_dir, txt_path, "xml");
    write_file(&xml_path, &xml)?;

    stats.add_objects(annotation.objects.len());
    stats.increment_successful();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CenterBox, Polygon4};
    use std::f64::consts::FRAC_PI_2;

    fn sample_annotation(angle: f64) -> RoLabelAnnotation {
        let mut annotation = RoLabelAnnotation::new("img.jpg", 100, 100);
        annotation.objects.push(AnnotationObject {
            name: "plane".to_string(),
            difficult: "0".to_string(),
            bbox: CenterBox::new(5.0, 5.0, 4.0, 2.0, angle),
        });
        annotation
    }

    #[test]
    fn test_annotation_to_dota() {
        let objects = annotation_to_dota(&sample_annotation(0.0), false);
        assert_eq!(objects.len(), 1);
        assert_eq!(
            dota::format_line(&objects[0]),
            "3.0 4.0 7.0 4.0 7.0 6.0 3.0 6.0 plane 0"
        );
    }

    #[test]
    fn test_annotation_to_dota_canonical_order() {
        let as_built = annotation_to_dota(&sample_annotation(FRAC_PI_2), false);
        assert_eq!(
            as_built[0].polygon.coords(),
            [6.0, 3.0, 6.0, 7.0, 4.0, 7.0, 4.0, 3.0]
        );

        let canonical = annotation_to_dota(&sample_annotation(FRAC_PI_2), true);
        assert_eq!(
            canonical[0].polygon.coords(),
            [4.0, 3.0, 6.0, 3.0, 6.0, 7.0, 4.0, 7.0]
        );
    }

    #[test]
    fn test_dota_to_annotation() {
        let objects = vec![DotaObject {
            polygon: Polygon4::from_coords([0.0, 0.0, 4.0, 0.0, 4.0, 2.0, 0.0, 2.0]),
            name: "ship".to_string(),
            difficult: "1".to_string(),
        }];

        let annotation = dota_to_annotation(&objects, "P0001.jpg", 640, 480);

        assert_eq!(annotation.folder, "Unknown");
        assert_eq!(annotation.filename, "P0001.jpg");
        assert_eq!((annotation.size.width, annotation.size.height), (640, 480));
        assert_eq!(annotation.size.depth, 3);
        assert_eq!(annotation.objects[0].name, "ship");
        assert_eq!(annotation.objects[0].difficult, "1");
        assert_eq!(
            annotation.objects[0].bbox,
            CenterBox::new(2.0, 1.0, 4.0, 2.0, 0.0)
        );
    }
}
