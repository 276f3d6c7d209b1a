//! DOTA label files
//!
//! One object per line: `x1 y1 x2 y2 x3 y3 x4 y4 <class> <difficult>`.

use log::debug;

use crate::error::FormatError;
use crate::geometry::Polygon4;
use crate::types::DotaObject;

/// Minimum whitespace-separated tokens on an object line
pub const MIN_TOKENS: usize = 10;

/// Objects read from one DOTA file, plus the count of lines that were dropped
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedDota {
    pub objects: Vec<DotaObject>,
    pub skipped_lines: usize,
}

/// Parse a DOTA label file. Lines with fewer than ten tokens (including the
/// `imagesource:` and `gsd:` headers) are dropped.
pub fn parse_str(content: &str) -> Result<ParsedDota, FormatError> {
    let mut parsed = ParsedDota::default();

    for (index, line) in content.lines().enumerate() {
        match parse_line(line)? {
            Some(object) => parsed.objects.push(object),
            None => {
                if !line.trim().is_empty() {
                    debug!("Dropping line {}: {:?}", index + 1, line);
                }
                parsed.skipped_lines += 1;
            }
        }
    }

    Ok(parsed)
}

/// Parse one line; `Ok(None)` when it has too few tokens to be an object
pub fn parse_line(line: &str) -> Result<Option<DotaObject>, FormatError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < MIN_TOKENS {
        return Ok(None);
    }

    let mut coords = [0.0f64; 8];
    for (i, (slot, token)) in coords.iter_mut().zip(&parts[..8]).enumerate() {
        *slot = token.parse().map_err(|_| FormatError::InvalidNumber {
            field: coord_name(i),
            value: token.to_string(),
        })?;
    }

    Ok(Some(DotaObject {
        polygon: Polygon4::from_coords(coords),
        name: parts[8].to_string(),
        difficult: parts[9].to_string(),
    }))
}

fn coord_name(index: usize) -> String {
    let axis = if index % 2 == 0 { 'x' } else { 'y' };
    format!("{}{}", axis, index / 2 + 1)
}

/// Format one object as a DOTA line (no trailing newline)
pub fn format_line(object: &DotaObject) -> String {
    let mut line = String::with_capacity(64);
    for c in object.polygon.coords() {
        line.push_str(&format!("{:.1} ", c));
    }
    line.push_str(&object.name);
    line.push(' ');
    line.push_str(&object.difficult);
    line
}

/// Format a whole DOTA file, lines joined by `\n` without a trailing newline
pub fn to_string(objects: &[DotaObject]) -> String {
    objects.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let object = parse_line("3 4 7 4 7 6 3 6 plane 0").unwrap().unwrap();
        assert_eq!(
            object.polygon,
            Polygon4::from_coords([3.0, 4.0, 7.0, 4.0, 7.0, 6.0, 3.0, 6.0])
        );
        assert_eq!(object.name, "plane");
        assert_eq!(object.difficult, "0");
    }

    #[test]
    fn test_parse_line_ignores_extra_tokens() {
        let object = parse_line("1 2 3 4 5 6 7 8 ship 1 extra").unwrap().unwrap();
        assert_eq!(object.name, "ship");
        assert_eq!(object.difficult, "1");
    }

    #[test]
    fn test_parse_line_too_short() {
        assert_eq!(parse_line("1 2 3 4 5 6 7 8 ship").unwrap(), None);
        assert_eq!(parse_line("imagesource:GoogleEarth").unwrap(), None);
        assert_eq!(parse_line("").unwrap(), None);
    }

    #[test]
    fn test_parse_line_bad_number() {
        match parse_line("1 2 3 4 5 x 7 8 ship 0") {
            Err(FormatError::InvalidNumber { field, value }) => {
                assert_eq!(field, "y3");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_str_drops_headers_and_short_lines() {
        let content = "imagesource:GoogleEarth\ngsd:0.146\n\
                       3 4 7 4 7 6 3 6 plane 0\n\
                       1 2 3\n\
                       10.5 20 30 20 30 40 10.5 40 large-vehicle 1\n";
        let parsed = parse_str(content).unwrap();

        assert_eq!(parsed.objects.len(), 2);
        assert_eq!(parsed.skipped_lines, 3);
        assert_eq!(parsed.objects[1].name, "large-vehicle");
        assert_eq!(parsed.objects[1].polygon.points()[0].x, 10.5);
    }

    #[test]
    fn test_format_line() {
        let object = DotaObject {
            polygon: Polygon4::from_coords([3.0, 4.0, 7.0, 4.0, 7.0, 6.0, 3.0, -0.26]),
            name: "plane".to_string(),
            difficult: "0".to_string(),
        };
        assert_eq!(format_line(&object), "3.0 4.0 7.0 4.0 7.0 6.0 3.0 -0.3 plane 0");
    }

    #[test]
    fn test_to_string_has_no_trailing_newline() {
        let object = DotaObject {
            polygon: Polygon4::from_coords([0.0; 8]),
            name: "a".to_string(),
            difficult: "0".to_string(),
        };
        let text = to_string(&[object.clone(), object]);
        assert_eq!(text.lines().count(), 2);
        assert!(!text.ends_with('\n'));
        assert_eq!(to_string(&[]), "");
    }
}
