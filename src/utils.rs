use indicatif::{ProgressBar, ProgressStyle};

/// Format a float as its shortest round-trip text, always keeping a
/// fractional digit (`2.0`, not `2`)
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(2.0), "2.0");
        assert_eq!(format_decimal(-0.0), "-0.0");
        assert_eq!(format_decimal(0.7854), "0.7854");
        assert_eq!(format_decimal(123.4), "123.4");
        assert_eq!(format_decimal(-1.5708), "-1.5708");
    }
}
