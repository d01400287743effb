//! Location fix output formatting
//!
//! Formatters turn a single location sample into log or export text.
//! The screen uses the text form for per-fix logging; the demo binary
//! uses the JSON and CSV forms for export output.

use crate::core::types::LocationSample;

/// Renders one location sample as a line of output
pub trait FixFormatter {
    fn format(&self, sample: &LocationSample) -> String;
}

/// Human-readable formatter matching the log line of the screen
pub struct TextFormatter;

impl FixFormatter for TextFormatter {
    fn format(&self, sample: &LocationSample) -> String {
        format!(
            "latitude={}, longitude={}",
            sample.position.latitude, sample.position.longitude
        )
    }
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self { pretty: false }
    }
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pretty-printing JSON formatter
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl FixFormatter for JsonFormatter {
    fn format(&self, sample: &LocationSample) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(sample)
        } else {
            serde_json::to_string(sample)
        };
        rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}

/// CSV formatter for data logging
pub struct CsvFormatter {
    /// Include header row before the first sample
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self {
            include_header: true,
        }
    }
}

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the CSV header
    pub fn header(&self) -> String {
        "timestamp_ms,latitude,longitude".to_string()
    }

    /// Format a whole trace, with the header when configured
    pub fn format_trace(&self, samples: &[LocationSample]) -> String {
        let mut lines = Vec::with_capacity(samples.len() + 1);
        if self.include_header {
            lines.push(self.header());
        }
        for sample in samples {
            lines.push(self.row(sample));
        }
        lines.join("\n")
    }

    fn row(&self, sample: &LocationSample) -> String {
        format!(
            "{},{},{}",
            sample.timestamp_ms, sample.position.latitude, sample.position.longitude
        )
    }
}

impl FixFormatter for CsvFormatter {
    fn format(&self, sample: &LocationSample) -> String {
        self.row(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LatLng;

    fn sample() -> LocationSample {
        LocationSample::new(LatLng::new(36.3195, 127.366), 1500)
    }

    #[test]
    fn test_text_format() {
        let line = TextFormatter.format(&sample());
        assert_eq!(line, "latitude=36.3195, longitude=127.366");
    }

    #[test]
    fn test_json_format_round_trips() {
        let formatted = JsonFormatter::new().format(&sample());
        let parsed: LocationSample = serde_json::from_str(&formatted).unwrap();
        assert_eq!(parsed, sample());
        assert!(!formatted.contains('\n'));
    }

    #[test]
    fn test_json_pretty_format() {
        let formatted = JsonFormatter::pretty().format(&sample());
        assert!(formatted.contains('\n'));
        let parsed: LocationSample = serde_json::from_str(&formatted).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_csv_row_and_header() {
        let formatter = CsvFormatter::new();
        assert_eq!(formatter.header(), "timestamp_ms,latitude,longitude");
        assert_eq!(formatter.format(&sample()), "1500,36.3195,127.366");
    }

    #[test]
    fn test_csv_trace_includes_header_once() {
        let trace = vec![sample(), LocationSample::new(LatLng::new(36.32, 127.367), 4500)];
        let rendered = CsvFormatter::new().format_trace(&trace);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp_ms,latitude,longitude");
        assert_eq!(lines[1], "1500,36.3195,127.366");
    }

    #[test]
    fn test_formatters_usable_as_trait_objects() {
        let formatters: Vec<Box<dyn FixFormatter>> = vec![
            Box::new(TextFormatter),
            Box::new(JsonFormatter::new()),
            Box::new(CsvFormatter::new()),
        ];
        for formatter in &formatters {
            assert!(!formatter.format(&sample()).is_empty());
        }
    }
}
