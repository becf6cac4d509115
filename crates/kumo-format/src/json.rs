//! JSON output format.

use kumo_aggregate::Bar;
use kumo_live::RenderPayload;
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// In NDJSON style each bar is one line, and each payload is one line, so a
/// live run appends one frame per redraw.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    fn write_document<T, W>(&self, value: &T, mut writer: W) -> Result<(), FormatError>
    where
        T: serde::Serialize + ?Sized,
        W: Write,
    {
        if self.pretty && self.style == JsonStyle::Array {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => self.write_document(bars, writer),
            JsonStyle::Ndjson => {
                for bar in bars {
                    serde_json::to_writer(&mut writer, bar)?;
                    writeln!(writer)?;
                }
                Ok(())
            }
        }
    }

    fn write_payload<W: Write + Send>(
        &self,
        payload: &RenderPayload,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_document(payload, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};
    use kumo_aggregate::BarSeries;
    use kumo_indicator::IchimokuParams;
    use kumo_types::Interval;
    use std::io::Cursor;

    fn create_test_bars(n: usize) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let price = 1.0 + i as f64;
                Bar::new(
                    start + TimeDelta::minutes(i as i64),
                    price,
                    price + 0.5,
                    price - 0.5,
                    price + 0.25,
                    2,
                )
            })
            .collect()
    }

    #[test]
    fn test_json_array() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(2), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["open"], 2.0);
        assert_eq!(parsed[1]["tick_count"], 2);
    }

    #[test]
    fn test_ndjson_bars() {
        let formatter = JsonFormatter::ndjson();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(3), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.lines().count(), 3);
        for line in result.lines() {
            let bar: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(bar["high"].as_f64().unwrap() >= bar["low"].as_f64().unwrap());
        }
        assert_eq!(formatter.extension(), "ndjson");
    }

    #[test]
    fn test_ndjson_payload_is_one_line() {
        let series = BarSeries::from_bars(Interval::Minute1, create_test_bars(5)).unwrap();
        let payload = RenderPayload::build(series, &IchimokuParams::new(2, 3, 4, 1));
        let formatter = JsonFormatter::ndjson().with_pretty(true);
        let mut output = Cursor::new(Vec::new());

        formatter.write_payload(&payload, &mut output).unwrap();
        formatter.write_payload(&payload, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result.lines().count(), 2);
        let first: RenderPayload = serde_json::from_str(result.lines().next().unwrap()).unwrap();
        assert_eq!(first, payload);
    }

    #[test]
    fn test_pretty_array() {
        let formatter = JsonFormatter::new().with_pretty(true);
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(1), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.lines().count() > 1);
        assert_eq!(formatter.extension(), "json");
    }
}
