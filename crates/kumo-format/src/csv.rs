//! CSV output format.

use kumo_aggregate::Bar;
use kumo_live::RenderPayload;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Payloads are flattened into one row per projected timestamp; values that
/// are absent at a row are left empty. The `cloud` column carries the
/// direction of the segment covering the row, which together with the two
/// leading spans is enough to redraw every cloud polygon.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "start_time{d}open{d}high{d}low{d}close{d}tick_count")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.start_time.format("%Y-%m-%dT%H:%M:%SZ"),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.tick_count
            )?;
        }

        Ok(())
    }

    fn write_payload<W: Write + Send>(
        &self,
        payload: &RenderPayload,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "time{d}conversion_line{d}base_line{d}lagging_span{d}leading_span_a{d}leading_span_b{d}cloud"
            )?;
        }

        let mut cloud = vec![String::new(); payload.leading_span_a.len()];
        for segment in &payload.segments {
            for i in segment.indices() {
                if let Some(slot) = cloud.get_mut(i) {
                    *slot = segment.direction.to_string();
                }
            }
        }

        let raw = |series: &[kumo_live::PlotPoint], i: usize| {
            cell(series.get(i).and_then(|point| point.value))
        };

        for (i, (a, b)) in payload
            .leading_span_a
            .iter()
            .zip(&payload.leading_span_b)
            .enumerate()
        {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                a.time.format("%Y-%m-%dT%H:%M:%SZ"),
                raw(&payload.conversion_line, i),
                raw(&payload.base_line, i),
                raw(&payload.lagging_span, i),
                cell(a.value),
                cell(b.value),
                cloud[i]
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use kumo_aggregate::BarSeries;
    use kumo_indicator::IchimokuParams;
    use kumo_types::Interval;
    use std::io::Cursor;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap()
    }

    fn create_test_bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let price = 100.0 + i as f64;
                let time = start() + TimeDelta::minutes(i as i64);
                Bar::new(time, price, price + 1.0, price - 1.0, price + 0.5, 3)
            })
            .collect()
    }

    #[test]
    fn test_csv_bars() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(1), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("start_time,open,high,low,close,tick_count"));
        assert!(result.contains("2024-01-15T12:30:00Z,100,101,99,100.5,3"));
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(2), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("start_time"));
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&create_test_bars(1), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("start_time\topen\thigh"));
    }

    #[test]
    fn test_csv_payload_rows() {
        let series = BarSeries::from_bars(Interval::Minute1, create_test_bars(4)).unwrap();
        let payload = RenderPayload::build(series, &IchimokuParams::new(2, 2, 3, 2));
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new()
            .write_payload(&payload, &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        // Header plus 4 bars plus 2 projected rows.
        assert_eq!(lines.len(), 7);
        assert_eq!(
            lines[0],
            "time,conversion_line,base_line,lagging_span,leading_span_a,leading_span_b,cloud"
        );
        // First row: nothing defined except the lagging close of bar 2.
        assert_eq!(lines[1], "2024-01-15T12:30:00Z,,,102.5,,,");
        // Span A exists before span B, so no cloud yet.
        assert_eq!(lines[4], "2024-01-15T12:33:00Z,102.5,102.5,,100.5,,");
        // Last projected row: only the leading spans and their cloud.
        assert_eq!(lines[6], "2024-01-15T12:35:00Z,,,,102.5,102,bullish");
    }

    #[test]
    fn test_csv_cloud_column_matches_segments() {
        let series = BarSeries::from_bars(Interval::Minute1, create_test_bars(4)).unwrap();
        let payload = RenderPayload::build(series, &IchimokuParams::new(2, 2, 3, 2));
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::new()
            .with_header(false)
            .write_payload(&payload, &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let clouded: Vec<_> = result
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.ends_with(','))
            .map(|(i, _)| i)
            .collect();
        let covered: Vec<_> = payload.segments.iter().flat_map(|s| s.indices()).collect();
        assert_eq!(clouded, covered);
        assert_eq!(payload.polygons.len(), payload.segments.len());
    }

    #[test]
    fn test_default_matches_new() {
        let mut output = Cursor::new(Vec::new());

        CsvFormatter::default()
            .write_bars(&create_test_bars(1), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("start_time,open,high,low,close,tick_count\n"));
    }
}
