//! Ichimoku line computation.

use kumo_aggregate::Bar;
use serde::{Deserialize, Serialize};

use crate::{IchimokuParams, rolling_midpoint};

/// The five Ichimoku series derived from one bar history.
///
/// `conversion_line`, `base_line` and `lagging_span` are indexed like the
/// bars they came from. The leading spans are indexed on the projected
/// timeline: position `i + displacement` holds the value computed from bar
/// `i`, so they are `displacement` entries longer than the bar history and
/// start with `displacement` absent values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Fast midpoint of extremes.
    pub conversion_line: Vec<Option<f64>>,
    /// Slow midpoint of extremes.
    pub base_line: Vec<Option<f64>>,
    /// Average of conversion and base, cast forward.
    pub leading_span_a: Vec<Option<f64>>,
    /// Midpoint of the longest window, cast forward.
    pub leading_span_b: Vec<Option<f64>>,
    /// Close price shifted back.
    pub lagging_span: Vec<Option<f64>>,
    /// Displacement the spans were shifted by.
    pub displacement: usize,
}

impl IndicatorSet {
    /// Returns the number of bar positions (raw timeline length).
    #[must_use]
    pub const fn raw_len(&self) -> usize {
        self.conversion_line.len()
    }

    /// Returns the length of the projected timeline used by the leading spans.
    #[must_use]
    pub const fn projected_len(&self) -> usize {
        self.leading_span_a.len()
    }

    /// Returns true if the set was computed from an empty history.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.conversion_line.is_empty()
    }
}

/// Recomputes every Ichimoku line from scratch.
///
/// Pure and deterministic: the same bars and parameters always give the same
/// set. Positions whose window is not yet full are `None`. An empty history
/// gives an empty set.
///
/// `params` should have passed [`IchimokuParams::validate`]; the projected
/// spans allocate `displacement` extra slots.
#[must_use]
pub fn compute(bars: &[Bar], params: &IchimokuParams) -> IndicatorSet {
    let displacement = params.displacement;
    if bars.is_empty() {
        return IndicatorSet {
            displacement,
            ..IndicatorSet::default()
        };
    }

    let highs: Vec<f64> = bars.iter().map(|bar| bar.high).collect();
    let lows: Vec<f64> = bars.iter().map(|bar| bar.low).collect();

    let conversion_line = rolling_midpoint(&highs, &lows, params.conversion_window);
    let base_line = rolling_midpoint(&highs, &lows, params.base_window);
    let span_b_source = rolling_midpoint(&highs, &lows, params.span_b_window);

    let span_a_source = conversion_line
        .iter()
        .zip(&base_line)
        .map(|(conversion, base)| Some((conversion.as_ref()? + base.as_ref()?) / 2.0));

    let leading_span_a = project_forward(span_a_source, displacement);
    let leading_span_b = project_forward(span_b_source, displacement);

    let lagging_span = lag_closes(bars, displacement);

    IndicatorSet {
        conversion_line,
        base_line,
        leading_span_a,
        leading_span_b,
        lagging_span,
        displacement,
    }
}

/// Close of bar `i + displacement` at each index `i`.
fn lag_closes(bars: &[Bar], displacement: usize) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|i| {
            i.checked_add(displacement)
                .and_then(|j| bars.get(j))
                .map(|bar| bar.close)
        })
        .collect()
}

/// Prefixes `displacement` gaps so the value from bar `i` lands at `i + displacement`.
fn project_forward(
    values: impl IntoIterator<Item = Option<f64>>,
    displacement: usize,
) -> Vec<Option<f64>> {
    std::iter::repeat_n(None, displacement).chain(values).collect()
}
