//! Indicator parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`IchimokuParams::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A window length of zero was configured.
    #[error("{name} window must be > 0")]
    ZeroWindow {
        /// Which window was zero.
        name: &'static str,
    },

    /// A window or the displacement exceeds [`IchimokuParams::MAX_LENGTH`].
    #[error("{name} of {value} exceeds the maximum of {max}")]
    TooLong {
        /// Which parameter was too long.
        name: &'static str,
        /// The configured value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },
}

/// Window lengths and displacement for the Ichimoku lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct IchimokuParams {
    /// Window of the fast midpoint (conversion line).
    pub conversion_window: usize,
    /// Window of the slow midpoint (base line).
    pub base_window: usize,
    /// Window of the extreme midpoint behind leading span B.
    pub span_b_window: usize,
    /// Bars by which the leading spans are cast forward and the lagging span
    /// is shifted back.
    pub displacement: usize,
}

impl IchimokuParams {
    /// Default conversion window.
    pub const DEFAULT_CONVERSION_WINDOW: usize = 9;
    /// Default base window.
    pub const DEFAULT_BASE_WINDOW: usize = 26;
    /// Default leading span B window.
    pub const DEFAULT_SPAN_B_WINDOW: usize = 52;
    /// Default displacement.
    pub const DEFAULT_DISPLACEMENT: usize = 26;

    /// Upper bound on every window and on the displacement.
    pub const MAX_LENGTH: usize = 100_000;

    /// Creates a new parameter set.
    #[must_use]
    pub const fn new(
        conversion_window: usize,
        base_window: usize,
        span_b_window: usize,
        displacement: usize,
    ) -> Self {
        Self {
            conversion_window,
            base_window,
            span_b_window,
            displacement,
        }
    }

    /// Checks that every window is non-empty and that no length exceeds
    /// [`MAX_LENGTH`](Self::MAX_LENGTH).
    ///
    /// A displacement of zero is allowed and plots the spans unshifted.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::ZeroWindow`] naming the first empty window, or
    /// [`ParamsError::TooLong`] naming the first oversized length.
    pub const fn validate(&self) -> Result<(), ParamsError> {
        let windows = [
            ("conversion", self.conversion_window),
            ("base", self.base_window),
            ("span B", self.span_b_window),
        ];

        let mut i = 0;
        while i < windows.len() {
            let (name, value) = windows[i];
            if value == 0 {
                return Err(ParamsError::ZeroWindow { name });
            }
            if value > Self::MAX_LENGTH {
                return Err(ParamsError::TooLong {
                    name,
                    value,
                    max: Self::MAX_LENGTH,
                });
            }
            i += 1;
        }

        if self.displacement > Self::MAX_LENGTH {
            return Err(ParamsError::TooLong {
                name: "displacement",
                value: self.displacement,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(())
    }

    /// Returns the number of bars needed before both leading spans exist.
    #[must_use]
    pub fn warmup(&self) -> usize {
        self.conversion_window
            .max(self.base_window)
            .max(self.span_b_window)
    }
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_CONVERSION_WINDOW,
            Self::DEFAULT_BASE_WINDOW,
            Self::DEFAULT_SPAN_B_WINDOW,
            Self::DEFAULT_DISPLACEMENT,
        )
    }
}

impl std::fmt::Display for IchimokuParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ichimoku({}, {}, {}, {})",
            self.conversion_window, self.base_window, self.span_b_window, self.displacement
        )
    }
}
