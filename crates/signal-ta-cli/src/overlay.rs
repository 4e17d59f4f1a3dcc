//! Presentation overlays added to each report row: the least-squares trend
//! of the close and the RSI zone.

use serde::Serialize;

/// RSI above this is overbought.
pub const OVERBOUGHT: f64 = 70.0;
/// RSI below this is oversold.
pub const OVERSOLD: f64 = 30.0;

/// Where an RSI value sits relative to the 30/70 bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    /// RSI > 70
    Overbought,
    /// 30 ≤ RSI ≤ 70
    Neutral,
    /// RSI < 30
    Oversold,
}

impl RsiZone {
    /// Classifies an RSI value.
    #[must_use]
    pub fn of(rsi: f64) -> Self {
        if rsi > OVERBOUGHT {
            Self::Overbought
        } else if rsi < OVERSOLD {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }

    /// Lowercase name used in CSV output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overbought => "overbought",
            Self::Neutral => "neutral",
            Self::Oversold => "oversold",
        }
    }
}

/// Fitted values of the ordinary least-squares line through
/// `(i, values[i])`.
///
/// A single point fits itself; an empty slice yields an empty vector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linear_trend(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return values.to_vec();
    }

    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / nf;

    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    (0..n).map(|i| intercept + slope * i as f64).collect()
}
