use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow};

// @module: Frame rate arithmetic and rational time conversion

/// Frame rates commonly accepted by Final Cut Pro. Other values still
/// convert, the CLI just warns about them.
pub const KNOWN_FRAME_RATES: [&str; 8] = ["23.98", "24", "25", "29.97", "30", "50", "59.94", "60"];

/// Rounds `value` to `decimals` fractional digits by adding 0.5 to the
/// scaled value and truncating toward zero.
///
/// FCP's rational time strings were historically produced with
/// truncation-based rounding, so every timing computation in the
/// builder must route through this function rather than `f64::round`.
/// At the negative half (`custom_round(-0.5, 0)`) truncation yields 0.
pub fn custom_round(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier + 0.5).trunc() / multiplier
}

/// A nominal frame rate, either a whole number of frames per second or
/// an NTSC-style fractional rate (29.97, 59.94, 23.98).
///
/// The two variants are structurally different: integer rates use a
/// 100-based rational frame duration, NTSC rates a 1001-based one. The
/// tag, not the numeric value, decides which branch fires, so `24` and
/// `24.0` behave differently by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRate {
    Integer(u32),
    Ntsc(f64),
}

impl FrameRate {
    /// Nominal rate as a real number.
    pub fn fps(&self) -> f64 {
        match self {
            Self::Integer(rate) => f64::from(*rate),
            Self::Ntsc(rate) => *rate,
        }
    }

    /// Rational frame duration as it is embedded in the format
    /// resource: `100/{rate*100}` or `1001/{N*1000}` with N the rate
    /// rounded to a whole number.
    pub fn rational_string(&self) -> String {
        match self {
            Self::Integer(rate) => format!("100/{}", rate * 100),
            Self::Ntsc(rate) => {
                let nominal = custom_round(*rate, 0);
                format!("1001/{}", (nominal * 1000.0) as i64)
            }
        }
    }

    /// Frame duration in seconds.
    pub fn duration_decimal(&self) -> f64 {
        let (molecular, denominator) = self.rational_pair();
        molecular / denominator
    }

    /// Numerator/denominator pair of the rational frame duration, kept
    /// as f64 because the builder's timing math stays in real-number
    /// precision until the final formatting step.
    pub fn rational_pair(&self) -> (f64, f64) {
        match self {
            Self::Integer(rate) => (100.0, f64::from(rate * 100)),
            Self::Ntsc(rate) => (1001.0, custom_round(*rate, 0) * 1000.0),
        }
    }

    /// Whole-number rate used in the format resource name.
    pub fn rounded_fps(&self) -> i64 {
        custom_round(self.fps(), 0) as i64
    }

    /// True when the rate is outside the set FCP is known to accept.
    pub fn is_unusual(&self) -> bool {
        !KNOWN_FRAME_RATES.contains(&self.to_string().as_str())
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(rate) => write!(f, "{}", rate),
            Self::Ntsc(rate) => write!(f, "{}", rate),
        }
    }
}

impl FromStr for FrameRate {
    type Err = anyhow::Error;

    /// A fractional component selects the NTSC branch; anything else
    /// is an integer rate. There is no whitelist of known rates here.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.contains('.') {
            let rate: f64 = trimmed
                .parse()
                .map_err(|_| anyhow!("Invalid frame rate: {}", s))?;
            Ok(Self::Ntsc(rate))
        } else {
            let rate: u32 = trimmed
                .parse()
                .map_err(|_| anyhow!("Invalid frame rate: {}", s))?;
            Ok(Self::Integer(rate))
        }
    }
}

/// Per-build timing constants derived from the configured frame rate.
/// Recomputed for every build, never stored in config.
#[derive(Debug, Clone, Copy)]
pub struct FrameRateProfile {
    /// Nominal rate as a real number.
    pub frame_rate_float: f64,

    /// Duration of one frame in seconds.
    pub frame_duration_decimal: f64,

    /// Numerator of the rational frame duration.
    pub molecular: f64,

    /// Denominator of the rational frame duration.
    pub denominator: f64,

    /// Fixed epoch offset, in rational-time units, before which no
    /// content is placed. Every title's clip-internal start is pinned
    /// to this constant.
    pub project_start_ticks: f64,
}

impl FrameRateProfile {
    pub fn new(rate: FrameRate) -> Self {
        let (molecular, denominator) = rate.rational_pair();
        FrameRateProfile {
            frame_rate_float: rate.fps(),
            frame_duration_decimal: rate.duration_decimal(),
            molecular,
            denominator,
            project_start_ticks: 3.6 * denominator * molecular,
        }
    }
}
