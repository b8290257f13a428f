use serde::Serialize;

/// Performance band for a composite score.
///
/// | Range   | Band        |
/// |---------|-------------|
/// | < 60    | Fail        |
/// | 60–69   | Pass        |
/// | 70–79   | Good        |
/// | 80–89   | Excellent   |
/// | >= 90   | Outstanding |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Band {
    Fail,
    Pass,
    Good,
    Excellent,
    Outstanding,
}

impl Band {
    /// Bands in ascending score order.
    pub const ALL: [Band; 5] = [
        Band::Fail,
        Band::Pass,
        Band::Good,
        Band::Excellent,
        Band::Outstanding,
    ];

    /// Inclusive score range label, e.g. `"60-69"`.
    pub fn label(self) -> &'static str {
        match self {
            Band::Fail => "0-59",
            Band::Pass => "60-69",
            Band::Good => "70-79",
            Band::Excellent => "80-89",
            Band::Outstanding => "90-100",
        }
    }

    pub fn range(self) -> (u32, u32) {
        match self {
            Band::Fail => (0, 59),
            Band::Pass => (60, 69),
            Band::Good => (70, 79),
            Band::Excellent => (80, 89),
            Band::Outstanding => (90, 100),
        }
    }
}

/// Converts a composite score into its [`Band`]. Thresholds are half-open;
/// anything at or above 90 is `Outstanding`.
pub fn band(score: f64) -> Band {
    match score {
        s if s < 60.0 => Band::Fail,
        s if s < 70.0 => Band::Pass,
        s if s < 80.0 => Band::Good,
        s if s < 90.0 => Band::Excellent,
        _ => Band::Outstanding,
    }
}
