/// Display tier for a WER value. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Good,    // WER <= 20
    Warning, // 20 < WER <= 50
    Bad,     // WER > 50
}

/// Fill color for districts with no metric data.
pub const NO_DATA_COLOR: &str = "#CCCCCC";

impl Tier {
    /// Map fill color for this tier.
    pub fn color(&self) -> &'static str {
        match self {
            Tier::Good => "#00ff00",    // bright green
            Tier::Warning => "#ffa500", // orange
            Tier::Bad => "#ff0000",     // bright red
        }
    }
}

/// Classify a WER percentage into a display tier.
///
/// Thresholds are fixed, boundaries inclusive to the lower tier. Negative
/// input falls through to `Good`: WER below zero is logically invalid but
/// never produced in practice, so it is passed through rather than rejected.
pub fn classify(wer: f64) -> Tier {
    if wer <= 20.0 {
        Tier::Good
    } else if wer <= 50.0 {
        Tier::Warning
    } else {
        Tier::Bad
    }
}
