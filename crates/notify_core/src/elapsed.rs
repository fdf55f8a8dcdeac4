/// Wall-clock time between an execution's start date and "now", in
/// milliseconds.
///
/// Start and end readings may come from different hosts. A negative
/// difference is clamped to zero and flagged through [`ElapsedTime::was_clamped`]
/// so callers can log the skew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    millis: u64,
    clamped: bool,
}

impl ElapsedTime {
    pub fn between(start_ms: i64, now_ms: i64) -> Self {
        let delta = now_ms.saturating_sub(start_ms);
        Self {
            millis: u64::try_from(delta).unwrap_or(0),
            clamped: delta < 0,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self {
            millis,
            clamped: false,
        }
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn was_clamped(&self) -> bool {
        self.clamped
    }

    /// Seconds with the shortest decimal rendering: `4000` -> `4`,
    /// `4012` -> `4.012`, `4100` -> `4.1`.
    pub fn as_seconds_text(&self) -> String {
        let whole = self.millis / 1_000;
        let fraction = self.millis % 1_000;
        if fraction == 0 {
            return whole.to_string();
        }
        let digits = format!("{fraction:03}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}
