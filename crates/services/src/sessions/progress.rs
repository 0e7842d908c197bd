use chrono::Duration;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

/// Format a duration as `MM:SS` for the countdown and result screens.
///
/// Negative durations render as `00:00`; minutes above 99 keep their full
/// width rather than wrapping.
#[must_use]
pub fn format_mm_ss(duration: Duration) -> String {
    let total_secs = duration.num_seconds().max(0);
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(Duration::seconds(204)), "03:24");
        assert_eq!(format_mm_ss(Duration::seconds(0)), "00:00");
        assert_eq!(format_mm_ss(Duration::seconds(600)), "10:00");
    }

    #[test]
    fn clamps_negative_to_zero() {
        assert_eq!(format_mm_ss(Duration::seconds(-5)), "00:00");
    }

    #[test]
    fn wide_minutes_keep_full_width() {
        assert_eq!(format_mm_ss(Duration::seconds(6000)), "100:00");
    }
}
