use std::fmt;
use std::time::Duration;

/// How long a stored secret stays retrievable.
///
/// The set is closed on purpose: callers pick from a fixed menu rather than
/// supplying arbitrary durations. An entry expires once the clock moves
/// strictly past `stored_at + duration()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeToLive {
    #[default]
    Hour,
    Day,
    Week,
    TwoWeeks,
}

impl TimeToLive {
    /// Absolute duration for this TTL class.
    pub fn duration(self) -> Duration {
        match self {
            TimeToLive::Hour => Duration::from_secs(60 * 60),
            TimeToLive::Day => Duration::from_secs(24 * 60 * 60),
            TimeToLive::Week => Duration::from_secs(7 * 24 * 60 * 60),
            TimeToLive::TwoWeeks => Duration::from_secs(14 * 24 * 60 * 60),
        }
    }

    /// Human-readable label, used in log messages.
    pub fn label(self) -> &'static str {
        match self {
            TimeToLive::Hour => "1 hour",
            TimeToLive::Day => "1 day",
            TimeToLive::Week => "1 week",
            TimeToLive::TwoWeeks => "2 weeks",
        }
    }

    /// Parses an external representation of a TTL class.
    ///
    /// Anything unrecognized falls back to [`TimeToLive::Hour`]. An unknown
    /// value is a caller-side glitch, not a reason to refuse the secret.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" | "1h" => TimeToLive::Hour,
            "day" | "1d" | "24h" => TimeToLive::Day,
            "week" | "1w" | "7d" => TimeToLive::Week,
            "two-weeks" | "twoweeks" | "2w" | "14d" => TimeToLive::TwoWeeks,
            _ => TimeToLive::Hour,
        }
    }
}

impl fmt::Display for TimeToLive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        assert_eq!(TimeToLive::Hour.duration(), Duration::from_secs(3_600));
        assert_eq!(TimeToLive::Day.duration(), Duration::from_secs(86_400));
        assert_eq!(TimeToLive::Week.duration(), Duration::from_secs(604_800));
        assert_eq!(
            TimeToLive::TwoWeeks.duration(),
            Duration::from_secs(1_209_600)
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(TimeToLive::Hour.label(), "1 hour");
        assert_eq!(TimeToLive::Day.label(), "1 day");
        assert_eq!(TimeToLive::Week.label(), "1 week");
        assert_eq!(TimeToLive::TwoWeeks.label(), "2 weeks");
    }

    #[test]
    fn test_parse_known_values() {
        assert_eq!(TimeToLive::parse("hour"), TimeToLive::Hour);
        assert_eq!(TimeToLive::parse("Day"), TimeToLive::Day);
        assert_eq!(TimeToLive::parse("  week "), TimeToLive::Week);
        assert_eq!(TimeToLive::parse("two-weeks"), TimeToLive::TwoWeeks);
        assert_eq!(TimeToLive::parse("2w"), TimeToLive::TwoWeeks);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_hour() {
        assert_eq!(TimeToLive::parse(""), TimeToLive::Hour);
        assert_eq!(TimeToLive::parse("fortnight"), TimeToLive::Hour);
        assert_eq!(TimeToLive::parse("3600"), TimeToLive::Hour);
    }

    #[test]
    fn test_default_is_hour() {
        assert_eq!(TimeToLive::default(), TimeToLive::Hour);
    }
}
