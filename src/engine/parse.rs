//! Text parsing for user answers.
//!
//! All raw-text inspection lives here so the orchestrator and response
//! templates never pick apart strings themselves.

use regex::Regex;

/// Digit-form timeframe, e.g. "3 months", "1 year", "10days".
const TIMELINE_PATTERN: &str = r"(?i)(\d+)\s*(day|week|month|year)s?";

/// A calendar unit in a timeframe answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    /// Fixed conversion table. Months and years use the flat 30/365
    /// approximation; the result is cosmetic text, not a schedule.
    pub fn days(&self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

/// A recognized timeframe extracted from a timeline answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub amount: u32,
    pub unit: TimeUnit,
}

impl Timeline {
    /// Widened to u64 so an extreme but valid amount (the validator accepts
    /// any digit string that fits u32) cannot overflow the multiply.
    pub fn total_days(&self) -> u64 {
        u64::from(self.amount) * u64::from(self.unit.days())
    }
}

/// Extract the first `<integer> <unit>` timeframe from the input, if any.
///
/// Case-insensitive, plural optional, whitespace between number and unit
/// optional. Spelled-out numbers ("two months") are not recognized.
pub fn parse_timeline(input: &str) -> Option<Timeline> {
    let re = Regex::new(TIMELINE_PATTERN).ok()?;
    let caps = re.captures(input)?;
    let amount: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = match caps.get(2)?.as_str().to_lowercase().as_str() {
        "day" => TimeUnit::Day,
        "week" => TimeUnit::Week,
        "month" => TimeUnit::Month,
        "year" => TimeUnit::Year,
        _ => return None,
    };
    Some(Timeline { amount, unit })
}

/// Whether the input contains a recognizable timeframe at all.
pub fn contains_timeframe(input: &str) -> bool {
    parse_timeline(input).is_some()
}

/// Split a metrics answer into individual items.
///
/// Items are separated by newlines or commas; each item is trimmed and
/// empty items are dropped.
pub fn split_metrics(input: &str) -> Vec<String> {
    input
        .split(['\n', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_day_table() {
        let cases = [
            ("3 months", 90),
            ("1 year", 365),
            ("10 days", 10),
            ("2 weeks", 14),
            ("1 day", 1),
        ];
        for (input, expected_days) in cases {
            let timeline = parse_timeline(input).unwrap();
            assert_eq!(timeline.total_days(), expected_days, "input: {input}");
        }
    }

    #[test]
    fn huge_amounts_do_not_overflow_total_days() {
        let timeline = parse_timeline("4000000000 years").unwrap();
        assert_eq!(timeline.total_days(), 4_000_000_000 * 365);
        let timeline = parse_timeline("4294967295 years").unwrap();
        assert_eq!(timeline.total_days(), 4_294_967_295 * 365);
    }

    #[test]
    fn amounts_beyond_u32_do_not_parse() {
        assert!(parse_timeline("99999999999 years").is_none());
    }

    #[test]
    fn timeline_is_case_insensitive_and_spacing_tolerant() {
        assert_eq!(parse_timeline("6 Months").unwrap().total_days(), 180);
        assert_eq!(parse_timeline("6months").unwrap().total_days(), 180);
        assert_eq!(parse_timeline("about 6 MONTHS or so").unwrap().total_days(), 180);
    }

    #[test]
    fn timeline_singular_and_plural_both_match() {
        assert_eq!(parse_timeline("1 week").unwrap().total_days(), 7);
        assert_eq!(parse_timeline("3 weeks").unwrap().total_days(), 21);
    }

    #[test]
    fn spelled_out_numbers_do_not_match() {
        assert!(parse_timeline("two months").is_none());
        assert!(parse_timeline("a year").is_none());
        assert!(parse_timeline("soon").is_none());
        assert!(!contains_timeframe("sometime next spring"));
    }

    #[test]
    fn metric_splitting_is_stable() {
        assert_eq!(split_metrics("a\nb, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn metric_splitting_trims_and_drops_empties() {
        assert_eq!(split_metrics("  a  ,, \n , b \n\n"), vec!["a", "b"]);
        assert!(split_metrics("").is_empty());
        assert!(split_metrics(" , ,\n").is_empty());
    }

    #[test]
    fn metric_splitting_keeps_bullet_prefixes() {
        let items = split_metrics("- run 5k\n- run 10k\n- finish marathon");
        assert_eq!(items, vec!["- run 5k", "- run 10k", "- finish marathon"]);
    }
}
