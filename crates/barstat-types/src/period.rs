//! Calendar resampling periods.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar granularity used to bucket daily bars.
///
/// Each bucket is keyed by its period-end date: the date itself for days,
/// the Sunday closing the week, or the last calendar day of the month,
/// quarter or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bucket per calendar day.
    Day,
    /// Monday through Sunday.
    Week,
    /// Calendar month.
    #[default]
    Month,
    /// Calendar quarter.
    Quarter,
    /// Calendar year.
    Year,
}

impl Period {
    /// Returns the period-end date of the bucket containing `date`.
    #[must_use]
    pub fn period_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => date,
            Self::Week => {
                let remaining = 6 - date.weekday().num_days_from_monday();
                date.checked_add_days(Days::new(u64::from(remaining)))
                    .unwrap_or(NaiveDate::MAX)
            }
            Self::Month => month_end(date.year(), date.month()),
            Self::Quarter => month_end(date.year(), (date.month() - 1) / 3 * 3 + 3),
            Self::Year => month_end(date.year(), 12),
        }
    }

    /// Returns the period as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Returns all available periods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Day, Self::Week, Self::Month, Self::Quarter, Self::Year]
    }
}

/// Last calendar day of the given month.
fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d" | "1d" | "day" | "daily" => Ok(Self::Day),
            "w" | "1w" | "week" | "weekly" => Ok(Self::Week),
            "m" | "me" | "1m" | "month" | "monthly" => Ok(Self::Month),
            "q" | "qe" | "quarter" | "quarterly" => Ok(Self::Quarter),
            "y" | "a" | "ye" | "year" | "yearly" | "annual" => Ok(Self::Year),
            _ => Err(PeriodParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid period string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(String);

impl std::fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid period '{}', expected one of: ", self.0)?;
        for (i, period) in Period::all().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", period.as_str())?;
        }
        Ok(())
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_ends_on_sunday() {
        // 2024-01-03 is a Wednesday
        assert_eq!(Period::Week.period_end(date(2024, 1, 3)), date(2024, 1, 7));
        assert_eq!(Period::Week.period_end(date(2024, 1, 7)), date(2024, 1, 7));
        assert_eq!(Period::Week.period_end(date(2024, 1, 8)), date(2024, 1, 14));
    }

    #[test]
    fn test_month_end() {
        assert_eq!(Period::Month.period_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(Period::Month.period_end(date(2023, 2, 10)), date(2023, 2, 28));
        assert_eq!(Period::Month.period_end(date(2024, 12, 1)), date(2024, 12, 31));
    }

    #[test]
    fn test_quarter_and_year_end() {
        assert_eq!(Period::Quarter.period_end(date(2024, 5, 15)), date(2024, 6, 30));
        assert_eq!(Period::Quarter.period_end(date(2024, 11, 2)), date(2024, 12, 31));
        assert_eq!(Period::Year.period_end(date(2024, 3, 3)), date(2024, 12, 31));
        assert_eq!(Period::Day.period_end(date(2024, 3, 3)), date(2024, 3, 3));
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("month".parse::<Period>().unwrap(), Period::Month);
        assert_eq!("W".parse::<Period>().unwrap(), Period::Week);
        assert_eq!("daily".parse::<Period>().unwrap(), Period::Day);
        let err = "fortnight".parse::<Period>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid period 'fortnight', expected one of: day, week, month, quarter, year"
        );
    }
}
