use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description, OffsetDateTime};

const US_NUMERIC: &[BorrowedFormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");
const DAY_MONTH_YEAR: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");
const DOT_SEPARATED: &[BorrowedFormatItem<'static>] = format_description!("[day].[month].[year]");
const ISO: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// How record dates are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    #[default]
    UsNumeric,
    DayMonthYear,
    DotSeparated,
    Iso,
}

impl DateStyle {
    pub const ALL: [DateStyle; 4] = [
        DateStyle::UsNumeric,
        DateStyle::DayMonthYear,
        DateStyle::DotSeparated,
        DateStyle::Iso,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DateStyle::UsNumeric => "Month/Day/Year",
            DateStyle::DayMonthYear => "Day/Month/Year",
            DateStyle::DotSeparated => "Day.Month.Year",
            DateStyle::Iso => "ISO 8601",
        }
    }

    /// Stable identifier used in form controls.
    pub fn key(&self) -> &'static str {
        match self {
            DateStyle::UsNumeric => "us_numeric",
            DateStyle::DayMonthYear => "day_month_year",
            DateStyle::DotSeparated => "dot_separated",
            DateStyle::Iso => "iso",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.key() == key)
    }

    pub fn format(&self, moment: OffsetDateTime) -> String {
        let description = match self {
            DateStyle::UsNumeric => US_NUMERIC,
            DateStyle::DayMonthYear => DAY_MONTH_YEAR,
            DateStyle::DotSeparated => DOT_SEPARATED,
            DateStyle::Iso => ISO,
        };
        moment
            .format(description)
            .unwrap_or_else(|_| moment.date().to_string())
    }
}

/// Current wall-clock time, in the local offset when the platform exposes it.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn every_style_formats_the_calendar_date() {
        let moment = datetime!(2026-03-07 18:30 UTC);

        assert_eq!(DateStyle::UsNumeric.format(moment), "3/7/2026");
        assert_eq!(DateStyle::DayMonthYear.format(moment), "07/03/2026");
        assert_eq!(DateStyle::DotSeparated.format(moment), "07.03.2026");
        assert_eq!(DateStyle::Iso.format(moment), "2026-03-07");
    }

    #[test]
    fn keys_map_back_to_styles() {
        for style in DateStyle::ALL {
            assert_eq!(DateStyle::from_key(style.key()), Some(style));
        }
        assert_eq!(DateStyle::from_key("lunar"), None);
    }
}
