//! Date canonicalizer. Output is always `<day> <FullMonthName> <year>`,
//! e.g. `15 March 1989`; anything it cannot read is returned trimmed.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Tried in order, first success wins. Slash dates are read month-first and
/// only fall back to day-first when the month field is out of range.
const LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%d.%m.%Y",
    "%Y.%m.%d",
    "%m-%d-%Y",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static YEAR_FIRST_WITH_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}[-/.]\d{1,2}[-/.]\d{1,2})[T ]").unwrap());

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

pub fn canonicalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    parse_layouts(s)
        .or_else(|| parse_digit_runs(s))
        .or_else(|| parse_month_name(s))
        .map(render)
        .unwrap_or_else(|| s.to_string())
}

fn render(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), date.format("%B"), date.year())
}

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    (date.year() >= 1000).then_some(date)
}

fn parse_layouts(s: &str) -> Option<NaiveDate> {
    // "2012-07-01T00:00:00" and "2012-07-01 09:30" keep only the date part
    let candidate = YEAR_FIRST_WITH_TIME
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map_or(s, |m| m.as_str());

    LAYOUTS
        .iter()
        .filter_map(|layout| NaiveDate::parse_from_str(candidate, layout).ok())
        .find_map(plausible)
}

/// Reads the first three digit runs as y/m/d when the first run has four
/// digits. Otherwise the last run is the year and, like the layouts above,
/// slash dates are month-first with a day-first fallback while other
/// separators are day-first. Two-digit years above 30 are 19xx, the rest 20xx.
fn parse_digit_runs(s: &str) -> Option<NaiveDate> {
    let runs: Vec<&str> = DIGIT_RUN.find_iter(s).map(|m| m.as_str()).take(3).collect();
    if runs.len() < 3 {
        return None;
    }

    if runs[0].len() == 4 {
        return ymd(runs[0].parse().ok()?, runs[1], runs[2]);
    }

    let year = runs[2].parse::<i32>().ok()?;
    let year = match runs[2].len() {
        2 if year > 30 => 1900 + year,
        2 => 2000 + year,
        _ => year,
    };

    if s.contains('/') {
        ymd(year, runs[0], runs[1]).or_else(|| ymd(year, runs[1], runs[0]))
    } else {
        ymd(year, runs[1], runs[0])
    }
}

fn ymd(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?).and_then(plausible)
}

/// Finds a full month name and takes the day from the nearest numeric token
/// before it and the year from the nearest four-digit token.
fn parse_month_name(s: &str) -> Option<NaiveDate> {
    let without_commas = s.replace(',', "");
    let words: Vec<&str> = without_commas.split_whitespace().collect();

    let (pos, month) = words.iter().enumerate().find_map(|(i, w)| {
        let lower = w.to_lowercase();
        MONTHS
            .iter()
            .position(|m| *m == lower)
            .map(|m| (i, m as u32 + 1))
    })?;

    let day = words[..pos]
        .iter()
        .rev()
        .map(|w| digits_of(w))
        .find(|d| !d.is_empty())
        .and_then(|d| d.parse::<u32>().ok())
        .filter(|d| (1..=31).contains(d))
        .or_else(|| {
            words
                .iter()
                .filter(|w| is_number(w))
                .filter_map(|w| w.parse::<u32>().ok())
                .find(|d| (1..=31).contains(d))
        })?;

    let year = words
        .get(pos + 1)
        .map(|w| digits_of(w))
        .filter(|y| y.len() == 4)
        .or_else(|| {
            words
                .iter()
                .rev()
                .find(|w| is_number(w) && w.len() == 4)
                .map(|w| w.to_string())
        })?
        .parse::<i32>()
        .ok()?;

    NaiveDate::from_ymd_opt(year, month, day).and_then(plausible)
}

fn digits_of(word: &str) -> String {
    word.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date() {
        assert_eq!(canonicalize_date("2012-07-01"), "1 July 2012");
        assert_eq!(canonicalize_date("1989-03-15"), "15 March 1989");
    }

    #[test]
    fn test_day_first_dash() {
        assert_eq!(canonicalize_date("01-07-2012"), "1 July 2012");
    }

    #[test]
    fn test_slash_date_reads_month_first() {
        assert_eq!(canonicalize_date("07/01/2012"), "1 July 2012");
    }

    #[test]
    fn test_slash_date_falls_back_to_day_first() {
        assert_eq!(canonicalize_date("15/03/1989"), "15 March 1989");
    }

    #[test]
    fn test_verbose_forms() {
        assert_eq!(canonicalize_date("1 July 2012"), "1 July 2012");
        assert_eq!(canonicalize_date("15 March 1989"), "15 March 1989");
        assert_eq!(canonicalize_date("March 15, 1989"), "15 March 1989");
        assert_eq!(canonicalize_date("15 Mar 1989"), "15 March 1989");
    }

    #[test]
    fn test_dotted_dates() {
        assert_eq!(canonicalize_date("15.03.1989"), "15 March 1989");
        assert_eq!(canonicalize_date("1989.03.15"), "15 March 1989");
    }

    #[test]
    fn test_time_portion_is_ignored() {
        assert_eq!(canonicalize_date("2021-06-15T00:00:00"), "15 June 2021");
        assert_eq!(canonicalize_date("2021-06-15 09:30"), "15 June 2021");
    }

    #[test]
    fn test_digit_runs_with_two_digit_year() {
        assert_eq!(canonicalize_date("DOB 15-03-89"), "15 March 1989");
        assert_eq!(canonicalize_date("joined 1_7_12"), "1 July 2012");
    }

    #[test]
    fn test_slash_date_with_two_digit_year_matches_four_digit_reading() {
        assert_eq!(canonicalize_date("07/01/12"), "1 July 2012");
        assert_eq!(canonicalize_date("07/01/12"), canonicalize_date("07/01/2012"));
        assert_eq!(canonicalize_date("15/03/89"), "15 March 1989");
        assert_eq!(canonicalize_date("07-01-12"), "7 January 2012");
    }

    #[test]
    fn test_month_name_with_ordinal_day() {
        assert_eq!(canonicalize_date("15th March 1989"), "15 March 1989");
        assert_eq!(canonicalize_date("born on 1st of July in 2012"), "1 July 2012");
    }

    #[test]
    fn test_unparseable_returns_trimmed_original() {
        assert_eq!(canonicalize_date("  not a date  "), "not a date");
        assert_eq!(canonicalize_date("Today"), "Today");
        assert_eq!(canonicalize_date("March 1989"), "March 1989");
        assert_eq!(canonicalize_date("31-02-2012"), "31-02-2012");
    }

    #[test]
    fn test_empty_stays_empty() {
        assert_eq!(canonicalize_date("   "), "");
    }

    #[test]
    fn test_canonical_output_is_stable() {
        for raw in ["2012-07-01", "07/01/2012", "15th March 1989", "nonsense 1 2 3"] {
            let once = canonicalize_date(raw);
            assert_eq!(canonicalize_date(&once), once);
        }
    }
}
