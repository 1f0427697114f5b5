//! Month name resolution and the year-independent month predicate

use chrono::{Datelike, NaiveDate};

/// Year month names are resolved against
const REFERENCE_YEAR: i32 = 2000;

/// Resolve an English month name ("March", "mar", " DECEMBER ") to 1-12.
///
/// The name is parsed as the first day of that month in a fixed reference
/// year, so the result never depends on the current date.
pub fn month_name_to_index(name: &str) -> Option<u32> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{} 1 {}", name, REFERENCE_YEAR), "%B %d %Y")
        .ok()
        .map(|date| date.month())
}

/// Matches records sold in one calendar month of any year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    Month(u32),
    /// The requested name did not resolve; nothing matches
    Unresolved,
}

impl MonthFilter {
    pub fn from_name(name: &str) -> Self {
        match month_name_to_index(name) {
            Some(month) => MonthFilter::Month(month),
            None => MonthFilter::Unresolved,
        }
    }

    pub fn index(&self) -> Option<u32> {
        match self {
            MonthFilter::Month(month) => Some(*month),
            MonthFilter::Unresolved => None,
        }
    }

    pub fn matches<D: Datelike>(&self, date: &D) -> bool {
        match self {
            MonthFilter::Month(month) => date.month() == *month,
            MonthFilter::Unresolved => false,
        }
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthFilter::Month(month) => write!(f, "month={}", month),
            MonthFilter::Unresolved => write!(f, "month=<unresolved>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_all_month_names() {
        let names = [
            "January", "February", "March", "April", "May", "June",
            "July", "August", "September", "October", "November", "December",
        ];
        for (i, name) in names.iter().enumerate() {
            assert_eq!(month_name_to_index(name), Some(i as u32 + 1), "{}", name);
        }
    }

    #[test]
    fn test_case_whitespace_and_abbreviations() {
        assert_eq!(month_name_to_index("march"), Some(3));
        assert_eq!(month_name_to_index("  DECEMBER "), Some(12));
        assert_eq!(month_name_to_index("Sep"), Some(9));
        assert_eq!(month_name_to_index("feb"), Some(2));
    }

    #[test]
    fn test_unresolvable_names() {
        assert_eq!(month_name_to_index(""), None);
        assert_eq!(month_name_to_index("   "), None);
        assert_eq!(month_name_to_index("Marchember"), None);
        assert_eq!(month_name_to_index("Monday"), None);
        assert_eq!(month_name_to_index("13"), None);
    }

    #[test]
    fn test_month_filter_ignores_year() {
        let filter = MonthFilter::from_name("March");
        assert_eq!(filter.index(), Some(3));
        assert!(filter.matches(&Utc.with_ymd_and_hms(2021, 3, 31, 23, 0, 0).unwrap()));
        assert!(filter.matches(&Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap()));
        assert!(!filter.matches(&Utc.with_ymd_and_hms(2022, 4, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_unresolved_filter_matches_nothing() {
        let filter = MonthFilter::from_name("Smarch");
        assert_eq!(filter, MonthFilter::Unresolved);
        assert_eq!(filter.index(), None);
        assert!(!filter.matches(&Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap()));
    }
}
