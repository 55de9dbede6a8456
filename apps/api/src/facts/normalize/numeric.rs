//! Numeric cleaner for salary, year, age and CGPA style values.

use std::sync::LazyLock;

use regex::Regex;

use crate::facts::schema::SchemaKey;

static PLAIN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(,\d+)*(\.\d+)?%?$").unwrap());

static BARE_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// True for values like `350000`, `2,800,000`, `8.7` or `92%` (spaces ignored).
pub fn looks_numeric(value: &str) -> bool {
    PLAIN_NUMBER.is_match(&value.replace(' ', ""))
}

/// Strips thousands separators. Ages get a `years` unit, CGPAs are rendered
/// minimally (`9.0` → `9`, `8.70` → `8.7`). Percentages pass through.
pub fn clean_numeric(key: SchemaKey, raw: &str) -> String {
    let value = raw.replace(',', "").trim().to_string();

    if key == SchemaKey::Age {
        if BARE_INTEGER.is_match(&value) {
            return format!("{value} years");
        }
        return value;
    }

    if key.as_str().contains("CGPA") {
        return value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n.to_string())
            .unwrap_or(value);
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_gets_unit() {
        assert_eq!(clean_numeric(SchemaKey::Age, "35"), "35 years");
        assert_eq!(clean_numeric(SchemaKey::Age, " 35 "), "35 years");
        assert_eq!(clean_numeric(SchemaKey::Age, "35 years"), "35 years");
        assert_eq!(clean_numeric(SchemaKey::Age, "about 35"), "about 35");
    }

    #[test]
    fn test_salary_loses_thousands_separators() {
        assert_eq!(clean_numeric(SchemaKey::CurrentSalary, "2,800,000"), "2800000");
        assert_eq!(clean_numeric(SchemaKey::FirstRoleSalary, "3,50,000"), "350000");
    }

    #[test]
    fn test_cgpa_minimal_rendering() {
        assert_eq!(clean_numeric(SchemaKey::UndergraduateCgpa, "8.70"), "8.7");
        assert_eq!(clean_numeric(SchemaKey::GraduationCgpa, "9.0"), "9");
        assert_eq!(clean_numeric(SchemaKey::GraduationCgpa, "9.2"), "9.2");
        assert_eq!(clean_numeric(SchemaKey::GraduationCgpa, "9.2/10"), "9.2/10");
    }

    #[test]
    fn test_currency_and_percent_pass_through() {
        assert_eq!(clean_numeric(SchemaKey::CurrentSalaryCurrency, "INR"), "INR");
        assert_eq!(clean_numeric(SchemaKey::FirstName, "1,5%"), "15%");
    }

    #[test]
    fn test_looks_numeric() {
        assert!(looks_numeric("2,800,000"));
        assert!(looks_numeric("8.7"));
        assert!(looks_numeric("92 %"));
        assert!(!looks_numeric("IIT Delhi"));
        assert!(!looks_numeric(""));
        assert!(!looks_numeric("1,2,"));
    }
}
