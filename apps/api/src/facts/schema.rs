//! Schema Registry: the fixed, ordered set of 37 fact keys.
//!
//! Every other module asks this one for ordering, membership and the
//! formatting family of a key. The set is closed: parsing any other string
//! fails with [`SchemaError::InvalidKey`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid schema key: '{0}'")]
    InvalidKey(String),
}

/// One of the 37 fact identifiers, declared in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemaKey {
    FirstName,
    LastName,
    DateOfBirth,
    BirthCity,
    BirthState,
    Age,
    BloodGroup,
    Nationality,
    FirstRoleJoiningDate,
    FirstRoleDesignation,
    FirstRoleSalary,
    FirstRoleSalaryCurrency,
    CurrentOrganization,
    CurrentJoiningDate,
    CurrentDesignation,
    CurrentSalary,
    CurrentSalaryCurrency,
    PreviousOrganization,
    PreviousJoiningDate,
    PreviousEndYear,
    PreviousStartingDesignation,
    HighSchool,
    TwelfthPassOutYear,
    TwelfthBoardScore,
    UndergraduateDegree,
    UndergraduateCollege,
    UndergraduateYear,
    UndergraduateCgpa,
    GraduationDegree,
    GraduationCollege,
    GraduationYear,
    GraduationCgpa,
    Certifications1,
    Certifications2,
    Certifications3,
    Certifications4,
    TechnicalProficiency,
}

/// Number of keys in the schema.
pub const KEY_COUNT: usize = 37;

/// All keys in canonical order. Position `i` has index `i + 1`.
pub const ALL_KEYS: [SchemaKey; KEY_COUNT] = [
    SchemaKey::FirstName,
    SchemaKey::LastName,
    SchemaKey::DateOfBirth,
    SchemaKey::BirthCity,
    SchemaKey::BirthState,
    SchemaKey::Age,
    SchemaKey::BloodGroup,
    SchemaKey::Nationality,
    SchemaKey::FirstRoleJoiningDate,
    SchemaKey::FirstRoleDesignation,
    SchemaKey::FirstRoleSalary,
    SchemaKey::FirstRoleSalaryCurrency,
    SchemaKey::CurrentOrganization,
    SchemaKey::CurrentJoiningDate,
    SchemaKey::CurrentDesignation,
    SchemaKey::CurrentSalary,
    SchemaKey::CurrentSalaryCurrency,
    SchemaKey::PreviousOrganization,
    SchemaKey::PreviousJoiningDate,
    SchemaKey::PreviousEndYear,
    SchemaKey::PreviousStartingDesignation,
    SchemaKey::HighSchool,
    SchemaKey::TwelfthPassOutYear,
    SchemaKey::TwelfthBoardScore,
    SchemaKey::UndergraduateDegree,
    SchemaKey::UndergraduateCollege,
    SchemaKey::UndergraduateYear,
    SchemaKey::UndergraduateCgpa,
    SchemaKey::GraduationDegree,
    SchemaKey::GraduationCollege,
    SchemaKey::GraduationYear,
    SchemaKey::GraduationCgpa,
    SchemaKey::Certifications1,
    SchemaKey::Certifications2,
    SchemaKey::Certifications3,
    SchemaKey::Certifications4,
    SchemaKey::TechnicalProficiency,
];

/// Keys rendered as `<day> <Month> <year>`.
const DATE_KEYS: &[SchemaKey] = &[
    SchemaKey::DateOfBirth,
    SchemaKey::FirstRoleJoiningDate,
    SchemaKey::CurrentJoiningDate,
    SchemaKey::PreviousJoiningDate,
];

/// Substrings (case-insensitive) that mark a key as numeric-ish.
const NUMERIC_INDICATORS: &[&str] = &["salary", "cgpa", "score", "year", "date", "joining", "age"];

/// Formatting family of a key. Checked in declaration order: a key that is
/// both a date and numeric-ish is a `Date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Date,
    Score,
    Numeric,
    FreeText,
}

static FAMILIES: LazyLock<[KeyFamily; KEY_COUNT]> =
    LazyLock::new(|| ALL_KEYS.map(classify));

fn classify(key: SchemaKey) -> KeyFamily {
    let name = key.as_str().to_lowercase();
    if DATE_KEYS.contains(&key) {
        KeyFamily::Date
    } else if name.contains("score") {
        KeyFamily::Score
    } else if NUMERIC_INDICATORS.iter().any(|ind| name.contains(ind)) {
        KeyFamily::Numeric
    } else {
        KeyFamily::FreeText
    }
}

impl SchemaKey {
    /// The exact key string used on the wire and in the spreadsheet.
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKey::FirstName => "First Name",
            SchemaKey::LastName => "Last Name",
            SchemaKey::DateOfBirth => "Date of Birth",
            SchemaKey::BirthCity => "Birth City",
            SchemaKey::BirthState => "Birth State",
            SchemaKey::Age => "Age",
            SchemaKey::BloodGroup => "Blood Group",
            SchemaKey::Nationality => "Nationality",
            SchemaKey::FirstRoleJoiningDate => "Joining Date of first professional role",
            SchemaKey::FirstRoleDesignation => "Designation of first professional role",
            SchemaKey::FirstRoleSalary => "Salary of first professional role",
            SchemaKey::FirstRoleSalaryCurrency => "Salary currency of first professional role",
            SchemaKey::CurrentOrganization => "Current Organization",
            SchemaKey::CurrentJoiningDate => "Current Joining Date",
            SchemaKey::CurrentDesignation => "Current Designation",
            SchemaKey::CurrentSalary => "Current Salary",
            SchemaKey::CurrentSalaryCurrency => "Current Salary Currency",
            SchemaKey::PreviousOrganization => "Previous Organization",
            SchemaKey::PreviousJoiningDate => "Previous Joining Date",
            SchemaKey::PreviousEndYear => "Previous end year",
            SchemaKey::PreviousStartingDesignation => "Previous Starting Designation",
            SchemaKey::HighSchool => "High School",
            SchemaKey::TwelfthPassOutYear => "12th standard pass out year",
            SchemaKey::TwelfthBoardScore => "12th overall board score",
            SchemaKey::UndergraduateDegree => "Undergraduate degree",
            SchemaKey::UndergraduateCollege => "Undergraduate college",
            SchemaKey::UndergraduateYear => "Undergraduate year",
            SchemaKey::UndergraduateCgpa => "Undergraduate CGPA",
            SchemaKey::GraduationDegree => "Graduation degree",
            SchemaKey::GraduationCollege => "Graduation college",
            SchemaKey::GraduationYear => "Graduation year",
            SchemaKey::GraduationCgpa => "Graduation CGPA",
            SchemaKey::Certifications1 => "Certifications 1",
            SchemaKey::Certifications2 => "Certifications 2",
            SchemaKey::Certifications3 => "Certifications 3",
            SchemaKey::Certifications4 => "Certifications 4",
            SchemaKey::TechnicalProficiency => "Technical Proficiency",
        }
    }

    /// 1-based canonical position.
    pub fn index(self) -> usize {
        self as usize + 1
    }

    pub fn family(self) -> KeyFamily {
        FAMILIES[self as usize]
    }

    /// 1..=4 for the certification keys, `None` otherwise.
    pub fn certification_ordinal(self) -> Option<u8> {
        match self {
            SchemaKey::Certifications1 => Some(1),
            SchemaKey::Certifications2 => Some(2),
            SchemaKey::Certifications3 => Some(3),
            SchemaKey::Certifications4 => Some(4),
            _ => None,
        }
    }
}

/// Ordered sequence of all keys.
pub fn keys() -> &'static [SchemaKey; KEY_COUNT] {
    &ALL_KEYS
}

/// 1-based position of `key`.
pub fn index_of(key: SchemaKey) -> usize {
    key.index()
}

/// Whether `name` is one of the schema's key strings (exact match).
pub fn contains(name: &str) -> bool {
    name.parse::<SchemaKey>().is_ok()
}

impl FromStr for SchemaKey {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KEYS
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SchemaError::InvalidKey(s.to_string()))
    }
}

impl TryFrom<String> for SchemaKey {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchemaKey> for String {
    fn from(key: SchemaKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_37_unique_keys() {
        let names: HashSet<_> = keys().iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), KEY_COUNT);
    }

    #[test]
    fn test_index_matches_position() {
        for (pos, key) in keys().iter().enumerate() {
            assert_eq!(index_of(*key), pos + 1);
        }
        assert_eq!(SchemaKey::FirstName.index(), 1);
        assert_eq!(SchemaKey::TechnicalProficiency.index(), 37);
    }

    #[test]
    fn test_from_str_round_trips_every_key() {
        for key in keys() {
            assert_eq!(key.as_str().parse::<SchemaKey>(), Ok(*key));
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = "Favourite Colour".parse::<SchemaKey>().unwrap_err();
        assert_eq!(err, SchemaError::InvalidKey("Favourite Colour".to_string()));
        assert!(!contains("Favourite Colour"));
        assert!(!contains("first name"));
        assert!(contains("First Name"));
    }

    #[test]
    fn test_families() {
        assert_eq!(SchemaKey::DateOfBirth.family(), KeyFamily::Date);
        assert_eq!(SchemaKey::CurrentJoiningDate.family(), KeyFamily::Date);
        assert_eq!(SchemaKey::TwelfthBoardScore.family(), KeyFamily::Score);
        assert_eq!(SchemaKey::Age.family(), KeyFamily::Numeric);
        assert_eq!(SchemaKey::CurrentSalary.family(), KeyFamily::Numeric);
        assert_eq!(SchemaKey::CurrentSalaryCurrency.family(), KeyFamily::Numeric);
        assert_eq!(SchemaKey::GraduationCgpa.family(), KeyFamily::Numeric);
        assert_eq!(SchemaKey::PreviousEndYear.family(), KeyFamily::Numeric);
        assert_eq!(SchemaKey::PreviousStartingDesignation.family(), KeyFamily::FreeText);
        assert_eq!(SchemaKey::UndergraduateCollege.family(), KeyFamily::FreeText);
        assert_eq!(SchemaKey::Certifications3.family(), KeyFamily::FreeText);
    }

    #[test]
    fn test_serde_uses_key_strings() {
        let json = serde_json::to_string(&SchemaKey::HighSchool).unwrap();
        assert_eq!(json, r#""High School""#);
        let key: SchemaKey = serde_json::from_str(r#""Graduation CGPA""#).unwrap();
        assert_eq!(key, SchemaKey::GraduationCgpa);
        assert!(serde_json::from_str::<SchemaKey>(r#""Shoe Size""#).is_err());
    }
}
