//! Catalog records - typed rows returned by the store
//!
//! Every query maps its rows into one of these records:
//! - `Institution`: faculty, institute or school
//! - `Program`: a filière joined with its institution's name
//! - `ProgramDetail`: a program plus the institution's contact fields
//! - `InterestArea`, `EnrollmentStep`, `RequiredDocument`, `ImportantDate`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Program category. The enumeration is closed: any other stored value
/// is a data-entry error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramCategory {
    /// Direct professional preparation ("professionnelle")
    Vocational,
    /// Theoretical grounding and research pathways ("classique")
    Academic,
}

impl ProgramCategory {
    /// Stored and displayed form
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramCategory::Vocational => "professionnelle",
            ProgramCategory::Academic => "classique",
        }
    }

    pub fn all() -> &'static [ProgramCategory] {
        &[ProgramCategory::Vocational, ProgramCategory::Academic]
    }

    /// Listing icon used in replies
    pub fn icon(&self) -> &'static str {
        match self {
            ProgramCategory::Vocational => "🎯",
            ProgramCategory::Academic => "📚",
        }
    }

    /// Stored form with a leading capital ("Professionnelle")
    pub fn capitalized(&self) -> &'static str {
        match self {
            ProgramCategory::Vocational => "Professionnelle",
            ProgramCategory::Academic => "Classique",
        }
    }
}

impl FromStr for ProgramCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "professionnelle" | "professionnel" | "pro" | "vocational" => Ok(ProgramCategory::Vocational),
            "classique" | "academic" | "academique" | "académique" => Ok(ProgramCategory::Academic),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProgramCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstitutionKind {
    Faculty,
    Institute,
    School,
}

impl InstitutionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstitutionKind::Faculty => "Faculté",
            InstitutionKind::Institute => "Institut",
            InstitutionKind::School => "École",
        }
    }
}

impl FromStr for InstitutionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "faculté" | "faculte" | "faculty" => Ok(InstitutionKind::Faculty),
            "institut" | "institute" => Ok(InstitutionKind::Institute),
            "école" | "ecole" | "school" => Ok(InstitutionKind::School),
            _ => Err(Error::UnknownInstitutionKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: i64,
    pub name: String,
    pub kind: InstitutionKind,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub website: Option<String>,
}

/// A program row joined with its owning institution's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub category: ProgramCategory,
    pub duration: Option<String>,
    pub description: Option<String>,
    /// Career outcomes ("débouchés")
    pub outcomes: Option<String>,
    pub admission_conditions: Option<String>,
    pub institution_id: i64,
    pub tuition_fee: Option<String>,
    pub institution_name: String,
}

impl Program {
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Case-insensitive containment test against name or description
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description_or_empty().to_lowercase().contains(&needle)
    }
}

/// A program with the owning institution's contact fields, as returned
/// by the single-program lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDetail {
    pub program: Program,
    pub institution_contact: Option<String>,
    pub institution_website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestArea {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentStep {
    pub step: u32,
    pub description: String,
    pub details: Option<String>,
    pub useful_links: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredDocument {
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
}

/// Dates are ISO `YYYY-MM-DD` strings; ordering is lexical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantDate {
    pub event: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub academic_year: String,
}

impl ImportantDate {
    /// End date when it differs from the start date
    pub fn distinct_end(&self) -> Option<&str> {
        self.end_date
            .as_deref()
            .filter(|end| !end.is_empty() && *end != self.start_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in ProgramCategory::all() {
            let parsed: ProgramCategory = category.as_str().parse().unwrap();
            assert_eq!(*category, parsed);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(ProgramCategory::from_str("mixte").is_err());
        assert!(ProgramCategory::from_str("").is_err());
    }

    #[test]
    fn test_institution_kind_aliases() {
        assert_eq!(InstitutionKind::from_str("Faculté").unwrap(), InstitutionKind::Faculty);
        assert_eq!(InstitutionKind::from_str("ecole").unwrap(), InstitutionKind::School);
        assert_eq!(InstitutionKind::from_str("Institut").unwrap(), InstitutionKind::Institute);
    }

    #[test]
    fn test_distinct_end() {
        let mut date = ImportantDate {
            event: "Clôture préinscription".into(),
            start_date: "2024-07-15".into(),
            end_date: Some("2024-07-15".into()),
            academic_year: "2024-2025".into(),
        };
        assert_eq!(date.distinct_end(), None);

        date.end_date = Some("2024-07-30".into());
        assert_eq!(date.distinct_end(), Some("2024-07-30"));
    }
}
