//! Action names the dialogue framework can invoke

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Programs matching an interest area
    GuideOrientation,
    /// Full detail of one program
    ProgramDetail,
    /// Every institution with its program count
    ListInstitutions,
    /// Steps, documents and dates of pre-enrollment
    EnrollmentGuide,
    /// Vocational programs of the featured institution
    VocationalPrograms,
    /// Academic programs of the featured institution
    AcademicPrograms,
    /// A program next to similarly named ones
    ComparePrograms,
    /// Suggestions from remembered preferences
    SuggestPrograms,
    /// Required documents, dates and contacts
    PracticalInfo,
    /// Programs of one institution, grouped by category
    InstitutionPrograms,
}

impl Action {
    /// Name used by the dialogue framework
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GuideOrientation => "action_guide_orientation",
            Action::ProgramDetail => "action_detail_filiere",
            Action::ListInstitutions => "action_liste_etablissements",
            Action::EnrollmentGuide => "action_guide_preinscription",
            Action::VocationalPrograms => "action_filieres_professionnelles_science",
            Action::AcademicPrograms => "action_filieres_classiques_science",
            Action::ComparePrograms => "action_comparer_filieres",
            Action::SuggestPrograms => "action_suggest_filieres",
            Action::PracticalInfo => "action_informations_pratiques",
            Action::InstitutionPrograms => "action_filieres_etablissement",
        }
    }

    pub fn all() -> &'static [Action] {
        &[
            Action::GuideOrientation,
            Action::ProgramDetail,
            Action::ListInstitutions,
            Action::EnrollmentGuide,
            Action::VocationalPrograms,
            Action::AcademicPrograms,
            Action::ComparePrograms,
            Action::SuggestPrograms,
            Action::PracticalInfo,
            Action::InstitutionPrograms,
        ]
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Action::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| Error::UnknownAction(s.to_string()))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_roundtrip() {
        for action in Action::all() {
            let parsed: Action = action.as_str().parse().unwrap();
            assert_eq!(*action, parsed);
        }
    }

    #[test]
    fn test_unknown_action() {
        let err = Action::from_str("action_unknown").unwrap_err();
        assert!(matches!(err, Error::UnknownAction(name) if name == "action_unknown"));
    }
}
