//! Responder - one handler per conversational action
//!
//! A handler reads the entity or remembered slot it needs from the
//! `Tracker`, queries the store and renders a French text reply:
//! - missing input ends the turn with a clarifying question
//! - an empty result renders a "not found" message (with suggestions or a
//!   fallback listing where the action defines one)
//! - a storage failure is logged and rendered as an apology

pub mod action;
pub mod tracker;
mod catalog;
mod enrollment;
mod orientation;

pub use action::Action;
pub use tracker::{ActionResponse, SlotSet, Tracker, entities, slots};

use crate::Result;
use crate::config::UniversityInfo;
use crate::model::ProgramCategory;
use crate::storage::SqliteStore;

/// Programs listed by the orientation handler
pub const ORIENTATION_LIMIT: usize = 5;
/// Near-matches offered when a program lookup misses
pub const DETAIL_SUGGESTION_LIMIT: usize = 3;
pub const COMPARISON_LIMIT: usize = 3;
pub const SUGGESTION_LIMIT: usize = 3;
/// Characters of description shown per suggestion
pub const SUGGESTION_DESCRIPTION_CHARS: usize = 100;

const APOLOGY: &str = "Désolé, je n'arrive pas à consulter la base de données pour le moment. \
     Veuillez réessayer dans quelques instants.";

/// Runs actions against a catalog store
pub struct Responder<'a> {
    store: &'a SqliteStore,
    university: &'a UniversityInfo,
}

impl<'a> Responder<'a> {
    pub fn new(store: &'a SqliteStore, university: &'a UniversityInfo) -> Self {
        Self { store, university }
    }

    /// Run one action for the current turn. Never fails: storage errors
    /// become an apology message.
    pub fn run(&self, action: Action, tracker: &Tracker) -> ActionResponse {
        tracing::info!("Running {}", action);
        match self.dispatch(action, tracker) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("{} failed: {}", action, e);
                ActionResponse::text(APOLOGY)
            }
        }
    }

    /// Run an action given its framework name
    pub fn run_named(&self, name: &str, tracker: &Tracker) -> Result<ActionResponse> {
        let action: Action = name.parse()?;
        Ok(self.run(action, tracker))
    }

    fn dispatch(&self, action: Action, tracker: &Tracker) -> Result<ActionResponse> {
        match action {
            Action::GuideOrientation => self.guide_orientation(tracker),
            Action::ProgramDetail => self.program_detail(tracker),
            Action::ListInstitutions => self.list_institutions(),
            Action::EnrollmentGuide => self.enrollment_guide(),
            Action::VocationalPrograms => self.featured_programs(ProgramCategory::Vocational),
            Action::AcademicPrograms => self.featured_programs(ProgramCategory::Academic),
            Action::ComparePrograms => self.compare_programs(tracker),
            Action::SuggestPrograms => self.suggest_programs(tracker),
            Action::PracticalInfo => self.practical_info(),
            Action::InstitutionPrograms => self.institution_programs(tracker),
        }
    }
}

/// Line announcing the items a capped listing left out
fn remaining_line(total: usize, shown: usize, noun: &str) -> Option<String> {
    (total > shown).then(|| format!("Et {} {}...\n", total - shown, noun))
}

/// Optional text field, or a placeholder
fn field(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("non précisé")
}

/// Cut `text` to at most `max` characters, marking the cut with "..."
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_line() {
        assert_eq!(remaining_line(3, 5, "autres formations"), None);
        assert_eq!(remaining_line(5, 5, "autres formations"), None);
        assert_eq!(remaining_line(8, 5, "autres formations").as_deref(), Some("Et 3 autres formations...\n"));
    }

    #[test]
    fn test_truncate_counts_characters() {
        let accented = "é".repeat(120);
        let cut = truncate_chars(&accented, 100);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));

        assert_eq!(truncate_chars("court", 100), "court");
    }

    #[test]
    fn test_field_placeholder() {
        assert_eq!(field(&None), "non précisé");
        assert_eq!(field(&Some(String::new())), "non précisé");
        assert_eq!(field(&Some("3 ans".into())), "3 ans");
    }

    #[test]
    fn test_every_action_renders_without_input() {
        let store = SqliteStore::open_in_memory().unwrap();
        let university = UniversityInfo::default();
        let responder = Responder::new(&store, &university);

        for action in Action::all() {
            let response = responder.run(*action, &Tracker::new());
            assert!(!response.messages.is_empty(), "{} produced no message", action);
            assert!(response.messages.iter().all(|m| m != APOLOGY));
        }
    }

    #[test]
    fn test_run_named_rejects_unknown() {
        let store = SqliteStore::open_in_memory().unwrap();
        let university = UniversityInfo::default();
        let responder = Responder::new(&store, &university);

        assert!(responder.run_named("action_unknown", &Tracker::new()).is_err());
        assert!(responder.run_named("action_liste_etablissements", &Tracker::new()).is_ok());
    }

    #[test]
    fn test_storage_failure_renders_apology() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        let store = SqliteStore::open(&path).unwrap();
        let university = UniversityInfo::default();
        let responder = Responder::new(&store, &university);

        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch("DROP TABLE important_dates").unwrap();
        drop(conn);

        let response = responder.run(Action::PracticalInfo, &Tracker::new());
        assert_eq!(response.messages, vec![APOLOGY.to_string()]);
        assert!(response.events.is_empty());
    }
}
