//! Turn context handed to a handler, and what the handler hands back

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Entity types extracted by the NLU layer from the current utterance
pub mod entities {
    pub const INTEREST_AREA: &str = "domaine";
    pub const PROGRAM: &str = "filiere";
    pub const INSTITUTION: &str = "etablissement";
}

/// Slots remembered by the dialogue framework across turns
pub mod slots {
    pub const INTEREST_AREA: &str = "domaine_interet";
    pub const CHOSEN_PROGRAM: &str = "filiere_choisie";
    pub const PREFERRED_CATEGORY: &str = "type_filiere_prefere";
    pub const LAST_INSTITUTION: &str = "dernier_etablissement";
}

/// Entities of the latest user message plus the remembered slots.
///
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    entities: Vec<(String, String)>,
    slots: HashMap<String, String>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity value from the latest message
    pub fn with_entity(mut self, entity: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.push((entity.into(), value.into()));
        self
    }

    /// Set a remembered slot
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// First value recognized for `entity` in the latest message
    pub fn latest_entity(&self, entity: &str) -> Option<&str> {
        self.entities
            .iter()
            .filter(|(name, _)| name == entity)
            .map(|(_, value)| value.trim())
            .find(|value| !value.is_empty())
    }

    pub fn slot(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// A remembered-value update for the framework to persist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSet {
    pub name: String,
    pub value: String,
}

/// Rendered reply: ordered text messages plus slot updates
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionResponse {
    pub messages: Vec<String>,
    pub events: Vec<SlotSet>,
}

impl ActionResponse {
    /// A reply made of a single message
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
            events: Vec::new(),
        }
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Ask the framework to remember `value` under `name`
    pub fn remember(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.events.push(SlotSet {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append another reply's messages and events
    pub fn extend(&mut self, other: ActionResponse) {
        self.messages.extend(other.messages);
        self.events.extend(other.events);
    }

    /// All messages joined with blank lines
    pub fn joined(&self) -> String {
        self.messages.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_entity_skips_blank_values() {
        let tracker = Tracker::new()
            .with_entity(entities::PROGRAM, "  ")
            .with_entity(entities::PROGRAM, "Chimie")
            .with_entity(entities::PROGRAM, "Physique");
        assert_eq!(tracker.latest_entity(entities::PROGRAM), Some("Chimie"));
        assert_eq!(tracker.latest_entity(entities::INSTITUTION), None);
    }

    #[test]
    fn test_blank_slot_is_absent() {
        let tracker = Tracker::new()
            .with_slot(slots::INTEREST_AREA, "")
            .with_slot(slots::PREFERRED_CATEGORY, "classique");
        assert_eq!(tracker.slot(slots::INTEREST_AREA), None);
        assert_eq!(tracker.slot(slots::PREFERRED_CATEGORY), Some("classique"));
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut response = ActionResponse::text("first").remember("a", "1");
        response.extend(ActionResponse::text("second").remember("b", "2"));
        assert_eq!(response.messages, vec!["first", "second"]);
        assert_eq!(response.events.len(), 2);
        assert_eq!(response.joined(), "first\n\nsecond");
    }
}
