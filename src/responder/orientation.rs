//! Interest-driven handlers: orientation, program detail, comparison, suggestions

use crate::Result;
use crate::model::ProgramCategory;
use super::tracker::{entities, slots};
use super::{
    ActionResponse, COMPARISON_LIMIT, DETAIL_SUGGESTION_LIMIT, ORIENTATION_LIMIT, Responder,
    SUGGESTION_DESCRIPTION_CHARS, SUGGESTION_LIMIT, Tracker, field, remaining_line, truncate_chars,
};

impl Responder<'_> {
    pub(super) fn guide_orientation(&self, tracker: &Tracker) -> Result<ActionResponse> {
        let Some(area) = tracker.latest_entity(entities::INTEREST_AREA) else {
            return Ok(ActionResponse::text(
                "Pour mieux vous orienter, pourriez-vous me préciser votre domaine d'intérêt ? \
                 (sciences, santé, droit, technologie, commerce, etc.)",
            ));
        };

        let programs = self.store.get_programs_by_interest_area(area)?;

        if programs.is_empty() {
            tracing::debug!("No program for interest area '{}', listing institutions", area);
            let mut response = ActionResponse::text(format!(
                "Je n'ai pas trouvé de filières spécifiques pour le domaine '{}'. \
                 Voici plutôt toutes nos formations disponibles :",
                area
            ));

            let mut listing = String::from("Établissements disponibles :\n");
            for institution in self.store.list_institutions()? {
                listing.push_str(&format!(
                    "• {} - {}\n",
                    institution.name,
                    institution.description.as_deref().unwrap_or("")
                ));
            }
            response.say(listing);
            return Ok(response);
        }

        let mut text = format!("Voici les filières correspondant à vos intérêts en '{}':\n\n", area);

        for program in programs.iter().take(ORIENTATION_LIMIT) {
            text.push_str(&format!(
                "{} **{}** ({})\n",
                program.category.icon(),
                program.name,
                program.category
            ));
            text.push_str(&format!("   📍 {}\n", program.institution_name));
            text.push_str(&format!("   ⏱️ {}\n", field(&program.duration)));
            text.push_str(&format!("   💰 {}\n\n", field(&program.tuition_fee)));
        }

        if let Some(line) = remaining_line(programs.len(), ORIENTATION_LIMIT, "autres formations") {
            text.push_str(&line);
        }
        text.push_str("Pour plus de détails sur une filière spécifique, dites-moi son nom !");

        Ok(ActionResponse::text(text).remember(slots::INTEREST_AREA, area))
    }

    pub(super) fn program_detail(&self, tracker: &Tracker) -> Result<ActionResponse> {
        let Some(query) = tracker.latest_entity(entities::PROGRAM) else {
            return Ok(ActionResponse::text("De quelle filière souhaitez-vous connaître les détails ?"));
        };

        let Some(detail) = self.store.get_program_details(query)? else {
            let similar = self.store.search_programs(query)?;
            if similar.is_empty() {
                return Ok(ActionResponse::text(format!(
                    "Je n'ai pas trouvé la filière '{}'. Vérifiez l'orthographe ou consultez \
                     la liste complète des filières.",
                    query
                )));
            }

            let mut text = format!("Je n'ai pas trouvé '{}' exactement. Peut-être cherchez-vous :\n", query);
            for program in similar.iter().take(DETAIL_SUGGESTION_LIMIT) {
                text.push_str(&format!("• {}\n", program.name));
            }
            if let Some(line) = remaining_line(similar.len(), DETAIL_SUGGESTION_LIMIT, "autres filières") {
                text.push_str(&line);
            }
            return Ok(ActionResponse::text(text));
        };

        let program = &detail.program;
        let mut text = format!("🎓 **{}**\n\n", program.name);
        text.push_str(&format!("**Type :** {}\n", program.category.capitalized()));
        text.push_str(&format!("**Durée :** {}\n", field(&program.duration)));
        text.push_str(&format!("**Établissement :** {}\n", program.institution_name));
        text.push_str(&format!("**Frais d'inscription :** {}\n\n", field(&program.tuition_fee)));
        text.push_str(&format!("**Description :**\n{}\n\n", program.description_or_empty()));

        if let Some(outcomes) = program.outcomes.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("**Débouchés :**\n{}\n\n", outcomes));
        }
        if let Some(conditions) = program.admission_conditions.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("**Conditions d'admission :**\n{}\n\n", conditions));
        }
        if let Some(contact) = detail.institution_contact.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("**Contact :** {}\n", contact));
        }
        if let Some(website) = detail.institution_website.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("**Site web :** {}", website));
        }

        Ok(ActionResponse::text(text.trim_end().to_string())
            .remember(slots::CHOSEN_PROGRAM, program.name.clone()))
    }

    pub(super) fn compare_programs(&self, tracker: &Tracker) -> Result<ActionResponse> {
        let Some(query) = tracker.latest_entity(entities::PROGRAM) else {
            return Ok(ActionResponse::text("Quelle filière souhaitez-vous que je compare ?"));
        };

        let Some(detail) = self.store.get_program_details(query)? else {
            return Ok(ActionResponse::text(format!("Je n'ai pas trouvé la filière '{}'.", query)));
        };

        let name = &detail.program.name;
        let keyword = name.split_whitespace().last().unwrap_or(name.as_str());
        let similar = self.store.search_programs(keyword)?;
        tracing::debug!("Comparing '{}' by keyword '{}': {} candidates", name, keyword, similar.len());

        if similar.len() < 2 {
            return Ok(ActionResponse::text(format!(
                "Voici les détails de {} :\n\n{}",
                name,
                detail.program.description_or_empty()
            )));
        }

        let mut text = String::from("🔍 **Comparaison de filières similaires**\n\n");
        for program in similar.iter().take(COMPARISON_LIMIT) {
            text.push_str(&format!("**{}** ({})\n", program.name, program.category));
            text.push_str(&format!("• Durée : {}\n", field(&program.duration)));
            text.push_str(&format!("• Frais : {}\n", field(&program.tuition_fee)));
            text.push_str(&format!("• Établissement : {}\n", program.institution_name));
            text.push_str(&format!("• Type : {}\n\n", program.category.capitalized()));
        }
        if let Some(line) = remaining_line(similar.len(), COMPARISON_LIMIT, "autres filières similaires") {
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str(
            "💡 **Conseil :** Les filières professionnelles sont plus pratiques, les classiques plus théoriques.",
        );

        Ok(ActionResponse::text(text))
    }

    pub(super) fn suggest_programs(&self, tracker: &Tracker) -> Result<ActionResponse> {
        let Some(area) = tracker.slot(slots::INTEREST_AREA) else {
            return Ok(ActionResponse::text(
                "Pour vous suggérer des filières, dites-moi ce qui vous intéresse !",
            ));
        };

        let category = tracker.slot(slots::PREFERRED_CATEGORY).and_then(|raw| {
            match raw.parse::<ProgramCategory>() {
                Ok(category) => Some(category),
                Err(e) => {
                    tracing::warn!("Ignoring category preference: {}", e);
                    None
                }
            }
        });

        let mut programs = match category {
            Some(category) => self
                .store
                .get_programs_by_category(category, None)?
                .into_iter()
                .filter(|program| program.mentions(area))
                .collect(),
            None => self.store.get_programs_by_interest_area(area)?,
        };

        if programs.is_empty() {
            return Ok(ActionResponse::text(
                "Je n'ai pas trouvé de filières correspondant à vos critères. Essayez d'élargir votre recherche.",
            ));
        }

        programs.sort_by(|a, b| a.name.cmp(&b.name));

        let mut text = format!("💡 **Suggestions pour vous** (basé sur : {}", area);
        if let Some(category) = category {
            text.push_str(&format!(", {}", category));
        }
        text.push_str(")\n\n");

        for (i, program) in programs.iter().take(SUGGESTION_LIMIT).enumerate() {
            text.push_str(&format!("{}. **{}**\n", i + 1, program.name));
            text.push_str(&format!("   📍 {}\n", program.institution_name));
            text.push_str(&format!(
                "   ⏱️ {} | 💰 {}\n",
                field(&program.duration),
                field(&program.tuition_fee)
            ));
            text.push_str(&format!(
                "   {}\n\n",
                truncate_chars(program.description_or_empty(), SUGGESTION_DESCRIPTION_CHARS)
            ));
        }
        if let Some(line) = remaining_line(programs.len(), SUGGESTION_LIMIT, "autres suggestions") {
            text.push_str(&line);
            text.push('\n');
        }
        text.push_str("Dites-moi laquelle vous intéresse pour plus de détails !");

        Ok(ActionResponse::text(text))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::UniversityInfo;
    use crate::responder::{Action, Responder, Tracker, entities, slots};
    use crate::storage::SqliteStore;

    fn run(action: Action, tracker: Tracker) -> crate::ActionResponse {
        let store = SqliteStore::open_in_memory().unwrap();
        let university = UniversityInfo::default();
        Responder::new(&store, &university).run(action, &tracker)
    }

    #[test]
    fn test_orientation_asks_for_area() {
        let response = run(Action::GuideOrientation, Tracker::new());
        assert_eq!(response.messages.len(), 1);
        assert!(response.messages[0].contains("domaine d'intérêt"));
        assert!(response.events.is_empty());
    }

    #[test]
    fn test_orientation_health_end_to_end() {
        let tracker = Tracker::new().with_entity(entities::INTEREST_AREA, "santé");
        let response = run(Action::GuideOrientation, tracker);

        let text = &response.messages[0];
        assert!(text.contains("**Médecine Générale**"));
        assert!(text.contains("📍 Faculté de Médecine et des Sciences Biomédicales"));
        assert!(text.contains("⏱️ 7 ans"));
        assert!(text.contains("💰 100,000 FCFA"));
        assert!(text.contains("📚"));
        assert_eq!(response.events.len(), 1);
        assert_eq!(response.events[0].name, slots::INTEREST_AREA);
        assert_eq!(response.events[0].value, "santé");
    }

    #[test]
    fn test_orientation_caps_at_five() {
        let tracker = Tracker::new().with_entity(entities::INTEREST_AREA, "Technologies");
        let response = run(Action::GuideOrientation, tracker);

        let text = &response.messages[0];
        assert_eq!(text.matches("📍").count(), 5);
        assert!(text.contains("Et 2 autres formations..."));
    }

    #[test]
    fn test_orientation_falls_back_to_institutions() {
        let tracker = Tracker::new().with_entity(entities::INTEREST_AREA, "astronomie");
        let response = run(Action::GuideOrientation, tracker);

        assert_eq!(response.messages.len(), 2);
        assert!(response.messages[0].contains("'astronomie'"));
        assert!(response.messages[1].starts_with("Établissements disponibles :"));
        assert_eq!(response.messages[1].matches("• ").count(), 5);
        assert!(response.events.is_empty());
    }

    #[test]
    fn test_detail_hit_remembers_canonical_name() {
        let tracker = Tracker::new().with_entity(entities::PROGRAM, "Informatique");
        let response = run(Action::ProgramDetail, tracker);

        let text = &response.messages[0];
        assert!(text.starts_with("🎓 **Licence Professionnelle en Informatique**"));
        assert!(text.contains("**Type :** Professionnelle"));
        assert!(text.contains("**Contact :** +237 233 40 20 10"));
        assert!(text.contains("**Site web :** http://sciences.univ-douala.cm"));
        assert_eq!(response.events[0].name, slots::CHOSEN_PROGRAM);
        assert_eq!(response.events[0].value, "Licence Professionnelle en Informatique");
    }

    #[test]
    fn test_detail_suggests_from_descriptions() {
        // No program name contains "réseaux", one description does
        let tracker = Tracker::new().with_entity(entities::PROGRAM, "réseaux");
        let response = run(Action::ProgramDetail, tracker);

        let text = &response.messages[0];
        assert!(text.contains("Peut-être cherchez-vous"));
        assert!(text.contains("• Licence Professionnelle en Informatique"));
        assert!(response.events.is_empty());
    }

    #[test]
    fn test_detail_not_found_without_suggestions() {
        let tracker = Tracker::new().with_entity(entities::PROGRAM, "NoSuchProgram");
        let response = run(Action::ProgramDetail, tracker);

        assert_eq!(response.messages.len(), 1);
        assert!(response.messages[0].contains("Je n'ai pas trouvé la filière 'NoSuchProgram'"));
        assert!(!response.messages[0].contains("Peut-être"));
    }

    #[test]
    fn test_compare_lists_similar_programs() {
        // Last word "Informatique" matches the licence and the DUT
        let tracker = Tracker::new().with_entity(entities::PROGRAM, "Informatique");
        let response = run(Action::ComparePrograms, tracker);

        let text = &response.messages[0];
        assert!(text.starts_with("🔍 **Comparaison de filières similaires**"));
        assert!(text.contains("**Licence Professionnelle en Informatique**"));
        assert!(text.contains("**DUT en Génie Informatique**"));
        assert!(text.contains("• Établissement : Institut Universitaire de Technologie (IUT)"));
    }

    #[test]
    fn test_compare_single_match_shows_description() {
        let tracker = Tracker::new().with_entity(entities::PROGRAM, "Médecine");
        let response = run(Action::ComparePrograms, tracker);

        assert_eq!(
            response.messages[0],
            "Voici les détails de Médecine Générale :\n\nFormation complète en médecine générale"
        );
    }

    #[test]
    fn test_compare_unknown_program() {
        let tracker = Tracker::new().with_entity(entities::PROGRAM, "Astrophysique");
        let response = run(Action::ComparePrograms, tracker);
        assert_eq!(response.messages[0], "Je n'ai pas trouvé la filière 'Astrophysique'.");
    }

    #[test]
    fn test_suggest_requires_remembered_area() {
        // An entity in the current turn is not a remembered preference
        let tracker = Tracker::new().with_entity(entities::INTEREST_AREA, "sciences");
        let response = run(Action::SuggestPrograms, tracker);
        assert_eq!(
            response.messages[0],
            "Pour vous suggérer des filières, dites-moi ce qui vous intéresse !"
        );
    }

    #[test]
    fn test_suggest_by_area_sorted_and_capped() {
        let tracker = Tracker::new().with_slot(slots::INTEREST_AREA, "Technologies");
        let response = run(Action::SuggestPrograms, tracker);

        let text = &response.messages[0];
        let first = text.find("1. **DUT en Génie Informatique**").unwrap();
        let second = text.find("2. **Licence Professionnelle en Génie Civil**").unwrap();
        let third = text.find("3. **Licence Professionnelle en Informatique**").unwrap();
        assert!(first < second && second < third);
        assert!(!text.contains("4. **"));
        assert!(text.contains("Et 4 autres suggestions..."));
    }

    #[test]
    fn test_suggest_filters_every_candidate_by_area() {
        let tracker = Tracker::new()
            .with_slot(slots::INTEREST_AREA, "informatique")
            .with_slot(slots::PREFERRED_CATEGORY, "professionnelle");
        let response = run(Action::SuggestPrograms, tracker);

        let text = &response.messages[0];
        assert!(text.contains("(basé sur : informatique, professionnelle)"));
        assert!(text.contains("1. **DUT en Génie Informatique**"));
        assert!(text.contains("2. **Licence Professionnelle en Informatique**"));
        assert!(!text.contains("Électronique"));
        assert!(!text.contains("Génie Civil"));
    }

    #[test]
    fn test_suggest_with_category_and_no_match() {
        let tracker = Tracker::new()
            .with_slot(slots::INTEREST_AREA, "médecine")
            .with_slot(slots::PREFERRED_CATEGORY, "professionnelle");
        let response = run(Action::SuggestPrograms, tracker);
        assert!(response.messages[0].starts_with("Je n'ai pas trouvé de filières correspondant"));
    }

    #[test]
    fn test_suggest_ignores_unknown_category() {
        let tracker = Tracker::new()
            .with_slot(slots::INTEREST_AREA, "santé")
            .with_slot(slots::PREFERRED_CATEGORY, "mixte");
        let response = run(Action::SuggestPrograms, tracker);

        let text = &response.messages[0];
        assert!(text.contains("(basé sur : santé)"));
        assert!(text.contains("1. **Médecine Générale**"));
    }
}
