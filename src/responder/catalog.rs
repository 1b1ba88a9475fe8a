//! Institution-centred handlers

use crate::Result;
use crate::model::ProgramCategory;
use super::tracker::{entities, slots};
use super::{ActionResponse, Responder, Tracker, field};

impl Responder<'_> {
    pub(super) fn list_institutions(&self) -> Result<ActionResponse> {
        let institutions = self.store.list_institutions()?;

        if institutions.is_empty() {
            return Ok(ActionResponse::text(
                "Je n'ai pas pu récupérer la liste des établissements pour le moment.",
            ));
        }

        let mut text = format!("🏛️ **Établissements - {}**\n\n", self.university.name);

        for institution in &institutions {
            text.push_str(&format!("**• {}** ({})\n", institution.name, institution.kind));
            if let Some(description) = institution.description.as_deref() {
                text.push_str(&format!("  _{}_\n", description));
            }

            let programs = self.store.get_programs_by_institution(institution.id)?;
            if !programs.is_empty() {
                text.push_str(&format!("  📚 {} filière(s) disponible(s)\n", programs.len()));
            }

            if let Some(contact) = institution.contact.as_deref().filter(|s| !s.is_empty()) {
                text.push_str(&format!("  📞 {}\n", contact));
            }
            if let Some(website) = institution.website.as_deref().filter(|s| !s.is_empty()) {
                text.push_str(&format!("  🌐 {}\n", website));
            }
            text.push('\n');
        }

        text.push_str("💡 *Pour voir les filières d'un établissement spécifique, dites-moi son nom !*");
        Ok(ActionResponse::text(text))
    }

    pub(super) fn institution_programs(&self, tracker: &Tracker) -> Result<ActionResponse> {
        let Some(query) = tracker.latest_entity(entities::INSTITUTION) else {
            return Ok(ActionResponse::text(
                "De quel établissement souhaitez-vous connaître les filières ?",
            ));
        };

        let needle = query.to_lowercase();
        let found = self
            .store
            .list_institutions()?
            .into_iter()
            .find(|institution| institution.name.to_lowercase().contains(&needle));

        let Some(institution) = found else {
            tracing::debug!("No institution matches '{}', listing all", query);
            let mut response = ActionResponse::text(format!(
                "Je n'ai pas trouvé l'établissement '{}'. Voici la liste des établissements disponibles :",
                query
            ));
            response.extend(self.list_institutions()?);
            return Ok(response);
        };

        let programs = self.store.get_programs_by_institution(institution.id)?;
        if programs.is_empty() {
            return Ok(ActionResponse::text(format!(
                "L'établissement {} ne propose pas encore de filières dans notre base de données.",
                institution.name
            )));
        }

        let (vocational, academic): (Vec<_>, Vec<_>) = programs
            .iter()
            .partition(|program| program.category == ProgramCategory::Vocational);

        let mut text = format!("🎓 **Filières de {}**\n\n", institution.name);

        for (category, group) in [
            (ProgramCategory::Vocational, &vocational),
            (ProgramCategory::Academic, &academic),
        ] {
            if group.is_empty() {
                continue;
            }
            text.push_str(&format!("{} **Filières {}s**\n", category.icon(), category.capitalized()));
            for program in group {
                text.push_str(&format!(
                    "• {} ({}) - {}\n",
                    program.name,
                    field(&program.duration),
                    field(&program.tuition_fee)
                ));
            }
            text.push('\n');
        }

        text.push_str(&format!("💼 *Total : {} filière(s)*\n", programs.len()));
        text.push_str(&format!("📞 Contact : {}\n", field(&institution.contact)));
        text.push_str(&format!("🌐 Site : {}", field(&institution.website)));

        Ok(ActionResponse::text(text).remember(slots::LAST_INSTITUTION, institution.name.clone()))
    }

    /// Programs of one category at the featured institution
    pub(super) fn featured_programs(&self, category: ProgramCategory) -> Result<ActionResponse> {
        let featured = &self.university.featured_institution;
        let programs = self.store.get_programs_by_category(category, Some(featured))?;

        let (intro, advantages_title, advantages) = match category {
            ProgramCategory::Vocational => (
                "Ces formations pratiques préparent directement à l'insertion professionnelle :",
                "💼 **Avantages des filières professionnelles :**",
                "• Formation pratique et concrète\n• Stages en entreprise\n\
                 • Insertion professionnelle rapide\n• Compétences directement opérationnelles",
            ),
            ProgramCategory::Academic => (
                "Formations fondamentales permettant la poursuite d'études ou la recherche :",
                "🎓 **Avantages des filières classiques :**",
                "• Formation théorique solide\n• Poursuite en master/doctorat\n\
                 • Orientation vers la recherche\n• Base large pour diverses spécialisations",
            ),
        };

        let mut text = format!(
            "{} **Filières {}s - {}**\n\n{}\n\n",
            category.icon(),
            category.capitalized(),
            featured,
            intro
        );

        if programs.is_empty() {
            text.push_str("Aucune filière de ce type n'est enregistrée pour le moment.\n\n");
        }
        for program in &programs {
            text.push_str(&format!("**• {}**\n", program.name));
            text.push_str(&format!("  Durée : {}\n", field(&program.duration)));
            text.push_str(&format!("  Frais : {}\n", field(&program.tuition_fee)));
            text.push_str(&format!("  {}\n", program.description_or_empty()));
            text.push_str(&format!("  Débouchés : {}\n\n", field(&program.outcomes)));
        }

        text.push_str(advantages_title);
        text.push('\n');
        text.push_str(advantages);

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
    fn test_list_institutions_with_counts() {
        let response = run(Action::ListInstitutions, Tracker::new());
        let text = &response.messages[0];

        assert!(text.starts_with("🏛️ **Établissements - Université de Douala**"));
        assert!(text.contains("**• Faculté des Sciences** (Faculté)"));
        assert!(text.contains("📚 6 filière(s) disponible(s)"));
        assert!(text.contains("📚 1 filière(s) disponible(s)"));
        // ENS has no program, so no count line for it
        assert_eq!(text.matches("filière(s) disponible(s)").count(), 4);
        assert!(text.contains("**• École Normale Supérieure (ENS)** (École)"));
    }

    #[test]
    fn test_institution_programs_grouped() {
        let tracker = Tracker::new().with_entity(entities::INSTITUTION, "faculté des sciences");
        let response = run(Action::InstitutionPrograms, tracker);
        let text = &response.messages[0];

        assert!(text.starts_with("🎓 **Filières de Faculté des Sciences**"));
        let vocational = text.find("🎯 **Filières Professionnelles**").unwrap();
        let academic = text.find("📚 **Filières Classiques**").unwrap();
        assert!(vocational < academic);
        assert!(text.contains("• Licence en Chimie (3 ans) - 50,000 FCFA"));
        assert!(text.contains("💼 *Total : 6 filière(s)*"));
        assert!(text.contains("📞 Contact : +237 233 40 20 10"));
        assert_eq!(response.events[0].name, slots::LAST_INSTITUTION);
        assert_eq!(response.events[0].value, "Faculté des Sciences");
    }

    #[test]
    fn test_institution_programs_single_group() {
        let tracker = Tracker::new().with_entity(entities::INSTITUTION, "IUT");
        let response = run(Action::InstitutionPrograms, tracker);
        let text = &response.messages[0];

        assert!(text.contains("🎯 **Filières Professionnelles**"));
        assert!(!text.contains("📚 **Filières Classiques**"));
        assert!(text.contains("💼 *Total : 1 filière(s)*"));
    }

    #[test]
    fn test_institution_without_programs() {
        let tracker = Tracker::new().with_entity(entities::INSTITUTION, "ENS");
        let response = run(Action::InstitutionPrograms, tracker);

        assert_eq!(
            response.messages[0],
            "L'établissement École Normale Supérieure (ENS) ne propose pas encore de filières dans notre base de données."
        );
        assert!(response.events.is_empty());
    }

    #[test]
    fn test_unknown_institution_redirects_to_listing() {
        let tracker = Tracker::new().with_entity(entities::INSTITUTION, "Polytechnique");
        let response = run(Action::InstitutionPrograms, tracker);

        assert_eq!(response.messages.len(), 2);
        assert!(response.messages[0].contains("'Polytechnique'"));
        assert!(response.messages[1].starts_with("🏛️ **Établissements"));
        assert!(response.events.is_empty());
    }

    #[test]
    fn test_institution_programs_asks_when_missing() {
        let response = run(Action::InstitutionPrograms, Tracker::new());
        assert_eq!(
            response.messages[0],
            "De quel établissement souhaitez-vous connaître les filières ?"
        );
    }

    #[test]
    fn test_featured_vocational_programs() {
        let response = run(Action::VocationalPrograms, Tracker::new());
        let text = &response.messages[0];

        assert!(text.starts_with("🎯 **Filières Professionnelles - Faculté des Sciences**"));
        assert_eq!(text.matches("**• ").count(), 3);
        assert!(text.contains("Débouchés : Technicien BTP, Conducteur de travaux"));
        assert!(text.contains("Stages en entreprise"));
        assert!(!text.contains("DUT"));
    }

    #[test]
    fn test_featured_academic_programs_use_substring_scope() {
        let response = run(Action::AcademicPrograms, Tracker::new());
        let text = &response.messages[0];

        assert!(text.starts_with("📚 **Filières Classiques - Faculté des Sciences**"));
        assert!(text.contains("**• Licence en Mathématiques**"));
        // "Faculté des Sciences Juridiques et Politiques" also contains the featured name
        assert!(text.contains("**• Droit Privé**"));
        assert!(!text.contains("Médecine Générale"));
        assert!(text.contains("Poursuite en master/doctorat"));
    }

    #[test]
    fn test_featured_programs_empty_scope() {
        let store = SqliteStore::open_in_memory().unwrap();
        let university = UniversityInfo {
            featured_institution: "École Normale".to_string(),
            ..UniversityInfo::default()
        };
        let response = Responder::new(&store, &university).run(Action::VocationalPrograms, &Tracker::new());
        assert!(response.messages[0].contains("Aucune filière de ce type"));
    }
}
