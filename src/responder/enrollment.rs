//! Pre-enrollment handlers

use crate::Result;
use crate::model::ImportantDate;
use super::{ActionResponse, Responder};

impl Responder<'_> {
    pub(super) fn enrollment_guide(&self) -> Result<ActionResponse> {
        let steps = self.store.get_enrollment_steps()?;
        let documents = self.store.get_required_documents()?;
        let dates = self.store.get_important_dates()?;

        let mut text = format!("📝 **Guide de Préinscription - {}**\n\n", self.university.name);

        text.push_str("**📋 Étapes du processus :**\n");
        for step in &steps {
            text.push_str(&format!("{}. {}\n", step.step, step.description));
            if let Some(details) = step.details.as_deref().filter(|s| !s.is_empty()) {
                text.push_str(&format!("   → {}\n", details));
            }
        }

        text.push_str("\n**📄 Documents requis :**\n");
        for document in &documents {
            let marker = if document.required { "🔴" } else { "🟡" };
            text.push_str(&format!("{} {}\n", marker, document.name));
        }

        text.push_str("\n**📅 Dates importantes :**\n");
        for date in &dates {
            text.push_str(&format!("• {} ({})\n", date_span(date), date.academic_year));
        }

        text.push_str("\n**💡 Important :** Consultez régulièrement le site officiel pour les mises à jour.");
        Ok(ActionResponse::text(text))
    }

    pub(super) fn practical_info(&self) -> Result<ActionResponse> {
        let dates = self.store.get_important_dates()?;
        let documents: Vec<_> = self
            .store
            .get_required_documents()?
            .into_iter()
            .filter(|document| document.required)
            .collect();

        let mut text = String::from("ℹ️ **Informations Pratiques - Préinscription**\n\n");

        match dates.first() {
            Some(first) => text.push_str(&format!("**📅 Calendrier académique {} :**\n", first.academic_year)),
            None => text.push_str("**📅 Calendrier académique :**\n"),
        }
        for date in &dates {
            text.push_str(&format!("• {}\n", date_span(date)));
        }

        text.push_str("\n**📄 Documents obligatoires :**\n");
        for document in &documents {
            text.push_str(&format!("• {}\n", document.name));
        }

        text.push_str(&format!("\n**💻 Plateforme :** {}", self.university.platform_url));
        text.push_str(&format!("\n**📞 Support :** {}", self.university.support_phone));
        text.push_str(&format!("\n**📧 Email :** {}", self.university.support_email));
        text.push_str("\n\n**⚠️ Important :** Ces informations peuvent changer, consultez toujours le site officiel.");

        Ok(ActionResponse::text(text))
    }
}

/// "event : start" or "event : start au end"
fn date_span(date: &ImportantDate) -> String {
    match date.distinct_end() {
        Some(end) => format!("{} : {} au {}", date.event, date.start_date, end),
        None => format!("{} : {}", date.event, date.start_date),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::UniversityInfo;
    use crate::responder::{Action, Responder, Tracker};
    use crate::storage::SqliteStore;

    fn run(action: Action, university: &UniversityInfo) -> String {
        let store = SqliteStore::open_in_memory().unwrap();
        Responder::new(&store, university).run(action, &Tracker::new()).joined()
    }

    #[test]
    fn test_enrollment_guide_sections() {
        let text = run(Action::EnrollmentGuide, &UniversityInfo::default());

        assert!(text.starts_with("📝 **Guide de Préinscription - Université de Douala**"));
        let first = text.find("1. Création de compte").unwrap();
        let last = text.find("4. Validation du dossier").unwrap();
        assert!(first < last);
        assert!(text.contains("   → Se créer un compte sur la plateforme de préinscription"));

        assert_eq!(text.matches("🔴").count(), 4);
        assert_eq!(text.matches("🟡").count(), 2);
        assert!(text.contains("🟡 Lettre de motivation"));

        assert!(text.contains("• Ouverture préinscription : 2024-06-01 au 2024-07-15 (2024-2025)"));
        assert!(text.contains("• Clôture préinscription : 2024-07-15 (2024-2025)"));
    }

    #[test]
    fn test_practical_info_only_required_documents() {
        let university = UniversityInfo {
            support_phone: "+237 699 00 00 00".to_string(),
            ..UniversityInfo::default()
        };
        let text = run(Action::PracticalInfo, &university);

        assert!(text.contains("**📅 Calendrier académique 2024-2025 :**"));
        assert!(text.contains("• Début des cours : 2024-09-02\n"));
        assert!(text.contains("• Acte de naissance"));
        assert!(!text.contains("Certificat médical"));
        assert!(!text.contains("Lettre de motivation"));
        assert!(text.contains("**📞 Support :** +237 699 00 00 00"));
        assert!(text.contains("**💻 Plateforme :** http://preinscription.univ-douala.cm"));
    }
}
