//! Seed catalog for the Université de Douala
//!
//! Inserted once, the first time a store is opened on an empty database.
//! Programs and links refer to institutions, programs and areas by their
//! position in the tables below, resolved to row ids at insert time.

use rusqlite::{Transaction, params};
use crate::Result;
use crate::model::{InstitutionKind, ProgramCategory};

pub struct SeedInstitution {
    pub name: &'static str,
    pub kind: InstitutionKind,
    pub description: &'static str,
    pub contact: &'static str,
    pub website: &'static str,
}

pub struct SeedProgram {
    pub name: &'static str,
    pub category: ProgramCategory,
    pub duration: &'static str,
    pub description: &'static str,
    pub outcomes: &'static str,
    pub admission_conditions: &'static str,
    /// Index into `INSTITUTIONS`
    pub institution: usize,
    pub tuition_fee: &'static str,
}

pub const INSTITUTIONS: &[SeedInstitution] = &[
    SeedInstitution {
        name: "Faculté des Sciences",
        kind: InstitutionKind::Faculty,
        description: "Formation en sciences fondamentales et appliquées",
        contact: "+237 233 40 20 10",
        website: "http://sciences.univ-douala.cm",
    },
    SeedInstitution {
        name: "Faculté de Médecine et des Sciences Biomédicales",
        kind: InstitutionKind::Faculty,
        description: "Formation des professionnels de santé",
        contact: "+237 233 40 20 20",
        website: "http://medecine.univ-douala.cm",
    },
    SeedInstitution {
        name: "Faculté des Sciences Juridiques et Politiques",
        kind: InstitutionKind::Faculty,
        description: "Formation en droit et sciences politiques",
        contact: "+237 233 40 20 30",
        website: "http://droit.univ-douala.cm",
    },
    SeedInstitution {
        name: "Institut Universitaire de Technologie (IUT)",
        kind: InstitutionKind::Institute,
        description: "Formations technologiques et professionnelles",
        contact: "+237 233 40 20 40",
        website: "http://iut.univ-douala.cm",
    },
    SeedInstitution {
        name: "École Normale Supérieure (ENS)",
        kind: InstitutionKind::School,
        description: "Formation des enseignants",
        contact: "+237 233 40 20 50",
        website: "http://ens.univ-douala.cm",
    },
];

/// (name, description)
pub const INTEREST_AREAS: &[(&str, &str)] = &[
    ("Sciences et Technologies", "Domaines scientifiques et technologiques"),
    ("Santé et Médecine", "Domaines de la santé et médecine"),
    ("Droit et Sciences Politiques", "Domaines juridiques et politiques"),
    ("Sciences Économiques", "Domaines économiques et de gestion"),
    ("Lettres et Sciences Humaines", "Domaines littéraires et humaines"),
    ("Éducation et Formation", "Domaines de l'éducation et formation"),
];

pub const PROGRAMS: &[SeedProgram] = &[
    SeedProgram {
        name: "Licence en Mathématiques",
        category: ProgramCategory::Academic,
        duration: "3 ans",
        description: "Formation fondamentale en mathématiques pures et appliquées",
        outcomes: "Enseignement, Recherche, Industries",
        admission_conditions: "Baccalauréat C ou D",
        institution: 0,
        tuition_fee: "50,000 FCFA",
    },
    SeedProgram {
        name: "Licence en Physique",
        category: ProgramCategory::Academic,
        duration: "3 ans",
        description: "Formation en physique fondamentale et expérimentale",
        outcomes: "Enseignement, Recherche, Laboratoires",
        admission_conditions: "Baccalauréat C ou D",
        institution: 0,
        tuition_fee: "50,000 FCFA",
    },
    SeedProgram {
        name: "Licence en Chimie",
        category: ProgramCategory::Academic,
        duration: "3 ans",
        description: "Formation en chimie analytique et organique",
        outcomes: "Industries chimiques, Laboratoires, Recherche",
        admission_conditions: "Baccalauréat C ou D",
        institution: 0,
        tuition_fee: "50,000 FCFA",
    },
    SeedProgram {
        name: "Licence Professionnelle en Informatique",
        category: ProgramCategory::Vocational,
        duration: "3 ans",
        description: "Formation pratique en développement logiciel et réseaux",
        outcomes: "Développeur, Administrateur réseaux, Analyste",
        admission_conditions: "Baccalauréat C, D ou E",
        institution: 0,
        tuition_fee: "75,000 FCFA",
    },
    SeedProgram {
        name: "Licence Professionnelle en Électronique",
        category: ProgramCategory::Vocational,
        duration: "3 ans",
        description: "Formation en électronique et télécommunications",
        outcomes: "Technicien supérieur, Maintenance électronique",
        admission_conditions: "Baccalauréat C, D ou E",
        institution: 0,
        tuition_fee: "75,000 FCFA",
    },
    SeedProgram {
        name: "Licence Professionnelle en Génie Civil",
        category: ProgramCategory::Vocational,
        duration: "3 ans",
        description: "Formation technique en construction et bâtiment",
        outcomes: "Technicien BTP, Conducteur de travaux",
        admission_conditions: "Baccalauréat C, D ou E",
        institution: 0,
        tuition_fee: "75,000 FCFA",
    },
    SeedProgram {
        name: "Médecine Générale",
        category: ProgramCategory::Academic,
        duration: "7 ans",
        description: "Formation complète en médecine générale",
        outcomes: "Médecin généraliste, Spécialisation",
        admission_conditions: "Baccalauréat C avec mention",
        institution: 1,
        tuition_fee: "100,000 FCFA",
    },
    SeedProgram {
        name: "Droit Privé",
        category: ProgramCategory::Academic,
        duration: "4 ans",
        description: "Formation en droit civil et commercial",
        outcomes: "Avocat, Juriste d'entreprise, Notaire",
        admission_conditions: "Baccalauréat toutes séries",
        institution: 2,
        tuition_fee: "45,000 FCFA",
    },
    SeedProgram {
        name: "DUT en Génie Informatique",
        category: ProgramCategory::Vocational,
        duration: "2 ans",
        description: "Formation technique en informatique industrielle",
        outcomes: "Technicien informatique, Support technique",
        admission_conditions: "Baccalauréat C, D ou technique",
        institution: 3,
        tuition_fee: "60,000 FCFA",
    },
];

/// (program index, area index). Duplicates are absorbed by `INSERT OR IGNORE`.
pub const PROGRAM_AREAS: &[(usize, usize)] = &[
    (0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0),
    (6, 1),
    (7, 2), (8, 2),
    (3, 0), (4, 0), (5, 0), (8, 0),
];

/// (step, description, details, useful links)
pub const ENROLLMENT_STEPS: &[(u32, &str, &str, &str)] = &[
    (
        1,
        "Création de compte",
        "Se créer un compte sur la plateforme de préinscription",
        "Rendez-vous sur http://preinscription.univ-douala.cm et cliquez sur 'Créer un compte'",
    ),
    (
        2,
        "Remplissage du formulaire",
        "Compléter le formulaire de préinscription en ligne",
        "Fournir toutes les informations personnelles et académiques requises",
    ),
    (
        3,
        "Upload des documents",
        "Téléverser les documents numérisés requis",
        "Documents à fournir : BAC, relevés de notes, photo d'identité, acte de naissance",
    ),
    (
        4,
        "Validation du dossier",
        "Soumission et validation finale du dossier",
        "Vérifier toutes les informations avant soumission définitive",
    ),
];

/// (name, description, required)
pub const REQUIRED_DOCUMENTS: &[(&str, &str, bool)] = &[
    ("BAC ou équivalent", "Diplôme du Baccalauréat ou équivalent", true),
    ("Relevés de notes", "Relevés de notes du secondaire", true),
    ("Photo d'identité", "Photo d'identité récente format 4x4", true),
    ("Acte de naissance", "Copie d'acte de naissance", true),
    ("Certificat médical", "Certificat médical de non contre-indication", false),
    ("Lettre de motivation", "Lettre de motivation (pour certaines filières)", false),
];

/// (event, start, end, academic year)
pub const IMPORTANT_DATES: &[(&str, &str, &str, &str)] = &[
    ("Ouverture préinscription", "2024-06-01", "2024-07-15", "2024-2025"),
    ("Clôture préinscription", "2024-07-15", "2024-07-15", "2024-2025"),
    ("Début des cours", "2024-09-02", "2024-09-02", "2024-2025"),
];

/// Insert the seed catalog unless institutions already exist.
///
/// Returns `true` when rows were inserted. Must run inside a write
/// transaction so that two initializers cannot both see an empty table.
pub fn populate(tx: &Transaction<'_>) -> Result<bool> {
    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM institutions", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::debug!("Catalog already seeded ({} institutions)", existing);
        return Ok(false);
    }

    let mut institution_ids = Vec::with_capacity(INSTITUTIONS.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO institutions (name, kind, description, contact, website) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for inst in INSTITUTIONS {
            stmt.execute(params![inst.name, inst.kind.as_str(), inst.description, inst.contact, inst.website])?;
            institution_ids.push(tx.last_insert_rowid());
        }
    }

    let mut area_ids = Vec::with_capacity(INTEREST_AREAS.len());
    {
        let mut stmt = tx.prepare("INSERT INTO interest_areas (name, description) VALUES (?1, ?2)")?;
        for (name, description) in INTEREST_AREAS {
            stmt.execute(params![name, description])?;
            area_ids.push(tx.last_insert_rowid());
        }
    }

    let mut program_ids = Vec::with_capacity(PROGRAMS.len());
    {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO programs (name, category, duration, description, outcomes, admission_conditions, institution_id, tuition_fee)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )?;
        for program in PROGRAMS {
            stmt.execute(params![
                program.name,
                program.category.as_str(),
                program.duration,
                program.description,
                program.outcomes,
                program.admission_conditions,
                institution_ids[program.institution],
                program.tuition_fee,
            ])?;
            program_ids.push(tx.last_insert_rowid());
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO program_interest_areas (program_id, area_id) VALUES (?1, ?2)",
        )?;
        for (program, area) in PROGRAM_AREAS {
            stmt.execute(params![program_ids[*program], area_ids[*area]])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO enrollment_steps (step, description, details, useful_links) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (step, description, details, links) in ENROLLMENT_STEPS {
            stmt.execute(params![step, description, details, links])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO required_documents (name, description, required) VALUES (?1, ?2, ?3)",
        )?;
        for (name, description, required) in REQUIRED_DOCUMENTS {
            stmt.execute(params![name, description, required])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO important_dates (event, start_date, end_date, academic_year) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (event, start, end, year) in IMPORTANT_DATES {
            stmt.execute(params![event, start, end, year])?;
        }
    }

    tracing::info!(
        "Seeded catalog: {} institutions, {} programs, {} interest areas",
        INSTITUTIONS.len(),
        PROGRAMS.len(),
        INTEREST_AREAS.len()
    );
    Ok(true)
}
