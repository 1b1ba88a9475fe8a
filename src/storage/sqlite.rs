//! SQLite storage implementation

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use rusqlite::{Connection, OptionalExtension, Params, TransactionBehavior, params};
use serde::Serialize;
use crate::{Error, Result};
use crate::model::{
    EnrollmentStep, ImportantDate, Institution, InstitutionKind, Program, ProgramCategory,
    ProgramDetail, RequiredDocument,
};
use super::{schema, seed};

/// Columns selected for every denormalized program row
const PROGRAM_COLUMNS: &str = "p.id, p.name, p.category, p.duration, p.description, p.outcomes, \
     p.admission_conditions, p.institution_id, p.tuition_fee, i.name";

const INSTITUTION_COLUMNS: &str = "i.id, i.name, i.kind, i.description, i.contact, i.website";

/// How long a file-backed connection waits on a locked database
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

enum Backend {
    /// A fresh connection is opened for every call and dropped when it returns
    File(PathBuf),
    /// In-memory databases cannot be reopened, so the one connection is shared
    Memory(Mutex<Connection>),
}

/// SQLite-backed catalog of institutions and programs.
///
/// Read-only once opened: the only writes happen in `open*`, which create
/// the schema and seed an empty database.
pub struct SqliteStore {
    backend: Backend,
}

impl SqliteStore {
    /// Open a database file (creates and seeds it if needed)
    pub fn open(path: &Path) -> Result<Self> {
        let store = Self { backend: Backend::File(path.to_path_buf()) };
        store.initialize()?;
        Ok(store)
    }

    /// Open a seeded in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { backend: Backend::Memory(Mutex::new(conn)) };
        store.initialize()?;
        Ok(store)
    }

    /// Create the schema and seed the catalog.
    ///
    /// Idempotent: tables are created with `IF NOT EXISTS` and seeding is
    /// skipped when institutions already exist. Returns whether seed rows
    /// were inserted.
    pub fn initialize(&self) -> Result<bool> {
        self.with_conn(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON")?;
            for stmt in schema::all_schema_statements() {
                conn.execute(stmt, [])?;
            }

            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let seeded = seed::populate(&tx)?;
            tx.commit()?;
            Ok(seeded)
        })
    }

    /// Run `f` against a connection scoped to this call
    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        match &self.backend {
            Backend::File(path) => {
                let mut conn = Connection::open(path)?;
                conn.busy_timeout(BUSY_TIMEOUT)?;
                f(&mut conn)
            }
            Backend::Memory(conn) => {
                let mut guard = conn.lock().map_err(|_| Error::LockPoisoned)?;
                f(&mut guard)
            }
        }
    }

    fn query_programs<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Program>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let programs = stmt
                .query_map(params, row_to_program)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(programs)
        })
    }

    fn query_institutions<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Institution>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let institutions = stmt
                .query_map(params, row_to_institution)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(institutions)
        })
    }

    // ========== Institution Queries ==========

    /// All institutions in storage order
    pub fn list_institutions(&self) -> Result<Vec<Institution>> {
        self.query_institutions(
            &format!("SELECT {INSTITUTION_COLUMNS} FROM institutions i ORDER BY i.id"),
            [],
        )
    }

    /// Distinct institutions owning at least one program in a matching interest area
    pub fn get_institutions_by_interest_area(&self, area: &str) -> Result<Vec<Institution>> {
        tracing::debug!("Institutions by interest area '{}'", area);
        self.query_institutions(
            &format!(
                "SELECT DISTINCT {INSTITUTION_COLUMNS}
                 FROM institutions i
                 JOIN programs p ON p.institution_id = i.id
                 JOIN program_interest_areas pa ON pa.program_id = p.id
                 JOIN interest_areas a ON a.id = pa.area_id
                 WHERE a.name LIKE ?1
                 ORDER BY i.name"
            ),
            [like_pattern(area)],
        )
    }

    // ========== Program Queries ==========

    /// Programs owned by an institution
    pub fn get_programs_by_institution(&self, institution_id: i64) -> Result<Vec<Program>> {
        self.query_programs(
            &format!(
                "SELECT {PROGRAM_COLUMNS}
                 FROM programs p
                 JOIN institutions i ON p.institution_id = i.id
                 WHERE p.institution_id = ?1
                 ORDER BY p.id"
            ),
            [institution_id],
        )
    }

    /// First program whose name contains `fragment`, with its institution's contact fields
    pub fn get_program_details(&self, fragment: &str) -> Result<Option<ProgramDetail>> {
        tracing::debug!("Program details for '{}'", fragment);
        self.with_conn(|conn| {
            let detail = conn
                .query_row(
                    &format!(
                        "SELECT {PROGRAM_COLUMNS}, i.contact, i.website
                         FROM programs p
                         JOIN institutions i ON p.institution_id = i.id
                         WHERE p.name LIKE ?1
                         ORDER BY p.id
                         LIMIT 1"
                    ),
                    [like_pattern(fragment)],
                    |row| {
                        Ok(ProgramDetail {
                            program: row_to_program(row)?,
                            institution_contact: row.get(10)?,
                            institution_website: row.get(11)?,
                        })
                    },
                )
                .optional()?;
            Ok(detail)
        })
    }

    /// Programs linked to any interest area whose name contains `area`.
    /// A program linked to several matching areas is returned once.
    pub fn get_programs_by_interest_area(&self, area: &str) -> Result<Vec<Program>> {
        tracing::debug!("Programs by interest area '{}'", area);
        self.query_programs(
            &format!(
                "SELECT {PROGRAM_COLUMNS}
                 FROM programs p
                 JOIN institutions i ON p.institution_id = i.id
                 WHERE p.id IN (
                     SELECT pa.program_id
                     FROM program_interest_areas pa
                     JOIN interest_areas a ON a.id = pa.area_id
                     WHERE a.name LIKE ?1
                 )
                 ORDER BY p.id"
            ),
            [like_pattern(area)],
        )
    }

    /// Programs of a category, optionally restricted to institutions whose name contains `institution`
    pub fn get_programs_by_category(
        &self,
        category: ProgramCategory,
        institution: Option<&str>,
    ) -> Result<Vec<Program>> {
        tracing::debug!("Programs by category {} (institution: {:?})", category, institution);
        match institution {
            Some(name) => self.query_programs(
                &format!(
                    "SELECT {PROGRAM_COLUMNS}
                     FROM programs p
                     JOIN institutions i ON p.institution_id = i.id
                     WHERE p.category = ?1 AND i.name LIKE ?2
                     ORDER BY p.id"
                ),
                params![category.as_str(), like_pattern(name)],
            ),
            None => self.query_programs(
                &format!(
                    "SELECT {PROGRAM_COLUMNS}
                     FROM programs p
                     JOIN institutions i ON p.institution_id = i.id
                     WHERE p.category = ?1
                     ORDER BY p.id"
                ),
                [category.as_str()],
            ),
        }
    }

    /// Programs whose name or description contains `query` (unranked)
    pub fn search_programs(&self, query: &str) -> Result<Vec<Program>> {
        tracing::debug!("Searching programs for '{}'", query);
        self.query_programs(
            &format!(
                "SELECT {PROGRAM_COLUMNS}
                 FROM programs p
                 JOIN institutions i ON p.institution_id = i.id
                 WHERE p.name LIKE ?1 OR p.description LIKE ?1
                 ORDER BY p.id"
            ),
            [like_pattern(query)],
        )
    }

    // ========== Enrollment Queries ==========

    /// Enrollment steps by ascending step number
    pub fn get_enrollment_steps(&self) -> Result<Vec<EnrollmentStep>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT step, description, details, useful_links FROM enrollment_steps ORDER BY step",
            )?;
            let steps = stmt
                .query_map([], |row| {
                    Ok(EnrollmentStep {
                        step: row.get(0)?,
                        description: row.get(1)?,
                        details: row.get(2)?,
                        useful_links: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(steps)
        })
    }

    pub fn get_required_documents(&self) -> Result<Vec<RequiredDocument>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, description, required FROM required_documents")?;
            let documents = stmt
                .query_map([], |row| {
                    Ok(RequiredDocument {
                        name: row.get(0)?,
                        description: row.get(1)?,
                        required: row.get(2)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(documents)
        })
    }

    /// Important dates by ascending start date
    pub fn get_important_dates(&self) -> Result<Vec<ImportantDate>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT event, start_date, end_date, academic_year FROM important_dates ORDER BY start_date",
            )?;
            let dates = stmt
                .query_map([], |row| {
                    Ok(ImportantDate {
                        event: row.get(0)?,
                        start_date: row.get(1)?,
                        end_date: row.get(2)?,
                        academic_year: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(dates)
        })
    }

    // ========== Statistics ==========

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        self.with_conn(|conn| {
            let count = |table: &str| -> rusqlite::Result<usize> {
                let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
                Ok(n as usize)
            };
            Ok(DbStats {
                institutions: count("institutions")?,
                programs: count("programs")?,
                interest_areas: count("interest_areas")?,
                enrollment_steps: count("enrollment_steps")?,
                required_documents: count("required_documents")?,
                important_dates: count("important_dates")?,
            })
        })
    }
}

/// Wrap a fragment for "contains" matching with LIKE
fn like_pattern(fragment: &str) -> String {
    format!("%{}%", fragment)
}

/// Helper to convert a row to a Program (columns as in `PROGRAM_COLUMNS`)
fn row_to_program(row: &rusqlite::Row) -> rusqlite::Result<Program> {
    let category_str: String = row.get(2)?;
    let category: ProgramCategory = category_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Program {
        id: row.get(0)?,
        name: row.get(1)?,
        category,
        duration: row.get(3)?,
        description: row.get(4)?,
        outcomes: row.get(5)?,
        admission_conditions: row.get(6)?,
        institution_id: row.get(7)?,
        tuition_fee: row.get(8)?,
        institution_name: row.get(9)?,
    })
}

/// Helper to convert a row to an Institution (columns as in `INSTITUTION_COLUMNS`)
fn row_to_institution(row: &rusqlite::Row) -> rusqlite::Result<Institution> {
    let kind_str: String = row.get(2)?;
    let kind: InstitutionKind = kind_str.parse().map_err(|e: Error| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Institution {
        id: row.get(0)?,
        name: row.get(1)?,
        kind,
        description: row.get(3)?,
        contact: row.get(4)?,
        website: row.get(5)?,
    })
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub institutions: usize,
    pub programs: usize,
    pub interest_areas: usize,
    pub enrollment_steps: usize,
    pub required_documents: usize,
    pub important_dates: usize,
}

impl DbStats {
    /// (label, count) pairs in display order
    pub fn rows(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Institutions", self.institutions),
            ("Programs", self.programs),
            ("Interest areas", self.interest_areas),
            ("Enrollment steps", self.enrollment_steps),
            ("Required documents", self.required_documents),
            ("Important dates", self.important_dates),
        ]
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        for (label, count) in self.rows() {
            writeln!(f, "  {}: {}", label, count)?;
        }
        Ok(())
    }
}
