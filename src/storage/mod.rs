//! Storage Layer - SQLite-backed catalog
//!
//! System of record is SQLite with tables:
//! - institutions(name, kind, description, contact, website)
//! - programs(name, category, duration, ..., institution_id)
//! - interest_areas(name, description)
//! - program_interest_areas(program_id, area_id)
//! - enrollment_steps(step, description, details, useful_links)
//! - required_documents(name, description, required)
//! - important_dates(event, start_date, end_date, academic_year)

pub mod schema;
pub mod seed;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
