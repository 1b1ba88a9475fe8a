//! Database schema definitions

/// SQL to create the institutions table
pub const CREATE_INSTITUTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS institutions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    description TEXT,
    contact TEXT,
    website TEXT
)
"#;

/// SQL to create the programs table
/// `category` is restricted to the two stored category values
pub const CREATE_PROGRAMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS programs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL CHECK (category IN ('professionnelle', 'classique')),
    duration TEXT,
    description TEXT,
    outcomes TEXT,
    admission_conditions TEXT,
    institution_id INTEGER NOT NULL,
    tuition_fee TEXT,
    FOREIGN KEY (institution_id) REFERENCES institutions (id)
)
"#;

/// SQL to create the interest_areas table
pub const CREATE_INTEREST_AREAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS interest_areas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT
)
"#;

/// SQL to create the program <-> interest area association table
pub const CREATE_PROGRAM_INTEREST_AREAS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS program_interest_areas (
    program_id INTEGER NOT NULL,
    area_id INTEGER NOT NULL,
    PRIMARY KEY (program_id, area_id),
    FOREIGN KEY (program_id) REFERENCES programs (id),
    FOREIGN KEY (area_id) REFERENCES interest_areas (id)
)
"#;

/// SQL to create the enrollment_steps table
pub const CREATE_ENROLLMENT_STEPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS enrollment_steps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    step INTEGER NOT NULL UNIQUE,
    description TEXT NOT NULL,
    details TEXT,
    useful_links TEXT
)
"#;

/// SQL to create the required_documents table
pub const CREATE_REQUIRED_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS required_documents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    required INTEGER NOT NULL DEFAULT 1
)
"#;

/// SQL to create the important_dates table
pub const CREATE_IMPORTANT_DATES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS important_dates (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT,
    academic_year TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_programs_institution ON programs(institution_id)",
    "CREATE INDEX IF NOT EXISTS idx_programs_category ON programs(category)",
    "CREATE INDEX IF NOT EXISTS idx_program_areas_area ON program_interest_areas(area_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_INSTITUTIONS_TABLE,
        CREATE_PROGRAMS_TABLE,
        CREATE_INTEREST_AREAS_TABLE,
        CREATE_PROGRAM_INTEREST_AREAS_TABLE,
        CREATE_ENROLLMENT_STEPS_TABLE,
        CREATE_REQUIRED_DOCUMENTS_TABLE,
        CREATE_IMPORTANT_DATES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
