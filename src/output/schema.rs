//! Relational schema definitions
//!
//! Table and column names are a contract with downstream consumers
//! (report generators, ad-hoc query tools) and must stay stable.

/// SQL to create the documents table
pub const CREATE_DOCUMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    relative_path TEXT PRIMARY KEY,
    file_type TEXT,
    size INTEGER,
    hash TEXT,
    modified REAL,
    token_count INTEGER
)
"#;

/// SQL to create the tokens table
pub const CREATE_TOKENS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tokens (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    file TEXT,
    token_type TEXT,
    value TEXT,
    raw TEXT,
    line INTEGER,
    col INTEGER,
    context TEXT,
    FOREIGN KEY (file) REFERENCES documents(relative_path)
)
"#;

/// SQL to create the relationships table
pub const CREATE_RELATIONSHIPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS relationships (
    source TEXT,
    target TEXT,
    PRIMARY KEY (source, target),
    FOREIGN KEY (source) REFERENCES documents(relative_path)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_tokens_value ON tokens(value)",
    "CREATE INDEX IF NOT EXISTS idx_tokens_file ON tokens(file)",
    "CREATE INDEX IF NOT EXISTS idx_tokens_type ON tokens(token_type)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_DOCUMENTS_TABLE,
        CREATE_TOKENS_TABLE,
        CREATE_RELATIONSHIPS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
