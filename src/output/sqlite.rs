//! Relational store writer
//!
//! Persists the knowledge graph to an embedded SQLite database with the
//! three-table schema downstream tools query: documents, tokens, and
//! relationships. The write replaces any previous run's rows.

use crate::Result;
use crate::graph::KnowledgeGraph;
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use super::schema;

/// SQLite-backed store for one run's knowledge graph
pub struct RelationalStore {
    conn: Connection,
}

impl RelationalStore {
    /// Open a database file (creates if it doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Write the whole graph in one transaction, replacing prior rows.
    pub fn write_graph(&mut self, graph: &KnowledgeGraph) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM tokens", [])?;
        tx.execute("DELETE FROM relationships", [])?;
        tx.execute("DELETE FROM documents", [])?;

        for doc in graph.documents().values() {
            tx.execute(
                r#"
                INSERT OR REPLACE INTO documents (relative_path, file_type, size, hash, modified, token_count)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    doc.relative_path,
                    doc.format,
                    doc.byte_size as i64,
                    doc.content_hash,
                    doc.modified_time,
                    doc.tokens.len() as i64,
                ],
            )?;
        }

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO tokens (file, token_type, value, raw, line, col, context)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )?;
            for doc in graph.documents().values() {
                for token in &doc.tokens {
                    stmt.execute(params![
                        doc.relative_path,
                        token.kind.as_str(),
                        token.value,
                        token.raw,
                        token.line,
                        token.column,
                        token.context,
                    ])?;
                }
            }
        }

        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO relationships (source, target) VALUES (?1, ?2)")?;
            for (source, targets) in graph.relationships() {
                for target in targets {
                    stmt.execute(params![source, target])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Count rows in the documents table
    pub fn count_documents(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Count rows in the tokens table
    pub fn count_tokens(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tokens", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All (source, target) relationship pairs
    pub fn relationship_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT source, target FROM relationships ORDER BY source, target")?;
        let pairs = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(pairs)
    }

    /// Direct access for consumers embedding the store
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Write `documents.db` into the output directory.
pub fn write_store(graph: &KnowledgeGraph, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join("documents.db");
    let mut store = RelationalStore::open(&path)?;
    store.write_graph(graph)?;
    Ok(path)
}
