use super::*;
use crate::*;
use std::collections::BTreeMap;

/// The `database -> table -> columns` tree supplied by the metadata source.
///
/// A `Schema` is a plain value: callers load it (usually through
/// `MetadataCache`) and hand a reference to the suggestion builder.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    pub databases: Vec<Database>,
}

/// Accepted on-disk shapes. The tree form carries no ordering, so its
/// databases and tables come out sorted by name.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SchemaFile {
    Listed(Schema),
    Tree(BTreeMap<String, BTreeMap<String, Vec<Column>>>),
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse either `{"databases": [...]}` or the plain
    /// `{database: {table: [{name, type}]}}` tree.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(match serde_json::from_str(raw)? {
            SchemaFile::Listed(schema) => schema,
            SchemaFile::Tree(tree) => {
                let mut schema = Schema::new();
                for (database, tables) in tree {
                    schema.insert_database(Database::new(&database));
                    for (name, columns) in tables {
                        schema.insert_table(&database, Table { name, columns });
                    }
                }
                schema
            }
        })
    }

    /// Case-insensitive database lookup.
    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.iter().find(|d| eq_ignore_case(&d.name, name))
    }

    /// Insert (or overwrite) a database.
    pub fn insert_database(&mut self, database: Database) {
        match self.databases.iter_mut().find(|d| d.name == database.name) {
            Some(existing) => *existing = database,
            None => self.databases.push(database),
        }
    }

    /// Add (or create) the database and insert the table.
    pub fn insert_table(&mut self, database_name: impl Into<String>, table: Table) {
        let database_name = database_name.into();
        match self.databases.iter_mut().find(|d| d.name == database_name) {
            Some(database) => database.insert_table(table),
            None => {
                let mut database = Database::new(database_name);
                database.tables.push(table);
                self.databases.push(database);
            }
        }
    }

    /// Locate a table, preferring `database` when given.
    ///
    /// Falls back to the first database holding a table with that name, so a
    /// missing or stale database hint still yields columns.
    pub fn find_table(&self, database: Option<&str>, table: &str) -> Option<(&Database, &Table)> {
        let preferred = database
            .and_then(|name| self.database(name))
            .and_then(|db| db.table(table).map(|t| (db, t)));
        preferred.or_else(|| {
            self.databases
                .iter()
                .find_map(|db| db.table(table).map(|t| (db, t)))
        })
    }
}
