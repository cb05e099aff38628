use super::*;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Database {
    pub name: String,
    pub tables: Vec<Table>,
}

impl Database {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Case-insensitive table lookup.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| eq_ignore_case(&t.name, name))
    }

    /// Add (or create) the table and insert the column.
    pub fn insert_column(&mut self, table_name: impl Into<String>, column: Column) {
        let table_name = table_name.into();
        match self.tables.iter_mut().find(|t| t.name == table_name) {
            Some(table) => table.insert_column(column),
            None => {
                let mut table = Table::new(table_name);
                table.columns.push(column);
                self.tables.push(table);
            }
        }
    }

    /// Insert (or overwrite) a table.
    pub fn insert_table(&mut self, table: Table) {
        match self.tables.iter_mut().find(|t| t.name == table.name) {
            Some(existing) => *existing = table,
            None => self.tables.push(table),
        }
    }
}
