use super::*;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// Build columns from `(name, type)` pairs, keeping their order.
    pub fn new_list<N, T>(columns: impl IntoIterator<Item = (N, T)>) -> Vec<Self>
    where
        N: Into<String>,
        T: Into<String>,
    {
        columns
            .into_iter()
            .map(|(name, data_type)| Column::new(name, data_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_preserves_order() {
        let columns = Column::new_list([("id", "int"), ("name", "text")]);
        assert_eq!(
            columns,
            vec![Column::new("id", "int"), Column::new("name", "text")]
        );
    }

    #[test]
    fn serializes_type_field() {
        let column: Column = serde_json::from_str(r#"{"name":"id","type":"int"}"#).expect("column");
        assert_eq!(column, Column::new("id", "int"));
    }
}
