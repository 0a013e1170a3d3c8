use crate::value::SqlValue;

/// A row that can be emitted as an `INSERT INTO` statement.
pub trait InsertRow {
    /// Table name as written in the statement and the block comment.
    const TABLE: &'static str;
    /// Column names, in the same order as [`InsertRow::values`].
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<SqlValue>;

    /// Render the full statement for this row.
    fn insert_statement(&self) -> String {
        let values: Vec<String> = self.values().iter().map(SqlValue::to_sql).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            Self::TABLE,
            Self::COLUMNS.join(", "),
            values.join(", ")
        )
    }
}
