//! Bulk insert statement built around a table-valued construct.
//!
//! A whole chunk is bound as one `TEXT[]` parameter. `unnest` turns the array
//! into one row per record and `jsonb_to_record` shapes each JSON record
//! into the column list supplied by the schema description:
//!
//! ```sql
//! INSERT INTO "iot"."sensor_messages"
//! SELECT s.* FROM unnest($1::text[]) AS m(payload)
//! CROSS JOIN LATERAL jsonb_to_record(m.payload::jsonb) AS s(id text, temp numeric)
//! ```

use pg_escape::quote_identifier;

use crate::error::{self, SinkError};

/// Optionally schema-qualified target table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    /// Parse `table` or `schema.table`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::InvalidStatement`] for empty parts or more than
    /// one `.` separator.
    pub fn parse(raw: &str) -> error::Result<Self> {
        let parts: Vec<&str> = raw.trim().split('.').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(SinkError::InvalidStatement(format!(
                "table name '{raw}' has an empty part"
            )));
        }
        match parts.as_slice() {
            [name] => Ok(Self {
                schema: None,
                name: (*name).trim().to_string(),
            }),
            [schema, name] => Ok(Self {
                schema: Some((*schema).trim().to_string()),
                name: (*name).trim().to_string(),
            }),
            _ => Err(SinkError::InvalidStatement(format!(
                "table name '{raw}' must be 'table' or 'schema.table'"
            ))),
        }
    }

    /// Identifier-quoted form suitable for embedding in SQL.
    #[must_use]
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!(
                "{}.{}",
                quote_identifier(schema),
                quote_identifier(&self.name)
            ),
            None => quote_identifier(&self.name).into_owned(),
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// The fixed insert statement of one loader instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    table: TableName,
    columns: String,
    sql: String,
}

impl InsertStatement {
    /// Build the statement for `table` with the literal `columns` descriptor
    /// (e.g. `"id varchar(20), temperature numeric(12,5)"`).
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::InvalidStatement`] if the table name is malformed or
    /// the column descriptor is empty, contains `;`, or has unbalanced
    /// parentheses.
    pub fn new(table: &str, columns: &str) -> error::Result<Self> {
        let table = TableName::parse(table)?;
        let columns = columns.trim();
        validate_columns(columns)?;

        let sql = format!(
            "INSERT INTO {} SELECT s.* FROM unnest($1::text[]) AS m(payload) \
             CROSS JOIN LATERAL jsonb_to_record(m.payload::jsonb) AS s({})",
            table.quoted(),
            columns
        );

        Ok(Self {
            table,
            columns: columns.to_string(),
            sql,
        })
    }

    #[must_use]
    pub fn table(&self) -> &TableName {
        &self.table
    }

    #[must_use]
    pub fn columns(&self) -> &str {
        &self.columns
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

fn validate_columns(columns: &str) -> error::Result<()> {
    if columns.is_empty() {
        return Err(SinkError::InvalidStatement(
            "column descriptor must not be empty".into(),
        ));
    }
    if columns.contains(';') {
        return Err(SinkError::InvalidStatement(
            "column descriptor must not contain ';'".into(),
        ));
    }
    let mut depth: i32 = 0;
    for c in columns.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    break;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SinkError::InvalidStatement(format!(
            "column descriptor '{columns}' has unbalanced parentheses"
        )));
    }
    Ok(())
}
