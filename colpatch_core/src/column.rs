use std::fmt;

/// A column that should be present on the patched table.
///
/// Columns are always added without a default value and without constraints,
/// so they are nullable and existing rows get `NULL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    name: String,
    sql_type: String,
}

impl Column {
    pub fn new(name: &str, sql_type: &str) -> Column {
        Column {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }

    /// Create a `TEXT` column
    pub fn text(name: &str) -> Column {
        Column::new(name, "TEXT")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }
}

impl fmt::Display for Column {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{} {}", self.name, self.sql_type)
    }
}

/// One column descriptor of a table, as returned by `PRAGMA table_info`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    cid: i64,
    name: String,
    sql_type: String,
    not_null: bool,
    default_value: Option<String>,
    pk: i64,
}

impl ColumnInfo {
    pub fn new(
        cid: i64,
        name: String,
        sql_type: String,
        not_null: bool,
        default_value: Option<String>,
        pk: i64,
    ) -> ColumnInfo {
        ColumnInfo {
            cid,
            name,
            sql_type,
            not_null,
            default_value,
            pk,
        }
    }

    pub fn cid(&self) -> i64 {
        self.cid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &str {
        &self.sql_type
    }

    pub fn not_null(&self) -> bool {
        self.not_null
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// 1-based position of the column in the primary key, 0 when it isn't part of it
    pub fn pk(&self) -> i64 {
        self.pk
    }
}

// quotes like a python string repr: double quotes when the value holds single quotes only
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\");
    if value.contains('\'') && !value.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

impl fmt::Display for ColumnInfo {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default_value = match &self.default_value {
            Some(value) => quote(value),
            None => "None".to_string(),
        };
        write!(
            fmt,
            "({}, {}, {}, {}, {}, {})",
            self.cid,
            quote(&self.name),
            quote(&self.sql_type),
            self.not_null as u8,
            default_value,
            self.pk
        )
    }
}

/// Render a table schema as a bracketed list of descriptor tuples,
/// e.g. `[(0, 'id', 'INTEGER', 0, None, 1), (1, 'name', 'TEXT', 0, None, 0)]`
pub fn display_table_info(schema: &[ColumnInfo]) -> String {
    let columns = schema
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ");
    format!("[{}]", columns)
}
