use crate::error::{Error, Kind};
use crate::Column;

use regex::Regex;

const DEFAULT_COLUMN_TYPE: &str = "TEXT";

fn column_name_re() -> Regex {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap()
}

// a type name of one or two words, optionally sized: TEXT, DOUBLE PRECISION, VARCHAR(32), DECIMAL(10, 2)
fn column_type_re() -> Regex {
    Regex::new(r"^[A-Za-z]+( [A-Za-z]+)?(\(\d+(,\s*\d+)?\))?$").unwrap()
}

// words that would turn the type into a column constraint
const CONSTRAINT_KEYWORDS: &[&str] = &[
    "NOT",
    "NULL",
    "DEFAULT",
    "UNIQUE",
    "PRIMARY",
    "KEY",
    "COLLATE",
    "REFERENCES",
    "CHECK",
    "GENERATED",
    "AS",
    "CONSTRAINT",
];

fn has_constraint_keyword(sql_type: &str) -> bool {
    sql_type
        .split(|c: char| !c.is_ascii_alphabetic())
        .any(|word| {
            CONSTRAINT_KEYWORDS
                .iter()
                .any(|keyword| keyword.eq_ignore_ascii_case(word))
        })
}

/// Parse a column spec in the format `name[:TYPE]`, the type defaults to `TEXT`
pub fn parse_column_spec(spec: &str) -> Result<Column, Error> {
    let (name, sql_type) = match spec.split_once(':') {
        Some((name, sql_type)) => (name.trim(), sql_type.trim()),
        None => (spec.trim(), DEFAULT_COLUMN_TYPE),
    };

    if !column_name_re().is_match(name)
        || !column_type_re().is_match(sql_type)
        || has_constraint_keyword(sql_type)
    {
        return Err(Error::new(Kind::InvalidColumnSpec(spec.into()), None));
    }

    Ok(Column::new(name, sql_type))
}
