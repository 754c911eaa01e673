// History statements

use backend_domain::{EVENT_FIELD_COUNT, MAX_BIND_PARAMETERS};

pub const HISTORY_TABLE: &str = "history";

/// Writable columns, in bind order.
pub const HISTORY_COLUMNS: [&str; EVENT_FIELD_COUNT] = [
    "title",
    "description",
    "year",
    "period",
    "month",
    "day",
    "country",
    "city",
];

const RETURNED_COLUMNS: &str = "id, title, description, year, period, month, day, country, city";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StatementError {
    #[error("multi-row insert needs at least one row")]
    NoRows,
    #[error("{rows} rows need {params} bind parameters (max {max})")]
    TooManyParameters { rows: usize, params: usize, max: usize },
}

// Row i binds $(w*i + 1) ..= $(w*i + w), w = column count
#[derive(Debug, Clone, Copy)]
pub struct MultiRowInsert {
    table: &'static str,
    columns: &'static [&'static str],
}

impl MultiRowInsert {
    pub const fn new(table: &'static str, columns: &'static [&'static str]) -> Self {
        Self { table, columns }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn sql(&self, rows: usize, returning: &str) -> Result<String, StatementError> {
        if rows == 0 {
            return Err(StatementError::NoRows);
        }
        let params = rows.saturating_mul(self.width());
        if params > MAX_BIND_PARAMETERS {
            return Err(StatementError::TooManyParameters {
                rows,
                params,
                max: MAX_BIND_PARAMETERS,
            });
        }

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ",
            self.table,
            self.columns.join(", ")
        );
        for row in 0..rows {
            if row > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&self.row_placeholders(row));
        }
        sql.push_str(" RETURNING ");
        sql.push_str(returning);
        Ok(sql)
    }

    fn row_placeholders(&self, row: usize) -> String {
        let first = row * self.width() + 1;
        let slots = (first..first + self.width())
            .map(|index| format!("${index}"))
            .collect::<Vec<_>>();
        format!("({})", slots.join(", "))
    }
}

#[derive(Debug, Clone)]
pub struct HistoryStatements {
    pub create_table: String,
    pub insert_one: String,
    pub select_all: String,
    pub update: String,
    pub delete: String,
    pub select_by_country: String,
    pub select_page: String,
    pub ping: &'static str,
    bulk: MultiRowInsert,
}

impl HistoryStatements {
    pub fn new() -> Self {
        let bulk = MultiRowInsert::new(HISTORY_TABLE, &HISTORY_COLUMNS);
        let assignments = HISTORY_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{} = ${}", column, index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let id_slot = EVENT_FIELD_COUNT + 1;

        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {HISTORY_TABLE} (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    year INTEGER NOT NULL,
    period TEXT NOT NULL,
    month INTEGER,
    day INTEGER,
    country TEXT NOT NULL,
    city TEXT NOT NULL
)"
            ),
            insert_one: format!(
                "INSERT INTO {} ({}) VALUES {} RETURNING {}",
                HISTORY_TABLE,
                HISTORY_COLUMNS.join(", "),
                bulk.row_placeholders(0),
                RETURNED_COLUMNS
            ),
            select_all: format!("SELECT {RETURNED_COLUMNS} FROM {HISTORY_TABLE}"),
            update: format!(
                "UPDATE {HISTORY_TABLE} SET {assignments} WHERE id = ${id_slot} RETURNING {RETURNED_COLUMNS}"
            ),
            delete: format!("DELETE FROM {HISTORY_TABLE} WHERE id = $1 RETURNING {RETURNED_COLUMNS}"),
            select_by_country: format!(
                "SELECT {RETURNED_COLUMNS} FROM {HISTORY_TABLE} WHERE country = $1"
            ),
            select_page: format!("SELECT {RETURNED_COLUMNS} FROM {HISTORY_TABLE} LIMIT $1 OFFSET $2"),
            ping: "SELECT 1",
            bulk,
        }
    }

    pub fn insert_many(&self, rows: usize) -> Result<String, StatementError> {
        self.bulk.sql(rows, RETURNED_COLUMNS)
    }
}

impl Default for HistoryStatements {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_insert_binds_eight_columns() {
        let statements = HistoryStatements::new();
        assert_eq!(
            statements.insert_one,
            "INSERT INTO history (title, description, year, period, month, day, country, city) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, title, description, year, period, month, day, country, city"
        );
    }

    #[test]
    fn multi_row_placeholders_advance_by_row_width() {
        let sql = HistoryStatements::new().insert_many(3).expect("sql");
        assert!(sql.contains("VALUES ($1, $2, $3, $4, $5, $6, $7, $8), "));
        assert!(sql.contains("($9, $10, $11, $12, $13, $14, $15, $16), "));
        assert!(sql.contains("($17, $18, $19, $20, $21, $22, $23, $24) RETURNING"));
        assert!(!sql.contains("$25"));
    }

    #[test]
    fn multi_row_with_one_row_matches_single_insert() {
        let statements = HistoryStatements::new();
        assert_eq!(statements.insert_many(1).expect("sql"), statements.insert_one);
    }

    #[test]
    fn multi_row_without_rows_is_refused() {
        let err = HistoryStatements::new().insert_many(0).expect_err("no rows");
        assert_eq!(err, StatementError::NoRows);
    }

    #[test]
    fn multi_row_respects_parameter_limit() {
        let statements = HistoryStatements::new();
        assert!(statements.insert_many(8191).is_ok());
        match statements.insert_many(8192).expect_err("too many") {
            StatementError::TooManyParameters { params, max, .. } => {
                assert_eq!(params, 65_536);
                assert_eq!(max, 65_535);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn update_sets_every_column_and_keys_on_ninth_parameter() {
        let update = HistoryStatements::new().update;
        assert!(update.starts_with(
            "UPDATE history SET title = $1, description = $2, year = $3, period = $4, \
             month = $5, day = $6, country = $7, city = $8 WHERE id = $9"
        ));
    }

    #[test]
    fn reads_have_no_ordering_clause() {
        let statements = HistoryStatements::new();
        for sql in [
            &statements.select_all,
            &statements.select_by_country,
            &statements.select_page,
        ] {
            assert!(!sql.contains("ORDER BY"), "{sql}");
        }
        assert!(statements.select_page.ends_with("LIMIT $1 OFFSET $2"));
    }
}
