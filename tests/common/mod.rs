#![allow(dead_code)]

use chrono::NaiveDate;
use keyset_page::entities::{ConceptRow, DrugExposureRow, PersonRow, ProcedureOccurrenceRow, VisitOccurrenceRow};
use keyset_page::{CursorError, Dialect, IgnoredFilter, PageObserver, QueryExecutor, SqlStatement, SqlValue};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::cell::RefCell;

pub type RowMapper<R> = fn(&Row<'_>) -> rusqlite::Result<R>;

/// Executes page queries against a rusqlite connection, remembering every
/// statement it ran.
pub struct SqliteExecutor<'c, R> {
    connection: &'c Connection,
    map_row: RowMapper<R>,
    pub statements: Vec<SqlStatement>,
}

impl<'c, R> SqliteExecutor<'c, R> {
    pub fn new(connection: &'c Connection, map_row: RowMapper<R>) -> Self {
        Self {
            connection,
            map_row,
            statements: Vec::new(),
        }
    }
}

impl<R> QueryExecutor for SqliteExecutor<'_, R> {
    type Row = R;
    type Error = rusqlite::Error;

    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> rusqlite::Result<Vec<R>> {
        self.statements.push(SqlStatement {
            sql: sql.to_owned(),
            params: params.to_vec(),
        });
        let values: Vec<Value> = params.iter().map(to_sqlite).collect();
        let mut statement = self.connection.prepare(sql)?;
        let rows = statement
            .query_map(params_from_iter(values.iter()), self.map_row)?
            .collect::<rusqlite::Result<Vec<R>>>();
        rows
    }
}

fn to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Integer(value) => Value::Integer(*value),
        SqlValue::Text(value) => Value::Text(value.clone()),
        SqlValue::Date(value) => Value::Text(value.format("%Y-%m-%d").to_string()),
        SqlValue::Timestamp(value) => Value::Text(value.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
    }
}

/// Collects everything the engine reports.
#[derive(Default)]
pub struct Recorder {
    pub invalid_cursors: RefCell<Vec<(String, CursorError)>>,
    pub ignored_filters: RefCell<Vec<(String, IgnoredFilter)>>,
    pub pages: RefCell<Vec<(usize, bool)>>,
}

impl PageObserver for Recorder {
    fn invalid_cursor(&self, _entity: &'static str, cursor: &str, error: &CursorError) {
        self.invalid_cursors.borrow_mut().push((cursor.to_owned(), error.clone()));
    }

    fn ignored_filter(&self, _entity: &'static str, name: &str, reason: IgnoredFilter) {
        self.ignored_filters.borrow_mut().push((name.to_owned(), reason));
    }

    fn page(&self, _entity: &'static str, items: usize, has_more: bool) {
        self.pages.borrow_mut().push((items, has_more));
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn database() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    connection
        .execute_batch(
            "CREATE TABLE drug_exposure (
                drug_exposure_id INTEGER PRIMARY KEY,
                person_id INTEGER NOT NULL,
                drug_concept_id INTEGER NOT NULL,
                drug_exposure_start_date TEXT NOT NULL,
                drug_exposure_end_date TEXT,
                sig TEXT,
                drug_source_value TEXT
            );
            CREATE TABLE procedure_occurrence (
                procedure_occurrence_id INTEGER PRIMARY KEY,
                person_id INTEGER NOT NULL,
                procedure_concept_id INTEGER NOT NULL,
                procedure_date TEXT NOT NULL,
                procedure_source_value TEXT
            );
            CREATE TABLE concept (
                concept_id INTEGER PRIMARY KEY,
                concept_name TEXT NOT NULL,
                domain_id TEXT NOT NULL,
                vocabulary_id TEXT NOT NULL,
                concept_code TEXT NOT NULL,
                standard_concept TEXT
            );
            CREATE TABLE person (
                person_id INTEGER PRIMARY KEY,
                gender_concept_id INTEGER NOT NULL,
                year_of_birth INTEGER NOT NULL,
                person_source_value TEXT
            );
            CREATE TABLE visit_occurrence (
                visit_occurrence_id INTEGER PRIMARY KEY,
                person_id INTEGER NOT NULL,
                visit_concept_id INTEGER NOT NULL,
                visit_start_date TEXT NOT NULL,
                visit_end_date TEXT
            );",
        )
        .unwrap();
    connection
}

pub fn insert_drug_exposure(
    connection: &Connection,
    id: i64,
    person_id: i64,
    start_date: NaiveDate,
    source_value: &str,
) {
    connection
        .execute(
            "INSERT INTO drug_exposure (drug_exposure_id, person_id, drug_concept_id, drug_exposure_start_date, sig, drug_source_value)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, person_id, 1_100_000 + id, start_date, "1 tablet daily", source_value],
        )
        .unwrap();
}

pub fn insert_procedure(connection: &Connection, id: i64, person_id: i64, date: NaiveDate, source_value: &str) {
    connection
        .execute(
            "INSERT INTO procedure_occurrence (procedure_occurrence_id, person_id, procedure_concept_id, procedure_date, procedure_source_value)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, person_id, 4_000_000 + id, date, source_value],
        )
        .unwrap();
}

pub fn insert_concept(connection: &Connection, id: i64, name: &str, domain: &str, vocabulary: &str, standard: bool) {
    connection
        .execute(
            "INSERT INTO concept (concept_id, concept_name, domain_id, vocabulary_id, concept_code, standard_concept)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, name, domain, vocabulary, format!("C{id}"), standard.then_some("S")],
        )
        .unwrap();
}

pub fn insert_person(connection: &Connection, id: i64, gender_concept_id: i64, year_of_birth: i32) {
    connection
        .execute(
            "INSERT INTO person (person_id, gender_concept_id, year_of_birth, person_source_value)
             VALUES (?1, ?2, ?3, ?4)",
            params![id, gender_concept_id, year_of_birth, format!("MRN-{id:05}")],
        )
        .unwrap();
}

pub fn insert_visit(connection: &Connection, id: i64, person_id: i64, visit_concept_id: i64, start_date: NaiveDate) {
    connection
        .execute(
            "INSERT INTO visit_occurrence (visit_occurrence_id, person_id, visit_concept_id, visit_start_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![id, person_id, visit_concept_id, start_date],
        )
        .unwrap();
}

pub fn drug_exposure_row(row: &Row<'_>) -> rusqlite::Result<DrugExposureRow> {
    Ok(DrugExposureRow {
        drug_exposure_id: row.get("drug_exposure_id")?,
        person_id: row.get("person_id")?,
        drug_concept_id: row.get("drug_concept_id")?,
        drug_exposure_start_date: row.get("drug_exposure_start_date")?,
        drug_exposure_end_date: row.get("drug_exposure_end_date")?,
        sig: row.get("sig")?,
        drug_source_value: row.get("drug_source_value")?,
    })
}

pub fn procedure_row(row: &Row<'_>) -> rusqlite::Result<ProcedureOccurrenceRow> {
    Ok(ProcedureOccurrenceRow {
        procedure_occurrence_id: row.get("procedure_occurrence_id")?,
        person_id: row.get("person_id")?,
        procedure_concept_id: row.get("procedure_concept_id")?,
        procedure_date: row.get("procedure_date")?,
        procedure_source_value: row.get("procedure_source_value")?,
    })
}

pub fn concept_row(row: &Row<'_>) -> rusqlite::Result<ConceptRow> {
    Ok(ConceptRow {
        concept_id: row.get("concept_id")?,
        concept_name: row.get("concept_name")?,
        domain_id: row.get("domain_id")?,
        vocabulary_id: row.get("vocabulary_id")?,
        concept_code: row.get("concept_code")?,
        standard_concept: row.get("standard_concept")?,
    })
}

pub fn person_row(row: &Row<'_>) -> rusqlite::Result<PersonRow> {
    Ok(PersonRow {
        person_id: row.get("person_id")?,
        gender_concept_id: row.get("gender_concept_id")?,
        year_of_birth: row.get("year_of_birth")?,
        person_source_value: row.get("person_source_value")?,
    })
}

pub fn visit_row(row: &Row<'_>) -> rusqlite::Result<VisitOccurrenceRow> {
    Ok(VisitOccurrenceRow {
        visit_occurrence_id: row.get("visit_occurrence_id")?,
        person_id: row.get("person_id")?,
        visit_concept_id: row.get("visit_concept_id")?,
        visit_start_date: row.get("visit_start_date")?,
        visit_end_date: row.get("visit_end_date")?,
    })
}
