use crate::{FilterField, KeysetEntity, OrderingKey, ValueKind};
use ::chrono::NaiveDate;

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "diesel", derive(::diesel::QueryableByName))]
pub struct ProcedureOccurrenceRow {
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub procedure_occurrence_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub person_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub procedure_concept_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Date))]
    pub procedure_date: NaiveDate,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Text>)
    )]
    pub procedure_source_value: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: i64,
    pub patient_id: i64,
    pub concept_id: i64,
    pub performed_on: NaiveDate,
    pub source_value: Option<String>,
}

/// Procedure occurrences, newest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Procedures;

impl KeysetEntity for Procedures {
    type Row = ProcedureOccurrenceRow;
    type Item = Procedure;

    const NAME: &'static str = "procedure";
    const TABLE: &'static str = "procedure_occurrence";
    const KEY: OrderingKey = OrderingKey::descending("procedure_occurrence_id");
    const FILTERS: &'static [FilterField] = &[
        FilterField::equals("person_id", "person_id", ValueKind::Integer),
        FilterField::equals("procedure_concept_id", "procedure_concept_id", ValueKind::Integer),
        FilterField::at_least("date_from", "procedure_date", ValueKind::Date),
        FilterField::at_most("date_to", "procedure_date", ValueKind::Date),
        FilterField::contains("search", "procedure_source_value"),
    ];
    const COLUMNS: &'static [&'static str] = &[
        "procedure_occurrence_id",
        "person_id",
        "procedure_concept_id",
        "procedure_date",
        "procedure_source_value",
    ];

    fn row_key(row: &ProcedureOccurrenceRow) -> i64 {
        row.procedure_occurrence_id
    }

    fn into_item(row: ProcedureOccurrenceRow) -> Procedure {
        Procedure {
            id: row.procedure_occurrence_id,
            patient_id: row.person_id,
            concept_id: row.procedure_concept_id,
            performed_on: row.procedure_date,
            source_value: row.procedure_source_value,
        }
    }
}
