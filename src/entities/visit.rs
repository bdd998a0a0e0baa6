use crate::{FilterField, KeysetEntity, OrderingKey, ValueKind};
use ::chrono::NaiveDate;

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "diesel", derive(::diesel::QueryableByName))]
pub struct VisitOccurrenceRow {
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub visit_occurrence_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub person_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub visit_concept_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Date))]
    pub visit_start_date: NaiveDate,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Date>)
    )]
    pub visit_end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,
    pub patient_id: i64,
    pub concept_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Visit occurrences, newest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Visits;

impl KeysetEntity for Visits {
    type Row = VisitOccurrenceRow;
    type Item = Visit;

    const NAME: &'static str = "visit";
    const TABLE: &'static str = "visit_occurrence";
    const KEY: OrderingKey = OrderingKey::descending("visit_occurrence_id");
    const FILTERS: &'static [FilterField] = &[
        FilterField::equals("person_id", "person_id", ValueKind::Integer),
        FilterField::equals("visit_concept_id", "visit_concept_id", ValueKind::Integer),
        FilterField::at_least("start_date_from", "visit_start_date", ValueKind::Date),
        FilterField::at_most("start_date_to", "visit_start_date", ValueKind::Date),
    ];
    const COLUMNS: &'static [&'static str] = &[
        "visit_occurrence_id",
        "person_id",
        "visit_concept_id",
        "visit_start_date",
        "visit_end_date",
    ];

    fn row_key(row: &VisitOccurrenceRow) -> i64 {
        row.visit_occurrence_id
    }

    fn into_item(row: VisitOccurrenceRow) -> Visit {
        Visit {
            id: row.visit_occurrence_id,
            patient_id: row.person_id,
            concept_id: row.visit_concept_id,
            start_date: row.visit_start_date,
            end_date: row.visit_end_date,
        }
    }
}
