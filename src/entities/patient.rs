use crate::{FilterField, KeysetEntity, OrderingKey, ValueKind};

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "diesel", derive(::diesel::QueryableByName))]
pub struct PersonRow {
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub person_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub gender_concept_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Integer))]
    pub year_of_birth: i32,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Text>)
    )]
    pub person_source_value: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub gender_concept_id: i64,
    pub birth_year: i32,
    pub medical_record_number: Option<String>,
}

/// Registered patients, most recently registered first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Patients;

impl KeysetEntity for Patients {
    type Row = PersonRow;
    type Item = Patient;

    const NAME: &'static str = "patient";
    const TABLE: &'static str = "person";
    const KEY: OrderingKey = OrderingKey::descending("person_id");
    const FILTERS: &'static [FilterField] = &[
        FilterField::equals("gender_concept_id", "gender_concept_id", ValueKind::Integer),
        FilterField::at_least("birth_year_from", "year_of_birth", ValueKind::Integer),
        FilterField::at_most("birth_year_to", "year_of_birth", ValueKind::Integer),
        FilterField::contains("search", "person_source_value"),
    ];
    const COLUMNS: &'static [&'static str] = &["person_id", "gender_concept_id", "year_of_birth", "person_source_value"];

    fn row_key(row: &PersonRow) -> i64 {
        row.person_id
    }

    fn into_item(row: PersonRow) -> Patient {
        Patient {
            id: row.person_id,
            gender_concept_id: row.gender_concept_id,
            birth_year: row.year_of_birth,
            medical_record_number: row.person_source_value,
        }
    }
}
