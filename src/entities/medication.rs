use crate::{FilterField, KeysetEntity, OrderingKey, ValueKind};
use ::chrono::NaiveDate;

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "diesel", derive(::diesel::QueryableByName))]
pub struct DrugExposureRow {
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub drug_exposure_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub person_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub drug_concept_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Date))]
    pub drug_exposure_start_date: NaiveDate,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Date>)
    )]
    pub drug_exposure_end_date: Option<NaiveDate>,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Text>)
    )]
    pub sig: Option<String>,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Text>)
    )]
    pub drug_source_value: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: i64,
    pub patient_id: i64,
    pub concept_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub dosage: Option<String>,
    pub source_value: Option<String>,
}

/// Drug exposures, newest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Medications;

impl KeysetEntity for Medications {
    type Row = DrugExposureRow;
    type Item = Medication;

    const NAME: &'static str = "medication";
    const TABLE: &'static str = "drug_exposure";
    const KEY: OrderingKey = OrderingKey::descending("drug_exposure_id");
    const FILTERS: &'static [FilterField] = &[
        FilterField::equals("person_id", "person_id", ValueKind::Integer),
        FilterField::equals("drug_concept_id", "drug_concept_id", ValueKind::Integer),
        FilterField::at_least("start_date_from", "drug_exposure_start_date", ValueKind::Date),
        FilterField::at_most("start_date_to", "drug_exposure_start_date", ValueKind::Date),
        FilterField::contains("search", "drug_source_value"),
    ];
    const COLUMNS: &'static [&'static str] = &[
        "drug_exposure_id",
        "person_id",
        "drug_concept_id",
        "drug_exposure_start_date",
        "drug_exposure_end_date",
        "sig",
        "drug_source_value",
    ];

    fn row_key(row: &DrugExposureRow) -> i64 {
        row.drug_exposure_id
    }

    fn into_item(row: DrugExposureRow) -> Medication {
        Medication {
            id: row.drug_exposure_id,
            patient_id: row.person_id,
            concept_id: row.drug_concept_id,
            start_date: row.drug_exposure_start_date,
            end_date: row.drug_exposure_end_date,
            dosage: row.sig,
            source_value: row.drug_source_value,
        }
    }
}
