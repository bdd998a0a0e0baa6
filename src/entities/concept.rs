use crate::{FilterField, KeysetEntity, OrderingKey, ValueKind};

static STANDARD_CONCEPT_FLAG: &str = "S";

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "diesel", derive(::diesel::QueryableByName))]
pub struct ConceptRow {
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::BigInt))]
    pub concept_id: i64,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Text))]
    pub concept_name: String,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Text))]
    pub domain_id: String,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Text))]
    pub vocabulary_id: String,
    #[cfg_attr(feature = "diesel", diesel(sql_type = ::diesel::sql_types::Text))]
    pub concept_code: String,
    #[cfg_attr(
        feature = "diesel",
        diesel(sql_type = ::diesel::sql_types::Nullable<::diesel::sql_types::Text>)
    )]
    pub standard_concept: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: i64,
    pub name: String,
    pub domain: String,
    pub vocabulary: String,
    pub code: String,
    pub standard: bool,
}

/// Terminology concepts, in ascending identifier order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Concepts;

impl KeysetEntity for Concepts {
    type Row = ConceptRow;
    type Item = Concept;

    const NAME: &'static str = "concept";
    const TABLE: &'static str = "concept";
    const KEY: OrderingKey = OrderingKey::ascending("concept_id");
    const FILTERS: &'static [FilterField] = &[
        FilterField::equals("domain_id", "domain_id", ValueKind::Text),
        FilterField::equals("vocabulary_id", "vocabulary_id", ValueKind::Text),
        FilterField::equals("concept_code", "concept_code", ValueKind::Text),
        FilterField::contains("search", "concept_name"),
    ];
    const COLUMNS: &'static [&'static str] = &[
        "concept_id",
        "concept_name",
        "domain_id",
        "vocabulary_id",
        "concept_code",
        "standard_concept",
    ];

    fn row_key(row: &ConceptRow) -> i64 {
        row.concept_id
    }

    fn into_item(row: ConceptRow) -> Concept {
        Concept {
            id: row.concept_id,
            standard: row.standard_concept.as_deref() == Some(STANDARD_CONCEPT_FLAG),
            name: row.concept_name,
            domain: row.domain_id,
            vocabulary: row.vocabulary_id,
            code: row.concept_code,
        }
    }
}
