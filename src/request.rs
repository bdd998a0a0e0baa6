use crate::{FilterSpec, SqlValue};
use ::std::num::IntErrorKind;

static LIMIT_PARAM: &str = "limit";
static CURSOR_PARAM: &str = "cursor";

/// A search over one entity: optional page size, optional cursor, and any
/// number of entity-specific filters.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchRequest {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    pub filters: FilterSpec,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.filters.insert(name, value);
        self
    }

    /// Builds a request from decoded query-string pairs.
    ///
    /// `limit` that is not an integer is treated as absent (one out of `i64`
    /// range saturates, so it is still clamped later), an empty
    /// `cursor` likewise; every other pair becomes a text filter, to be
    /// coerced (or ignored) by the entity it is run against.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            if key == LIMIT_PARAM {
                request.limit = parse_limit(value);
            } else if key == CURSOR_PARAM {
                request.cursor = Some(value.to_owned()).filter(|cursor| !cursor.is_empty());
            } else {
                request.filters.insert(key, value);
            }
        }
        request
    }
}

fn parse_limit(value: &str) -> Option<i64> {
    match value.parse::<i64>() {
        Ok(limit) => Some(limit),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
