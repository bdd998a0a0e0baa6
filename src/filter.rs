use crate::{Comparison, PageObserver, QueryBuilder, SqlValue, ValueKind, LIKE_ESCAPE};
use ::std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Eq, Hash, IsVariant, PartialEq)]
pub enum FilterOperator {
    Equals,
    GreaterOrEqual,
    LessOrEqual,
    /// Free-text search; the value is wrapped in wildcards before binding.
    Contains,
}

impl FilterOperator {
    pub fn comparison(self) -> Comparison {
        match self {
            Self::Equals => Comparison::Equal,
            Self::GreaterOrEqual => Comparison::GreaterOrEqual,
            Self::LessOrEqual => Comparison::LessOrEqual,
            Self::Contains => Comparison::Contains,
        }
    }

    fn bind(self, value: SqlValue) -> SqlValue {
        match (self, value) {
            (Self::Contains, SqlValue::Text(text)) => SqlValue::Text(contains_pattern(&text)),
            (_, value) => value,
        }
    }
}

/// Wraps `text` in wildcards so it matches as a literal substring.
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// One filterable field of an entity: the request-facing name, the column it
/// constrains, and how.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FilterField {
    pub name: &'static str,
    pub column: &'static str,
    pub operator: FilterOperator,
    pub kind: ValueKind,
}

impl FilterField {
    pub const fn new(name: &'static str, column: &'static str, operator: FilterOperator, kind: ValueKind) -> Self {
        Self {
            name,
            column,
            operator,
            kind,
        }
    }

    pub const fn equals(name: &'static str, column: &'static str, kind: ValueKind) -> Self {
        Self::new(name, column, FilterOperator::Equals, kind)
    }

    pub const fn at_least(name: &'static str, column: &'static str, kind: ValueKind) -> Self {
        Self::new(name, column, FilterOperator::GreaterOrEqual, kind)
    }

    pub const fn at_most(name: &'static str, column: &'static str, kind: ValueKind) -> Self {
        Self::new(name, column, FilterOperator::LessOrEqual, kind)
    }

    pub const fn contains(name: &'static str, column: &'static str) -> Self {
        Self::new(name, column, FilterOperator::Contains, ValueKind::Text)
    }
}

/// Caller-supplied filter values keyed by filter name. Every entry is
/// optional; values are coerced to the field's kind during composition.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterSpec(BTreeMap<String, SqlValue>);

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Option<SqlValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for FilterSpec {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
    }
}

/// Why a supplied filter contributed no predicate.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IsVariant, PartialEq)]
pub enum IgnoredFilter {
    #[display("unknown filter")]
    Unknown,
    #[display("value is not a valid {expected}")]
    Uncoercible { expected: ValueKind },
}

/// Appends one predicate per supplied filter, in the order of `fields`.
///
/// Unknown names and values that fail coercion are dropped and reported to
/// `observer`; neither is an error.
pub fn compose_filters<O: PageObserver + ?Sized>(
    entity: &'static str,
    fields: &'static [FilterField],
    filters: &FilterSpec,
    builder: &mut QueryBuilder,
    observer: &O,
) {
    for name in filters.names() {
        if !fields.iter().any(|field| field.name == name) {
            observer.ignored_filter(entity, name, IgnoredFilter::Unknown);
        }
    }

    for field in fields {
        let Some(value) = filters.get(field.name) else {
            continue;
        };
        match value.clone().coerce(field.kind) {
            Some(value) => {
                builder.push(field.column, field.operator.comparison(), field.operator.bind(value));
            }
            None => observer.ignored_filter(
                entity,
                field.name,
                IgnoredFilter::Uncoercible {
                    expected: field.kind,
                },
            ),
        }
    }
}
