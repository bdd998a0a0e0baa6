use crate::{SortDirection, SqlValue};
use ::itertools::Itertools;
use ::std::fmt::Write;

/// Placeholder and pattern-match conventions of the target database.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, IsVariant, PartialEq)]
pub enum Dialect {
    /// `$1, $2, ...` placeholders, case-insensitive `ILIKE`.
    #[default]
    Postgres,
    /// `?` placeholders, `LIKE` (case-insensitive for ASCII).
    Sqlite,
    /// `?` placeholders, `LIKE` (collation dependent).
    MySql,
}

/// Escape character for contains patterns. Unlike a backslash it needs no
/// quoting in MySQL string literals.
pub const LIKE_ESCAPE: char = '!';

impl Dialect {
    /// Placeholder for the zero-based parameter `index`.
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Postgres => format!("${}", index + 1),
            Self::Sqlite | Self::MySql => "?".to_owned(),
        }
    }

    fn contains_operator(self) -> &'static str {
        match self {
            Self::Postgres => "ILIKE",
            Self::Sqlite | Self::MySql => "LIKE",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, IsVariant, PartialEq)]
pub enum Comparison {
    Equal,
    GreaterOrEqual,
    LessOrEqual,
    Greater,
    Less,
    /// Text pattern match; the bound value carries the wildcards, with
    /// literal `%`, `_` and [`LIKE_ESCAPE`] escaped.
    Contains,
}

impl Comparison {
    pub fn operator(self, dialect: Dialect) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Contains => dialect.contains_operator(),
        }
    }
}

/// A single condition bound to exactly one positional parameter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Predicate {
    pub column: &'static str,
    pub comparison: Comparison,
    pub param_index: usize,
}

impl Predicate {
    pub fn render(&self, dialect: Dialect) -> String {
        let mut sql = format!(
            "{} {} {}",
            self.column,
            self.comparison.operator(dialect),
            dialect.placeholder(self.param_index)
        );
        if self.comparison.is_contains() {
            let _ = write!(sql, " ESCAPE '{LIKE_ESCAPE}'");
        }
        sql
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Accumulates `(predicate, parameter)` pairs. A predicate's parameter index
/// is assigned at push time, so the two lists cannot drift apart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuilder {
    predicates: Vec<Predicate>,
    params: Vec<SqlValue>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: &'static str, comparison: Comparison, value: impl Into<SqlValue>) -> &mut Self {
        let param_index = self.params.len();
        self.params.push(value.into());
        self.predicates.push(Predicate {
            column,
            comparison,
            param_index,
        });
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn finish(self, table: &'static str, columns: &'static [&'static str], order_by: OrderBy, limit: u32) -> QueryPlan {
        QueryPlan {
            table,
            columns,
            predicates: self.predicates,
            params: self.params,
            order_by,
            limit,
        }
    }
}

/// Everything needed to fetch one page: predicates with their parameters,
/// the fixed ordering, and the (already clamped) page size.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryPlan {
    pub table: &'static str,
    /// Empty selects every column.
    pub columns: &'static [&'static str],
    pub predicates: Vec<Predicate>,
    pub params: Vec<SqlValue>,
    pub order_by: OrderBy,
    pub limit: u32,
}

/// A rendered statement with its parameters in binding order.
#[derive(Clone, Debug, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryPlan {
    /// Rows requested from storage: one beyond the page to detect more pages.
    pub fn fetch_count(&self) -> i64 {
        i64::from(self.limit) + 1
    }

    pub fn render(&self, dialect: Dialect) -> SqlStatement {
        let columns = match self.columns {
            [] => "*".to_owned(),
            columns => columns.iter().join(", "),
        };
        let mut sql = format!("SELECT {columns} FROM {}", self.table);
        if !self.predicates.is_empty() {
            let conditions = self.predicates.iter().map(|predicate| predicate.render(dialect)).join(" AND ");
            let _ = write!(sql, " WHERE {conditions}");
        }
        let _ = write!(
            sql,
            " ORDER BY {} {} LIMIT {}",
            self.order_by.column,
            self.order_by.direction,
            dialect.placeholder(self.params.len()),
        );

        let mut params = Vec::with_capacity(self.params.len() + 1);
        params.extend(self.params.iter().cloned());
        params.push(SqlValue::Integer(self.fetch_count()));

        SqlStatement { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_by(direction: SortDirection) -> OrderBy {
        OrderBy {
            column: "drug_exposure_id",
            direction,
        }
    }

    #[test]
    fn assigns_indices_in_push_order() {
        let mut builder = QueryBuilder::new();
        builder
            .push("drug_exposure_id", Comparison::Less, 6i64)
            .push("person_id", Comparison::Equal, 42i64)
            .push("drug_source_value", Comparison::Contains, "%aspirin%");

        let indices: Vec<usize> = builder.predicates().iter().map(|p| p.param_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(builder.params()[1], SqlValue::Integer(42));
    }

    #[test]
    fn renders_postgres_statement() {
        let mut builder = QueryBuilder::new();
        builder
            .push("drug_exposure_id", Comparison::Less, 6i64)
            .push("person_id", Comparison::Equal, 42i64)
            .push("drug_source_value", Comparison::Contains, "%aspirin%");
        let plan = builder.finish("drug_exposure", &[], order_by(SortDirection::Descending), 20);

        let statement = plan.render(Dialect::Postgres);
        assert_eq!(
            statement.sql,
            "SELECT * FROM drug_exposure WHERE drug_exposure_id < $1 AND person_id = $2 \
             AND drug_source_value ILIKE $3 ESCAPE '!' ORDER BY drug_exposure_id DESC LIMIT $4"
        );
        assert_eq!(
            statement.params,
            vec![
                SqlValue::Integer(6),
                SqlValue::Integer(42),
                SqlValue::from("%aspirin%"),
                SqlValue::Integer(21),
            ]
        );
    }

    #[test]
    fn renders_without_where_clause() {
        let plan = QueryBuilder::new().finish(
            "concept",
            &["concept_id", "concept_name"],
            OrderBy {
                column: "concept_id",
                direction: SortDirection::Ascending,
            },
            100,
        );

        let statement = plan.render(Dialect::Sqlite);
        assert_eq!(
            statement.sql,
            "SELECT concept_id, concept_name FROM concept ORDER BY concept_id ASC LIMIT ?"
        );
        assert_eq!(statement.params, vec![SqlValue::Integer(101)]);
    }

    #[test]
    fn contains_operator_depends_on_dialect() {
        assert_eq!(Comparison::Contains.operator(Dialect::Postgres), "ILIKE");
        assert_eq!(Comparison::Contains.operator(Dialect::MySql), "LIKE");
        assert_eq!(Dialect::Postgres.placeholder(0), "$1");
        assert_eq!(Dialect::MySql.placeholder(3), "?");
    }

    #[test]
    fn contains_predicates_declare_escape_character() {
        let predicate = Predicate {
            column: "concept_name",
            comparison: Comparison::Contains,
            param_index: 0,
        };
        assert_eq!(predicate.render(Dialect::Sqlite), "concept_name LIKE ? ESCAPE '!'");
        assert_eq!(predicate.render(Dialect::Postgres), "concept_name ILIKE $1 ESCAPE '!'");

        let predicate = Predicate {
            comparison: Comparison::Equal,
            ..predicate
        };
        assert_eq!(predicate.render(Dialect::MySql), "concept_name = ?");
    }
}
