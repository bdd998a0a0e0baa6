use crate::{FilterField, OrderBy, SortDirection};

/// The column keyset pagination orders and seeks by. It must be unique,
/// immutable and totally ordered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OrderingKey {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl OrderingKey {
    pub const fn ascending(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn descending(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    pub fn order_by(&self) -> OrderBy {
        OrderBy {
            column: self.column,
            direction: self.direction,
        }
    }
}

/// Describes how one entity is stored and searched.
///
/// Implementations are plain descriptors; one [`Paginator`](crate::Paginator)
/// is instantiated per entity over them.
pub trait KeysetEntity {
    /// Raw row as produced by the executor.
    type Row;
    /// Typed entity handed back to callers.
    type Item;

    /// Used in diagnostics only.
    const NAME: &'static str;
    const TABLE: &'static str;
    const KEY: OrderingKey;
    /// Filterable fields, in the order their predicates are appended.
    const FILTERS: &'static [FilterField];
    /// Selected columns; empty selects all of them.
    const COLUMNS: &'static [&'static str] = &[];

    fn row_key(row: &Self::Row) -> i64;

    fn into_item(row: Self::Row) -> Self::Item;
}
