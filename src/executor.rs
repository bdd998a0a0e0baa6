use crate::{Dialect, SqlValue};

/// The storage collaborator's query capability: run one positionally
/// parameterized statement and return its rows in order.
///
/// Errors are returned as-is to whoever requested the page.
pub trait QueryExecutor {
    type Row;
    type Error;

    fn dialect(&self) -> Dialect;

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Self::Row>, Self::Error>;
}

impl<X: QueryExecutor + ?Sized> QueryExecutor for &mut X {
    type Row = X::Row;
    type Error = X::Error;

    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Self::Row>, Self::Error> {
        (**self).execute(sql, params)
    }
}
