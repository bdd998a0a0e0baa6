use crate::{Dialect, QueryExecutor, SqlValue};
use ::diesel::prelude::*;
use ::diesel::sql_types::{BigInt, Date, Text, Timestamp};
use ::std::marker::PhantomData;

/// Runs page queries on a borrowed diesel connection, loading rows of type
/// `R` by column name.
pub struct DieselExecutor<'c, C, R> {
    connection: &'c mut C,
    row: PhantomData<fn() -> R>,
}

impl<'c, C, R> DieselExecutor<'c, C, R> {
    pub fn new(connection: &'c mut C) -> Self {
        Self {
            connection,
            row: PhantomData,
        }
    }
}

/// Binds each value with the sql type matching its variant.
fn bind_all<'f, DB>(
    mut query: ::diesel::query_builder::BoxedSqlQuery<'f, DB, ::diesel::query_builder::SqlQuery>,
    params: &[SqlValue],
) -> ::diesel::query_builder::BoxedSqlQuery<'f, DB, ::diesel::query_builder::SqlQuery>
where
    DB: ::diesel::backend::Backend
        + ::diesel::sql_types::HasSqlType<BigInt>
        + ::diesel::sql_types::HasSqlType<Text>
        + ::diesel::sql_types::HasSqlType<Date>
        + ::diesel::sql_types::HasSqlType<Timestamp>,
    i64: ::diesel::serialize::ToSql<BigInt, DB>,
    String: ::diesel::serialize::ToSql<Text, DB>,
    ::chrono::NaiveDate: ::diesel::serialize::ToSql<Date, DB>,
    ::chrono::NaiveDateTime: ::diesel::serialize::ToSql<Timestamp, DB>,
{
    for param in params {
        query = match param.clone() {
            SqlValue::Integer(value) => query.bind::<BigInt, _>(value),
            SqlValue::Text(value) => query.bind::<Text, _>(value),
            SqlValue::Date(value) => query.bind::<Date, _>(value),
            SqlValue::Timestamp(value) => query.bind::<Timestamp, _>(value),
        };
    }
    query
}

macro_rules! diesel_executor {
    ($($feature:literal: $connection:ty, $backend:ty => $dialect:expr;)*) => {
        $(
            #[cfg(feature = $feature)]
            impl<'c, R> QueryExecutor for DieselExecutor<'c, $connection, R>
            where
                R: QueryableByName<$backend> + 'static,
            {
                type Row = R;
                type Error = ::diesel::result::Error;

                fn dialect(&self) -> Dialect {
                    $dialect
                }

                fn execute(&mut self, sql: &str, params: &[SqlValue]) -> QueryResult<Vec<R>> {
                    let query = ::diesel::sql_query(sql).into_boxed::<$backend>();
                    bind_all(query, params).load::<R>(&mut *self.connection)
                }
            }
        )*
    };
}

diesel_executor! {
    "postgres": ::diesel::pg::PgConnection, ::diesel::pg::Pg => Dialect::Postgres;
    "sqlite": ::diesel::sqlite::SqliteConnection, ::diesel::sqlite::Sqlite => Dialect::Sqlite;
    "mysql": ::diesel::mysql::MysqlConnection, ::diesel::mysql::Mysql => Dialect::MySql;
}
