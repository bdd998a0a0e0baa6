use crate::{CursorError, IgnoredFilter, SqlStatement};

/// Hooks for the events the engine recovers from or wants to report. All
/// methods default to doing nothing.
pub trait PageObserver {
    /// A cursor was rejected and the request restarted from the first page.
    fn invalid_cursor(&self, _entity: &'static str, _cursor: &str, _error: &CursorError) {}

    fn ignored_filter(&self, _entity: &'static str, _name: &str, _reason: IgnoredFilter) {}

    fn query(&self, _entity: &'static str, _statement: &SqlStatement) {}

    fn page(&self, _entity: &'static str, _items: usize, _has_more: bool) {}
}

impl<O: PageObserver + ?Sized> PageObserver for &O {
    fn invalid_cursor(&self, entity: &'static str, cursor: &str, error: &CursorError) {
        (**self).invalid_cursor(entity, cursor, error)
    }

    fn ignored_filter(&self, entity: &'static str, name: &str, reason: IgnoredFilter) {
        (**self).ignored_filter(entity, name, reason)
    }

    fn query(&self, entity: &'static str, statement: &SqlStatement) {
        (**self).query(entity, statement)
    }

    fn page(&self, entity: &'static str, items: usize, has_more: bool) {
        (**self).page(entity, items, has_more)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NoopObserver;

impl PageObserver for NoopObserver {}

/// Reports engine events as `tracing` events.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TracingObserver;

impl PageObserver for TracingObserver {
    fn invalid_cursor(&self, entity: &'static str, cursor: &str, error: &CursorError) {
        tracing::warn!(entity, cursor, error = %error, "invalid pagination cursor, restarting from the first page");
    }

    fn ignored_filter(&self, entity: &'static str, name: &str, reason: IgnoredFilter) {
        tracing::warn!(entity, filter = name, reason = %reason, "ignoring search filter");
    }

    fn query(&self, entity: &'static str, statement: &SqlStatement) {
        tracing::debug!(entity, sql = %statement.sql, params = statement.params.len(), "fetching page");
    }

    fn page(&self, entity: &'static str, items: usize, has_more: bool) {
        tracing::debug!(entity, items, has_more, "page assembled");
    }
}
