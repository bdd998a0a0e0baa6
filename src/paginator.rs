use crate::{
    compose_filters, pagination_config, KeysetEntity, NoopObserver, Page, PageCursor, PageObserver, PaginationConfig,
    QueryBuilder, QueryExecutor, QueryPlan, SearchRequest,
};
use ::std::fmt;
use ::std::marker::PhantomData;

/// Keyset pagination over one entity.
///
/// Holds no per-request state: every call builds a fresh plan, issues exactly
/// one query through the supplied executor and assembles the page. Invalid
/// cursors and filters are recovered from (and reported to the observer);
/// executor errors are returned unchanged.
pub struct Paginator<E, O = NoopObserver> {
    config: PaginationConfig,
    observer: O,
    entity: PhantomData<fn() -> E>,
}

impl<E: KeysetEntity> Paginator<E> {
    pub fn new() -> Self {
        Self::with_config(*pagination_config())
    }

    pub fn with_config(config: PaginationConfig) -> Self {
        Self {
            config,
            observer: NoopObserver,
            entity: PhantomData,
        }
    }
}

impl<E: KeysetEntity> Default for Paginator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, O: Clone> Clone for Paginator<E, O> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            observer: self.observer.clone(),
            entity: PhantomData,
        }
    }
}

impl<E, O: fmt::Debug> fmt::Debug for Paginator<E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("entity", &::std::any::type_name::<E>())
            .field("config", &self.config)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<E: KeysetEntity, O: PageObserver> Paginator<E, O> {
    pub fn with_observer<O2: PageObserver>(self, observer: O2) -> Paginator<E, O2> {
        Paginator {
            config: self.config,
            observer,
            entity: PhantomData,
        }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Decodes a cursor issued for this entity. Anything else is reported and
    /// treated as no cursor at all.
    pub fn decode_cursor(&self, token: &str) -> Option<i64> {
        match PageCursor::try_decode(token).and_then(|cursor| cursor.value_for(E::KEY.column)) {
            Ok(value) => Some(value),
            Err(err) => {
                self.observer.invalid_cursor(E::NAME, token, &err);
                None
            }
        }
    }

    /// Binding order: cursor predicate, then filters in declared order; the
    /// LIMIT parameter follows when rendered.
    pub fn plan(&self, request: &SearchRequest) -> QueryPlan {
        let limit = self.config.clamp_limit(request.limit);

        let mut builder = QueryBuilder::new();
        if let Some(key) = request.cursor.as_deref().and_then(|token| self.decode_cursor(token)) {
            builder.push(E::KEY.column, E::KEY.direction.cursor_comparison(), key);
        }
        compose_filters(E::NAME, E::FILTERS, &request.filters, &mut builder, &self.observer);

        builder.finish(E::TABLE, E::COLUMNS, E::KEY.order_by(), limit)
    }

    pub fn fetch<X>(&self, executor: &mut X, request: &SearchRequest) -> Result<Page<E::Item>, X::Error>
    where
        X: QueryExecutor<Row = E::Row> + ?Sized,
    {
        let plan = self.plan(request);
        let statement = plan.render(executor.dialect());
        self.observer.query(E::NAME, &statement);

        let rows = executor.execute(&statement.sql, &statement.params)?;

        let page = Page::assemble::<E>(rows, plan.limit);
        self.observer.page(E::NAME, page.len(), page.has_more());
        Ok(page)
    }

    /// Follows `next_cursor` from `request` until the last page, one query per
    /// page. Iteration ends after the first error.
    pub fn pages<'a, X>(&'a self, executor: &'a mut X, request: SearchRequest) -> Pages<'a, E, O, X>
    where
        X: QueryExecutor<Row = E::Row> + ?Sized,
    {
        Pages {
            paginator: self,
            executor,
            request: Some(request),
        }
    }
}

pub struct Pages<'a, E, O, X: ?Sized> {
    paginator: &'a Paginator<E, O>,
    executor: &'a mut X,
    request: Option<SearchRequest>,
}

impl<'a, E, O, X> Iterator for Pages<'a, E, O, X>
where
    E: KeysetEntity,
    O: PageObserver,
    X: QueryExecutor<Row = E::Row> + ?Sized,
{
    type Item = Result<Page<E::Item>, X::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut request = self.request.take()?;
        let result = self.paginator.fetch(&mut *self.executor, &request);
        if let Ok(Page {
            next_cursor: Some(cursor),
            ..
        }) = &result
        {
            request.cursor = Some(cursor.clone());
            self.request = Some(request);
        }
        Some(result)
    }
}
