use crate::{KeysetEntity, PageCursor};

/// One page of results. `next_cursor` is absent (not empty) on the last page
/// and is omitted from the serialized form.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }

    /// Builds a page from up to `limit + 1` rows fetched in key order.
    ///
    /// Surplus rows mean more pages remain: they are dropped, and the next
    /// cursor is taken from the last row that was kept. A zero `limit` is
    /// treated as one.
    pub fn assemble<E>(mut rows: Vec<E::Row>, limit: u32) -> Self
    where
        E: KeysetEntity<Item = T>,
    {
        let limit = limit.max(1) as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let next_cursor = match has_more {
            true => rows
                .last()
                .map(|row| PageCursor::new(E::KEY.column, E::row_key(row)).encode()),
            false => None,
        };

        Self {
            items: rows.into_iter().map(E::into_item).collect(),
            next_cursor,
        }
    }
}
