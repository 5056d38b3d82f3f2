use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    data::{BrowseState, ListEntry, Promise},
    error::Error,
    util::MountId,
    webapi::CatalogSource,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Id,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "id" => Ok(SortKey::Id),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => f.write_str("Name"),
            SortKey::Id => f.write_str("ID"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("Asc"),
            SortOrder::Descending => f.write_str("Desc"),
        }
    }
}

/// Case-insensitive first, so `Abra` and `abra` end up next to each other,
/// then by exact bytes.
/// Case-insensitive, with lowercase ahead of uppercase when names differ only
/// by case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

pub fn matches_query(entry: &ListEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    entry.name.to_lowercase().contains(&query)
        || entry
            .id
            .is_some_and(|id| id.to_string().contains(&query))
}

/// Filter by `query` and sort by `key`.  The sort is stable, entries that
/// compare equal keep their input order in both directions.
pub fn filter_and_sort(
    entries: &[ListEntry],
    query: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<ListEntry> {
    let mut visible: Vec<ListEntry> = entries
        .iter()
        .filter(|entry| matches_query(entry, query))
        .cloned()
        .collect();
    visible.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Id => a.id.unwrap_or(0).cmp(&b.id.unwrap_or(0)),
        };
        order.apply(ordering)
    });
    visible
}

pub fn load_list(source: &dyn CatalogSource, limit: usize) -> Result<Vec<ListEntry>, Error> {
    let page = source.list_catalog(limit, 0)?;
    Ok(page.entries.into_iter().map(ListEntry::from).collect())
}

pub struct ListView {
    entries: Promise<Vec<ListEntry>, MountId>,
    query: String,
    sort_key: SortKey,
    sort_order: SortOrder,
    visible: Vec<ListEntry>,
}

impl ListView {
    pub fn mount(id: MountId) -> Self {
        Self {
            entries: Promise::Deferred(id),
            query: String::new(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            visible: Vec::new(),
        }
    }

    pub fn entries(&self) -> &Promise<Vec<ListEntry>, MountId> {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn visible(&self) -> &[ListEntry] {
        &self.visible
    }

    /// Apply a finished load.  Stale results are dropped.
    pub fn loaded(
        &mut self,
        id: MountId,
        res: Result<Vec<ListEntry>, Error>,
        browse: &mut BrowseState,
    ) -> bool {
        if !self.entries.update((id, res)) {
            return false;
        }
        self.recompute(browse);
        true
    }

    pub fn set_query(&mut self, query: &str, browse: &mut BrowseState) {
        self.query = query.to_string();
        self.recompute(browse);
    }

    pub fn set_sort_key(&mut self, key: SortKey, browse: &mut BrowseState) {
        self.sort_key = key;
        self.recompute(browse);
    }

    pub fn toggle_sort_order(&mut self, browse: &mut BrowseState) {
        self.sort_order = self.sort_order.toggled();
        self.recompute(browse);
    }

    fn recompute(&mut self, browse: &mut BrowseState) {
        let Some(entries) = self.entries.resolved() else {
            return;
        };
        self.visible = filter_and_sort(entries, &self.query, self.sort_key, self.sort_order);
        browse.publish(self.visible.iter().map(|entry| entry.name.clone()));
    }
}
