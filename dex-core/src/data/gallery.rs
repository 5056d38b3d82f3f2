use std::{sync::Arc, thread};

use crate::{
    data::{BrowseState, GalleryItem, Promise},
    error::Error,
    util::MountId,
    webapi::CatalogSource,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryData {
    pub items: Vec<GalleryItem>,
    pub categories: Vec<Arc<str>>,
}

/// Run `fetch` for every item concurrently and collect the results in input
/// order.  Failures are logged and come back as `None`, they never fail the
/// whole batch.
///
/// There is one thread per item and no cap on how many run at once.
pub fn fetch_all<T, U, F>(items: &[T], fetch: F) -> Vec<Option<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U, Error> + Sync,
{
    let fetch = &fetch;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .iter()
            .map(|item| scope.spawn(move || fetch(item)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(Ok(value)) => Some(value),
                Ok(Err(err)) => {
                    log::warn!("dropping item: {err}");
                    None
                }
                Err(_) => {
                    log::error!("item fetch panicked");
                    None
                }
            })
            .collect()
    })
}

/// Load the catalog slice and the category list side by side, then enrich
/// every entry with its detail record.
pub fn load_gallery(source: &dyn CatalogSource, limit: usize) -> Result<GalleryData, Error> {
    let (page, categories) = thread::scope(|scope| {
        let categories = scope.spawn(|| source.list_categories());
        let page = source.list_catalog(limit, 0);
        let categories = categories
            .join()
            .unwrap_or_else(|_| Err(Error::WebApiError("category fetch panicked".into())));
        (page, categories)
    });
    let (page, categories) = (page?, categories?);

    let items = fetch_all(&page.entries, |entry| source.fetch_detail(&entry.name))
        .into_iter()
        .flatten()
        .map(GalleryItem::from)
        .collect::<Vec<_>>();
    log::info!(
        "gallery loaded {} of {} entries",
        items.len(),
        page.entries.len()
    );

    Ok(GalleryData { items, categories })
}

/// Items that carry every one of `selected`.  No selection keeps everything.
pub fn filter_by_categories(items: &[GalleryItem], selected: &[Arc<str>]) -> Vec<GalleryItem> {
    items
        .iter()
        .filter(|item| selected.iter().all(|tag| item.has_category(tag)))
        .cloned()
        .collect()
}

pub struct GalleryView {
    data: Promise<GalleryData, MountId>,
    selected: Vec<Arc<str>>,
    visible: Vec<GalleryItem>,
}

impl GalleryView {
    pub fn mount(id: MountId) -> Self {
        Self {
            data: Promise::Deferred(id),
            selected: Vec::new(),
            visible: Vec::new(),
        }
    }

    pub fn data(&self) -> &Promise<GalleryData, MountId> {
        &self.data
    }

    pub fn categories(&self) -> &[Arc<str>] {
        self.data
            .resolved()
            .map(|data| data.categories.as_slice())
            .unwrap_or_default()
    }

    pub fn selected(&self) -> &[Arc<str>] {
        &self.selected
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c.as_ref() == category)
    }

    pub fn visible(&self) -> &[GalleryItem] {
        &self.visible
    }

    pub fn loaded(
        &mut self,
        id: MountId,
        res: Result<GalleryData, Error>,
        browse: &mut BrowseState,
    ) -> bool {
        if !self.data.update((id, res)) {
            return false;
        }
        self.recompute(browse);
        true
    }

    pub fn toggle_category(&mut self, category: &str, browse: &mut BrowseState) {
        if let Some(pos) = self.selected.iter().position(|c| c.as_ref() == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category.into());
        }
        self.recompute(browse);
    }

    pub fn clear_categories(&mut self, browse: &mut BrowseState) {
        self.selected.clear();
        self.recompute(browse);
    }

    fn recompute(&mut self, browse: &mut BrowseState) {
        let Some(data) = self.data.resolved() else {
            return;
        };
        self.visible = filter_by_categories(&data.items, &self.selected);
        browse.publish(self.visible.iter().map(|item| item.name.clone()));
    }
}
