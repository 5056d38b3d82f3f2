use std::sync::Arc;

use crate::{
    data::{BrowseState, DetailRecord, Neighbors, Promise},
    error::Error,
    util::MountId,
};

pub struct DetailView {
    name: Arc<str>,
    detail: Promise<DetailRecord, MountId>,
}

impl DetailView {
    pub fn mount(id: MountId, name: Arc<str>) -> Self {
        Self {
            name,
            detail: Promise::Deferred(id),
        }
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn detail(&self) -> &Promise<DetailRecord, MountId> {
        &self.detail
    }

    pub fn loaded(&mut self, id: MountId, res: Result<DetailRecord, Error>) -> bool {
        self.detail.update((id, res))
    }

    /// Previous and next names in the last published ordering.  Computed on
    /// every read, the ordering is never touched from here.
    pub fn neighbors(&self, browse: &BrowseState) -> Neighbors {
        browse.neighbors(&self.name)
    }
}
