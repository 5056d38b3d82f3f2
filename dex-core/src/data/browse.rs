use std::sync::Arc;

/// Order of the names currently visible in the mounted list or gallery.
///
/// Only one list-producing view is mounted at a time and it is the only
/// writer.  Every publish replaces the whole sequence, the last writer wins.
/// The detail view only reads it, so the ordering survives after the view
/// that produced it is gone.
#[derive(Clone, Debug, Default)]
pub struct BrowseState {
    ordered_names: Vec<Arc<str>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Option<Arc<str>>,
    pub next: Option<Arc<str>>,
}

impl Neighbors {
    pub fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none()
    }
}

impl BrowseState {
    pub fn ordered_names(&self) -> &[Arc<str>] {
        &self.ordered_names
    }

    pub fn publish(&mut self, names: impl IntoIterator<Item = Arc<str>>) {
        self.ordered_names = names.into_iter().collect();
        log::debug!("published {} names", self.ordered_names.len());
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.ordered_names.iter().position(|n| n.as_ref() == name)
    }

    pub fn neighbors(&self, name: &str) -> Neighbors {
        match self.position(name) {
            Some(idx) => Neighbors {
                previous: idx
                    .checked_sub(1)
                    .and_then(|prev| self.ordered_names.get(prev))
                    .cloned(),
                next: self.ordered_names.get(idx + 1).cloned(),
            },
            None => Neighbors::default(),
        }
    }
}
