mod client;

pub use client::WebApi;

use std::sync::Arc;

use crate::{
    data::{CatalogPage, DetailRecord},
    error::Error,
};

/// Remote catalog the views load from.  Every call is a blocking round-trip,
/// callers run them off the event loop.
pub trait CatalogSource: Send + Sync {
    fn list_catalog(&self, limit: usize, offset: usize) -> Result<CatalogPage, Error>;

    fn fetch_detail(&self, name: &str) -> Result<DetailRecord, Error>;

    fn list_categories(&self) -> Result<Vec<Arc<str>>, Error>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for Arc<S> {
    fn list_catalog(&self, limit: usize, offset: usize) -> Result<CatalogPage, Error> {
        (**self).list_catalog(limit, offset)
    }

    fn fetch_detail(&self, name: &str) -> Result<DetailRecord, Error> {
        (**self).fetch_detail(name)
    }

    fn list_categories(&self) -> Result<Vec<Arc<str>>, Error> {
        (**self).list_categories()
    }
}
