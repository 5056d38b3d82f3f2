mod browse;
mod catalog;
mod config;
pub mod detail;
pub mod gallery;
pub mod list;
mod nav;
mod promise;

pub use crate::data::{
    browse::{BrowseState, Neighbors},
    catalog::{
        extract_id, CatalogEntry, CatalogPage, DetailRecord, GalleryItem, ImageUrls, ListEntry,
    },
    config::{Config, DEFAULT_BASE_URL},
    detail::DetailView,
    gallery::{GalleryData, GalleryView},
    list::{ListView, SortKey, SortOrder},
    nav::Nav,
    promise::{Promise, PromiseState},
};
