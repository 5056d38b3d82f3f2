use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ID_IN_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/pokemon/(\d+)/").expect("id pattern is valid"));

/// Minimal list record, as returned by the catalog listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub name: Arc<str>,
    pub url: Arc<str>,
}

impl CatalogEntry {
    pub fn id(&self) -> Option<u32> {
        extract_id(&self.url)
    }
}

/// Pull the numeric id out of a detail URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
pub fn extract_id(url: &str) -> Option<u32> {
    ID_IN_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogPage {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(rename = "results")]
    pub entries: Vec<CatalogEntry>,
}

/// A catalog entry with its id already parsed out of the URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub name: Arc<str>,
    pub url: Arc<str>,
    pub id: Option<u32>,
}

impl From<CatalogEntry> for ListEntry {
    fn from(entry: CatalogEntry) -> Self {
        let id = entry.id();
        Self {
            name: entry.name,
            url: entry.url,
            id,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageUrls {
    pub primary: Option<Arc<str>>,
    pub artwork: Option<Arc<str>>,
}

impl ImageUrls {
    /// High resolution artwork if there is one, otherwise the default sprite.
    pub fn preferred(&self) -> Option<Arc<str>> {
        self.artwork.clone().or_else(|| self.primary.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRecord {
    pub id: u32,
    pub name: Arc<str>,
    pub height: u32,
    pub weight: u32,
    pub categories: Vec<Arc<str>>,
    pub images: ImageUrls,
}

impl DetailRecord {
    pub fn display_image(&self) -> Option<Arc<str>> {
        self.images.preferred()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryItem {
    pub name: Arc<str>,
    pub id: u32,
    pub image: Option<Arc<str>>,
    pub categories: Vec<Arc<str>>,
}

impl GalleryItem {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.as_ref() == category)
    }
}

impl From<DetailRecord> for GalleryItem {
    fn from(detail: DetailRecord) -> Self {
        let image = detail.display_image();
        Self {
            name: detail.name,
            id: detail.id,
            image,
            categories: detail.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_reference_url() {
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/1/"), Some(1));
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/10034/"), Some(10034));
        assert_eq!(extract_id("https://pokeapi.co/api/v2/pokemon/1"), None);
        assert_eq!(extract_id("https://pokeapi.co/api/v2/type/12/"), None);
        assert_eq!(extract_id(""), None);
    }

    #[test]
    fn image_precedence() {
        let both = ImageUrls {
            primary: Some("sprite.png".into()),
            artwork: Some("art.png".into()),
        };
        assert_eq!(both.preferred().as_deref(), Some("art.png"));

        let sprite_only = ImageUrls {
            primary: Some("sprite.png".into()),
            artwork: None,
        };
        assert_eq!(sprite_only.preferred().as_deref(), Some("sprite.png"));

        assert_eq!(ImageUrls::default().preferred(), None);
    }

    #[test]
    fn list_entry_carries_parsed_id() {
        let entry: ListEntry = CatalogEntry {
            name: "pikachu".into(),
            url: "https://pokeapi.co/api/v2/pokemon/25/".into(),
        }
        .into();
        assert_eq!(entry.id, Some(25));
    }
}
