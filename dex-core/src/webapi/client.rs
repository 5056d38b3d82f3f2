use std::{fmt::Display, sync::Arc, time::Duration};

use serde::{de::DeserializeOwned, Deserialize};
use ureq::{http::Response, Agent, Body};
use url::Url;

use crate::{
    data::{CatalogPage, Config, DetailRecord, ImageUrls},
    error::Error,
    util::default_ureq_agent_builder,
};

use super::CatalogSource;

pub struct WebApi {
    agent: Agent,
    base: Url,
}

impl WebApi {
    pub fn new(base_url: &str, timeout: Duration, proxy_url: Option<&str>) -> Result<Self, Error> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::WebApiError(format!("not a base URL: {base_url}")));
        }
        Ok(Self {
            agent: default_ureq_agent_builder(timeout, proxy_url).build().into(),
            base,
        })
    }

    pub fn with_config(config: &Config, proxy_url: Option<&str>) -> Result<Self, Error> {
        Self::new(&config.base_url, config.timeout(), proxy_url)
    }

    fn request(&self, request: &RequestBuilder) -> Result<Response<Body>, Error> {
        let url = request.build(&self.base)?;
        log::debug!("GET {url}");
        self.agent.get(url.as_str()).call().map_err(|err| {
            let err = Error::from(err);
            if err.is_network() {
                log::warn!("GET {url} failed: {err}");
            } else {
                log::error!("GET {url} failed: {err}");
            }
            err
        })
    }

    /// Send a GET request and return the deserialized JSON body.
    fn load<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T, Error> {
        let mut response = self.request(request)?;
        response.body_mut().read_json().map_err(Error::from)
    }
}

/// Pokémon endpoints.
impl WebApi {
    // https://pokeapi.co/docs/v2#resource-listspagination-section
    pub fn get_pokemon_page(&self, limit: usize, offset: usize) -> Result<CatalogPage, Error> {
        let request = RequestBuilder::new(["pokemon"])
            .query("limit", limit)
            .query("offset", offset);
        self.load(&request)
    }

    // https://pokeapi.co/docs/v2#pokemon
    pub fn get_pokemon(&self, name: &str) -> Result<DetailRecord, Error> {
        let request = RequestBuilder::new(["pokemon", name]);
        let result: ApiPokemon = self.load(&request)?;
        Ok(result.into())
    }
}

/// Type endpoints.
impl WebApi {
    // https://pokeapi.co/docs/v2#types
    pub fn get_type_names(&self) -> Result<Vec<Arc<str>>, Error> {
        let request = RequestBuilder::new(["type"]);
        let result: NamedList = self.load(&request)?;
        Ok(result.results.into_iter().map(|t| t.name).collect())
    }
}

impl CatalogSource for WebApi {
    fn list_catalog(&self, limit: usize, offset: usize) -> Result<CatalogPage, Error> {
        self.get_pokemon_page(limit, offset)
    }

    fn fetch_detail(&self, name: &str) -> Result<DetailRecord, Error> {
        self.get_pokemon(name)
    }

    fn list_categories(&self) -> Result<Vec<Arc<str>>, Error> {
        self.get_type_names()
    }
}

#[derive(Deserialize)]
struct NamedList {
    results: Vec<NamedRef>,
}

#[derive(Deserialize)]
struct NamedRef {
    name: Arc<str>,
}

#[derive(Deserialize)]
struct ApiPokemon {
    id: u32,
    name: Arc<str>,
    height: u32,
    weight: u32,
    #[serde(default)]
    types: Vec<ApiTypeSlot>,
    #[serde(default)]
    sprites: ApiSprites,
}

#[derive(Deserialize)]
struct ApiTypeSlot {
    #[serde(rename = "type")]
    kind: NamedRef,
}

#[derive(Default, Deserialize)]
struct ApiSprites {
    front_default: Option<Arc<str>>,
    #[serde(default)]
    other: Option<ApiOtherSprites>,
}

#[derive(Deserialize)]
struct ApiOtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<ApiArtwork>,
}

#[derive(Deserialize)]
struct ApiArtwork {
    front_default: Option<Arc<str>>,
}

fn non_empty(url: Option<Arc<str>>) -> Option<Arc<str>> {
    url.filter(|url| !url.is_empty())
}

impl From<ApiPokemon> for DetailRecord {
    fn from(api: ApiPokemon) -> Self {
        let artwork = api
            .sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|art| art.front_default);
        Self {
            id: api.id,
            name: api.name,
            height: api.height,
            weight: api.weight,
            categories: api.types.into_iter().map(|slot| slot.kind.name).collect(),
            images: ImageUrls {
                primary: non_empty(api.sprites.front_default),
                artwork: non_empty(artwork),
            },
        }
    }
}

// Relative request against the API base, kept separate so the base can point
// at any mirror of the API.
#[derive(Debug, Clone)]
struct RequestBuilder {
    segments: Vec<String>,
    queries: Vec<(String, String)>,
}

impl RequestBuilder {
    fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Display,
    {
        Self {
            segments: segments.into_iter().map(|s| s.to_string()).collect(),
            queries: Vec::new(),
        }
    }

    fn query(mut self, key: impl Display, value: impl Display) -> Self {
        self.queries.push((key.to_string(), value.to_string()));
        self
    }

    fn build(&self, base: &Url) -> Result<Url, Error> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::WebApiError(format!("not a base URL: {base}")))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.queries.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.queries);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IVYSAUR: &str = r#"{
        "id": 2,
        "name": "ivysaur",
        "height": 10,
        "weight": 130,
        "base_experience": 142,
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" } },
            { "slot": 2, "type": { "name": "poison", "url": "https://pokeapi.co/api/v2/type/4/" } }
        ],
        "sprites": {
            "front_default": "https://example.org/sprites/2.png",
            "back_default": null,
            "other": {
                "official-artwork": { "front_default": "https://example.org/artwork/2.png" },
                "home": { "front_default": null }
            }
        }
    }"#;

    #[test]
    fn decodes_detail_record() {
        let api: ApiPokemon = serde_json::from_str(IVYSAUR).unwrap();
        let detail = DetailRecord::from(api);
        assert_eq!(detail.id, 2);
        assert_eq!(detail.name.as_ref(), "ivysaur");
        assert_eq!((detail.height, detail.weight), (10, 130));
        assert_eq!(
            detail.categories,
            vec![Arc::<str>::from("grass"), Arc::from("poison")]
        );
        assert_eq!(
            detail.display_image().as_deref(),
            Some("https://example.org/artwork/2.png")
        );
    }

    #[test]
    fn missing_artwork_falls_back_to_sprite() {
        let json = r#"{
            "id": 10001, "name": "deoxys-attack", "height": 17, "weight": 608,
            "types": [{ "slot": 1, "type": { "name": "psychic", "url": "" } }],
            "sprites": { "front_default": "https://example.org/s.png",
                         "other": { "official-artwork": { "front_default": "" } } }
        }"#;
        let detail = DetailRecord::from(serde_json::from_str::<ApiPokemon>(json).unwrap());
        assert_eq!(detail.images.artwork, None);
        assert_eq!(
            detail.display_image().as_deref(),
            Some("https://example.org/s.png")
        );

        let bare = r#"{ "id": 1, "name": "x", "height": 1, "weight": 1,
                        "types": [], "sprites": { "front_default": null } }"#;
        let detail = DetailRecord::from(serde_json::from_str::<ApiPokemon>(bare).unwrap());
        assert_eq!(detail.display_image(), None);
    }

    #[test]
    fn decodes_catalog_page() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=2&limit=2",
            "previous": null,
            "results": [
                { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
            ]
        }"#;
        let page: CatalogPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1302);
        assert_eq!(page.previous, None);
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[1].id(), Some(2));
    }

    #[test]
    fn decodes_type_names() {
        let json = r#"{ "count": 2, "results": [
            { "name": "normal", "url": "https://pokeapi.co/api/v2/type/1/" },
            { "name": "fighting", "url": "https://pokeapi.co/api/v2/type/2/" }
        ] }"#;
        let list: NamedList = serde_json::from_str(json).unwrap();
        let names: Vec<_> = list.results.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec![Arc::<str>::from("normal"), Arc::from("fighting")]);
    }

    #[test]
    fn builds_urls_relative_to_base() {
        let base = Url::parse("https://pokeapi.co/api/v2").unwrap();
        let url = RequestBuilder::new(["pokemon"])
            .query("limit", 300)
            .query("offset", 0)
            .build(&base)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://pokeapi.co/api/v2/pokemon?limit=300&offset=0"
        );

        let base = Url::parse("http://localhost:8080/api/v2/").unwrap();
        let url = RequestBuilder::new(["pokemon", "mr mime/x"])
            .build(&base)
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/pokemon/mr%20mime%2Fx");
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        // Bind and release a port so nothing is listening on it.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = WebApi::new(
            &format!("http://127.0.0.1:{port}/api/v2"),
            Duration::from_secs(2),
            None,
        )
        .unwrap();

        let err = api.get_pokemon("ivysaur").unwrap_err();
        assert!(err.is_network(), "{err:?}");
        let err = api.get_pokemon_page(20, 0).unwrap_err();
        assert!(err.is_network(), "{err:?}");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(WebApi::new("mailto:someone@example.org", Duration::from_secs(1), None).is_err());
        assert!(WebApi::new("not a url", Duration::from_secs(1), None).is_err());
    }
}
