use std::{fmt, sync::Arc};

use percent_encoding::percent_decode_str;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Nav {
    Home,
    List,
    Gallery,
    PokemonDetail(Arc<str>),
}

impl Nav {
    /// Resolve an application path.  Unknown paths fall back to `Home`.
    pub fn parse(path: &str) -> Self {
        // Resolving against a dummy origin gives us segment splitting and
        // percent-decoding for free.
        let Ok(url) = Url::parse("dex://app/").and_then(|base| base.join(path.trim())) else {
            return Nav::Home;
        };
        let Some(segments) = url.path_segments() else {
            return Nav::Home;
        };
        let segments: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Nav::Home,
            ["list"] => Nav::List,
            ["gallery"] => Nav::Gallery,
            ["pokemon", name] => match percent_decode(name) {
                Some(name) if !name.is_empty() => Nav::PokemonDetail(name.into()),
                _ => Nav::Home,
            },
            _ => Nav::Home,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Nav::Home => "/".to_string(),
            Nav::List => "/list".to_string(),
            Nav::Gallery => "/gallery".to_string(),
            Nav::PokemonDetail(name) => {
                let mut url = Url::parse("dex://app/pokemon/").expect("static URL is valid");
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(name);
                }
                url.path().to_string()
            }
        }
    }

    pub fn title(&self) -> String {
        match self {
            Nav::Home => "Pokédex".to_string(),
            Nav::List => "Pokémon List".to_string(),
            Nav::Gallery => "Pokémon Gallery".to_string(),
            Nav::PokemonDetail(name) => name.to_string(),
        }
    }
}

impl fmt::Display for Nav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn percent_decode(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|name| name.into_owned())
}
