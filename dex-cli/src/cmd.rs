use dex_core::data::{Nav, SortKey};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Go(Nav),
    Open(String),
    Search(String),
    Sort(SortKey),
    ToggleOrder,
    ToggleTag(String),
    ClearTags,
    Previous,
    Next,
    Back,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  home | list | gallery      switch view
  go <path>                  open a route, e.g. /pokemon/pikachu
  open <name>                show one pokémon
  search [text]              filter the list by name or id
  sort name|id               choose the list sort key
  order                      toggle ascending/descending
  tag <type>                 toggle a gallery type filter
  clear                      clear gallery type filters
  prev | next                step through the last list or gallery
  back                       go back
  reload                     load the current view again
  quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        let cmd = match word.to_lowercase().as_str() {
            "home" => Command::Go(Nav::Home),
            "list" => Command::Go(Nav::List),
            "gallery" => Command::Go(Nav::Gallery),
            "go" => Command::Go(Nav::parse(rest)),
            "open" | "show" if !rest.is_empty() => Command::Open(rest.to_string()),
            "open" | "show" => return Err("usage: open <name>".to_string()),
            "search" | "find" => Command::Search(rest.to_string()),
            "sort" => Command::Sort(rest.parse()?),
            "order" => Command::ToggleOrder,
            "tag" | "type" if !rest.is_empty() => Command::ToggleTag(rest.to_lowercase()),
            "tag" | "type" => return Err("usage: tag <type>".to_string()),
            "clear" => Command::ClearTags,
            "prev" | "p" => Command::Previous,
            "next" | "n" => Command::Next,
            "back" | "b" => Command::Back,
            "reload" | "r" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            "" => return Err(String::new()),
            other => return Err(format!("unknown command: {other} (try `help`)")),
        };
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(Command::parse("list"), Ok(Command::Go(Nav::List)));
        assert_eq!(
            Command::parse("go /pokemon/ivysaur"),
            Ok(Command::Go(Nav::PokemonDetail("ivysaur".into())))
        );
        assert_eq!(Command::parse("go /what"), Ok(Command::Go(Nav::Home)));
        assert_eq!(
            Command::parse("  open   mr-mime "),
            Ok(Command::Open("mr-mime".into()))
        );
        assert_eq!(Command::parse("n"), Ok(Command::Next));
    }

    #[test]
    fn parses_filters() {
        assert_eq!(
            Command::parse("search Pika"),
            Ok(Command::Search("Pika".into()))
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(Command::parse("sort ID"), Ok(Command::Sort(SortKey::Id)));
        assert_eq!(Command::parse("tag Grass"), Ok(Command::ToggleTag("grass".into())));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("sort weight").is_err());
        assert!(Command::parse("open").is_err());
        assert!(Command::parse("fly away").is_err());
        assert_eq!(Command::parse("   "), Err(String::new()));
    }
}
