mod cmd;
mod ui;

use std::{
    env,
    io::{self, BufRead, Write},
    process,
    sync::Arc,
    thread,
};

use crossbeam_channel::{select, unbounded, Receiver};
use env_logger::{Builder, Env};

use dex_core::{
    data::{Config, Nav},
    error::Error,
    webapi::WebApi,
    App,
};

use crate::cmd::{Command, HELP};

const ENV_LOG: &str = "DEX_LOG";
const ENV_LOG_STYLE: &str = "DEX_LOG_STYLE";

fn main() {
    // Setup logging from the env variables, with defaults.
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            log::error!("failed to load config, using defaults: {err}");
            Config::default()
        }
    };
    let route = env::args()
        .nth(1)
        .map(|path| Nav::parse(&path))
        .unwrap_or(Nav::Home);

    if let Err(err) = run(config, route) {
        log::error!("{err}");
        process::exit(1);
    }
}

fn run(config: Config, route: Nav) -> Result<(), Error> {
    let webapi = WebApi::with_config(&config, Config::proxy().as_deref())?;
    let mut app = App::new(Arc::new(webapi), config);
    let input = read_input();
    let events = app.receiver().clone();

    app.start(route);
    show(&app);
    prompt();

    loop {
        select! {
            recv(input) -> line => match line {
                Ok(line) => match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => {
                        if apply(&mut app, cmd) {
                            show(&app);
                        }
                    }
                    Err(msg) if msg.is_empty() => {}
                    Err(msg) => println!("{msg}"),
                },
                // Stdin closed.
                Err(_) => break,
            },
            recv(events) -> event => {
                if let Ok(event) = event {
                    if app.handle(event) {
                        show(&app);
                    }
                }
            }
        }
        prompt();
    }

    Ok(())
}

/// Run a command against the app.  Returns `true` if the screen needs to be
/// drawn again.
fn apply(app: &mut App, cmd: Command) -> bool {
    match cmd {
        Command::Go(nav) => app.navigate(nav),
        Command::Open(name) => app.open(&name),
        Command::Search(query) => app.set_query(&query),
        Command::Sort(key) => app.set_sort_key(key),
        Command::ToggleOrder => app.toggle_sort_order(),
        Command::ToggleTag(tag) => app.toggle_category(&tag),
        Command::ClearTags => app.clear_categories(),
        Command::Previous => {
            if !app.previous() {
                println!("no previous entry");
                return false;
            }
        }
        Command::Next => {
            if !app.next() {
                println!("no next entry");
                return false;
            }
        }
        Command::Back => {
            if !app.back() {
                println!("nothing to go back to");
                return false;
            }
        }
        Command::Reload => app.reload(),
        Command::Help => {
            println!("{HELP}");
            return false;
        }
        Command::Quit => return false,
    }
    true
}

fn show(app: &App) {
    println!("\n── {} ── {}", app.nav().title(), app.nav());
    print!("{}", ui::render(app));
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn read_input() -> Receiver<String> {
    let (sender, receiver) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::error!("failed to read input: {err}");
                    break;
                }
            }
        }
    });
    receiver
}
