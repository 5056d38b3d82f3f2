use std::fmt::Write;

use itertools::Itertools;

use dex_core::{
    data::{
        BrowseState, DetailRecord, DetailView, GalleryView, ListView, Neighbors, Promise,
        PromiseState,
    },
    error::Error,
    App, View,
};

const LOADING: &str = "Loading…";
const NO_IMAGE: &str = "No image";

pub fn render(app: &App) -> String {
    let mut out = String::new();
    match app.view() {
        View::Home => home(&mut out),
        View::List(view) => list(&mut out, view),
        View::Gallery(view) => gallery(&mut out, view),
        View::Detail(view) => detail(&mut out, view, app.browse()),
    }
    out
}

fn home(out: &mut String) {
    out.push_str("Pokédex\n\nChoose a view:\n  list\n  gallery\n");
}

/// Loading and error states look the same for every view.
fn pending<T, D>(out: &mut String, promise: &Promise<T, D, Error>) -> bool {
    match promise.state() {
        PromiseState::Empty | PromiseState::Deferred => {
            out.push_str(LOADING);
            out.push('\n');
            true
        }
        PromiseState::Rejected => {
            if let Some(err) = promise.rejected() {
                let _ = writeln!(out, "{}", err.message_or_default());
            }
            true
        }
        PromiseState::Resolved => false,
    }
}

fn list(out: &mut String, view: &ListView) {
    if pending(out, view.entries()) {
        return;
    }
    let _ = writeln!(out, "Pokémon List");
    let _ = writeln!(
        out,
        "[search: {:?}] [sort: {}] [{}]",
        view.query(),
        view.sort_key(),
        view.sort_order()
    );
    for entry in view.visible() {
        match entry.id {
            Some(id) => {
                let _ = writeln!(out, "  #{id} {}", entry.name);
            }
            None => {
                let _ = writeln!(out, "  #— {}", entry.name);
            }
        }
    }
}

fn gallery(out: &mut String, view: &GalleryView) {
    if pending(out, view.data()) {
        return;
    }
    let _ = writeln!(out, "Pokémon Gallery");
    let tags = view
        .categories()
        .iter()
        .map(|tag| {
            if view.is_selected(tag) {
                format!("[{tag}]")
            } else {
                tag.to_string()
            }
        })
        .join(" ");
    let _ = writeln!(out, "types: {tags}");
    for item in view.visible() {
        let _ = writeln!(
            out,
            "  #{} {} ({}) {}",
            item.id,
            item.name,
            item.categories.iter().join(", "),
            item.image.as_deref().unwrap_or(NO_IMAGE)
        );
    }
}

fn detail(out: &mut String, view: &DetailView, browse: &BrowseState) {
    let neighbors = view.neighbors(browse);
    if pending(out, view.detail()) {
        return;
    }
    let Some(record) = view.detail().resolved() else {
        return;
    };
    detail_record(out, record);
    navigation(out, &neighbors);
}

fn detail_record(out: &mut String, record: &DetailRecord) {
    let _ = writeln!(out, "#{} {}", record.id, record.name);
    let _ = writeln!(
        out,
        "  Image:  {}",
        record.display_image().as_deref().unwrap_or(NO_IMAGE)
    );
    let _ = writeln!(out, "  Types:  {}", record.categories.iter().join(", "));
    let _ = writeln!(out, "  Height: {}", record.height);
    let _ = writeln!(out, "  Weight: {}", record.weight);
}

fn navigation(out: &mut String, neighbors: &Neighbors) {
    let _ = writeln!(
        out,
        "← prev: {}   next: {} →",
        neighbors.previous.as_deref().unwrap_or("(none)"),
        neighbors.next.as_deref().unwrap_or("(none)")
    );
}
