use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use threadpool::ThreadPool;

use crate::{
    data::{
        detail::DetailView,
        gallery::{self, GalleryData, GalleryView},
        list::{self, ListView},
        BrowseState, Config, DetailRecord, ListEntry, Nav, Neighbors, SortKey,
    },
    error::Error,
    util::MountId,
    webapi::CatalogSource,
};

const WORKER_THREADS: usize = 4;

/// Results of background loads, delivered back to the event loop.
pub enum AppEvent {
    ListLoaded(MountId, Result<Vec<ListEntry>, Error>),
    GalleryLoaded(MountId, Result<GalleryData, Error>),
    DetailLoaded(MountId, Result<DetailRecord, Error>),
}

pub enum View {
    Home,
    List(ListView),
    Gallery(GalleryView),
    Detail(DetailView),
}

pub struct App {
    source: Arc<dyn CatalogSource>,
    config: Config,
    pool: ThreadPool,
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
    nav: Nav,
    history: Vec<Nav>,
    view: View,
    browse: BrowseState,
}

impl App {
    pub fn new(source: Arc<dyn CatalogSource>, config: Config) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            source,
            config,
            pool: ThreadPool::with_name("dex-fetch".into(), WORKER_THREADS),
            sender,
            receiver,
            nav: Nav::Home,
            history: Vec::new(),
            view: View::Home,
            browse: BrowseState::default(),
        }
    }

    pub fn receiver(&self) -> &Receiver<AppEvent> {
        &self.receiver
    }

    pub fn nav(&self) -> &Nav {
        &self.nav
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn browse(&self) -> &BrowseState {
        &self.browse
    }

    pub fn history(&self) -> &[Nav] {
        &self.history
    }

    /// Mount the first route of a session, without any history.
    pub fn start(&mut self, nav: Nav) {
        self.nav = nav;
        self.history.clear();
        self.mount();
    }

    /// Mount `nav`, remembering the current route for `back`.  Navigating to
    /// the route already shown remounts it without growing the history.
    pub fn navigate(&mut self, nav: Nav) {
        if nav != self.nav {
            let previous = std::mem::replace(&mut self.nav, nav);
            self.history.push(previous);
        }
        self.mount();
    }

    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(nav) => {
                self.nav = nav;
                self.mount();
                true
            }
            None => false,
        }
    }

    /// Remount the current route, discarding whatever the old mount had.
    pub fn reload(&mut self) {
        self.mount();
    }

    fn mount(&mut self) {
        let id = MountId::next();
        log::info!("mounting {} as {id}", self.nav);
        // Replacing the view unmounts the old one.  Anything it still has in
        // flight is tagged with the old id and gets dropped on arrival.
        self.view = match &self.nav {
            Nav::Home => View::Home,
            Nav::List => {
                let limit = self.config.list_limit;
                self.spawn(move |source| AppEvent::ListLoaded(id, list::load_list(source, limit)));
                View::List(ListView::mount(id))
            }
            Nav::Gallery => {
                let limit = self.config.gallery_limit;
                self.spawn(move |source| {
                    AppEvent::GalleryLoaded(id, gallery::load_gallery(source, limit))
                });
                View::Gallery(GalleryView::mount(id))
            }
            Nav::PokemonDetail(name) => {
                let name = name.clone();
                self.spawn({
                    let name = name.clone();
                    move |source| AppEvent::DetailLoaded(id, source.fetch_detail(&name))
                });
                View::Detail(DetailView::mount(id, name))
            }
        };
    }

    fn spawn(&self, job: impl FnOnce(&dyn CatalogSource) -> AppEvent + Send + 'static) {
        let source = self.source.clone();
        let sender = self.sender.clone();
        self.pool.execute(move || {
            let event = job(source.as_ref());
            if sender.send(event).is_err() {
                log::debug!("app is gone, dropping load result");
            }
        });
    }

    /// Apply a background result.  Returns `true` if the mounted view changed.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        let applied = match (event, &mut self.view) {
            (AppEvent::ListLoaded(id, res), View::List(view)) => {
                view.loaded(id, res, &mut self.browse)
            }
            (AppEvent::GalleryLoaded(id, res), View::Gallery(view)) => {
                view.loaded(id, res, &mut self.browse)
            }
            (AppEvent::DetailLoaded(id, res), View::Detail(view)) => view.loaded(id, res),
            _ => false,
        };
        if !applied {
            log::debug!("dropping result for an unmounted view");
        }
        applied
    }

    pub fn set_query(&mut self, query: &str) {
        match &mut self.view {
            View::List(view) => view.set_query(query, &mut self.browse),
            _ => log::warn!("search only applies to the list"),
        }
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        match &mut self.view {
            View::List(view) => view.set_sort_key(key, &mut self.browse),
            _ => log::warn!("sorting only applies to the list"),
        }
    }

    pub fn toggle_sort_order(&mut self) {
        match &mut self.view {
            View::List(view) => view.toggle_sort_order(&mut self.browse),
            _ => log::warn!("sorting only applies to the list"),
        }
    }

    pub fn toggle_category(&mut self, category: &str) {
        match &mut self.view {
            View::Gallery(view) => view.toggle_category(category, &mut self.browse),
            _ => log::warn!("category filters only apply to the gallery"),
        }
    }

    pub fn clear_categories(&mut self) {
        match &mut self.view {
            View::Gallery(view) => view.clear_categories(&mut self.browse),
            _ => log::warn!("category filters only apply to the gallery"),
        }
    }

    pub fn open(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            log::warn!("nothing to open");
            return;
        }
        self.navigate(Nav::PokemonDetail(name.into()));
    }

    pub fn previous(&mut self) -> bool {
        self.step(|n| n.previous)
    }

    pub fn next(&mut self) -> bool {
        self.step(|n| n.next)
    }

    fn step(&mut self, pick: impl FnOnce(Neighbors) -> Option<Arc<str>>) -> bool {
        let View::Detail(view) = &self.view else {
            log::warn!("previous/next only apply to the detail view");
            return false;
        };
        match pick(view.neighbors(&self.browse)) {
            Some(name) => {
                self.navigate(Nav::PokemonDetail(name));
                true
            }
            None => false,
        }
    }
}
