pub mod app;
pub mod data;
pub mod error;
pub mod util;
pub mod webapi;

pub use app::{App, AppEvent, View};
