pub mod app;
pub mod catalog;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod model;
pub mod selector;
pub mod storage;
pub mod timer;
pub mod tips;
pub mod view;

pub use app::App;
pub use catalog::{FileSource, Source, load, parse};
pub use error::FetchError;
pub use favorites::{FavoritesStore, FAVORITES_KEY, MAX_FAVORITES};
pub use filter::{Category, Predicate, filter};
pub use model::{FavoriteEntry, Record, Schema};
pub use selector::{RandomSource, ThreadRandom, pick_first, pick_random};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use timer::{Countdown, Tick, Ticker, TimerState};
pub use tips::Tip;
