pub mod browser;
pub mod error;
pub mod storage;
pub mod watched;

pub use browser::{Applied, Browser, BrowserOptions, BrowserState, Key, Panel, RemoveOrigin, SearchStatus, DEFAULT_TITLE};
pub use error::{BrowserError, StoreError};
pub use storage::WatchedStore;
pub use watched::WatchedList;
