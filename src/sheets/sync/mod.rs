// src/sheets/sync/mod.rs

pub mod dispatcher;
pub mod error;
pub mod filter;
pub mod header;
pub mod key;
pub mod locator;
pub mod matcher;
pub mod status;

pub use dispatcher::{Dispatcher, EditEvent, RowOutcome, SyncReport, TriggerEvent};
pub use error::{SyncError, SyncResult};
pub use filter::{refresh_filter, FilterRefresh, FilterStrategy};
pub use header::{resolve_columns, ColumnMap};
pub use key::{extract_key, KeyColumns, SyncKey};
pub use locator::parse_locator;
pub use matcher::{find_match, MatchRecord};
pub use status::write_status;
