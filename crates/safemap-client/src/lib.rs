//! Client-side data access: fetches datasets over HTTP, validates them, and
//! keeps a time-boxed cache of the last good payload per dataset.

pub mod cache;
pub mod clock;
pub mod data_store;
pub mod dataset;
pub mod error;
pub mod store;

pub use cache::CacheEntry;
pub use clock::{Clock, ManualClock, SystemClock};
pub use data_store::{DataStore, DEFAULT_TTL};
pub use dataset::{Contacts, Dataset, Locations, Tips};
pub use error::{FetchError, StoreError};
pub use store::{FileStore, KvStore, MemoryStore};
