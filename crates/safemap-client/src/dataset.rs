//! The three datasets the client knows how to load.

use safemap_core::{ContactRecord, LocationRecord, Record, TipRecord};

/// Static description of a remote dataset: where it lives and where its
/// cache slot is kept.
pub trait Dataset {
    type Record: Record + Send;

    const NAME: &'static str;
    /// Key of this dataset's slot in the [`crate::KvStore`].
    const CACHE_KEY: &'static str;
    /// Path relative to the client's base URL.
    const PATH: &'static str;
}

/// Police stations and support centers for the map view.
#[derive(Debug, Clone, Copy)]
pub struct Locations;

impl Dataset for Locations {
    type Record = LocationRecord;
    const NAME: &'static str = "locations";
    const CACHE_KEY: &'static str = "delegaciasCache";
    const PATH: &'static str = "data/delegacias.json";
}

#[derive(Debug, Clone, Copy)]
pub struct Contacts;

impl Dataset for Contacts {
    type Record = ContactRecord;
    const NAME: &'static str = "contacts";
    const CACHE_KEY: &'static str = "contatosCache";
    const PATH: &'static str = "api/contatos-emergencia";
}

#[derive(Debug, Clone, Copy)]
pub struct Tips;

impl Dataset for Tips {
    type Record = TipRecord;
    const NAME: &'static str = "tips";
    const CACHE_KEY: &'static str = "dicasCache";
    const PATH: &'static str = "api/dicas-seguranca";
}

/// Every cache key, for bulk invalidation.
pub(crate) const ALL_CACHE_KEYS: [&str; 3] =
    [Locations::CACHE_KEY, Contacts::CACHE_KEY, Tips::CACHE_KEY];
