//! Synchronises views with a record set.
//!
//! Rendering is full-replace: every call clears what the previous call drew
//! before drawing the new set, so repeated renders never accumulate.

use safemap_core::{ContactRecord, LocationRecord, Record, TipRecord};

use crate::markup;
use crate::views::{Bounds, ListView, Marker, MarkerIcon, SpatialView, FIT_PADDING};

pub const LOCATIONS_OPERATION: &str = "load_locations";
pub const LOCATIONS_ERROR_MESSAGE: &str = "Não foi possível carregar os dados";

/// Draws locations into a map and a list side by side.
#[derive(Debug)]
pub struct RenderCoordinator<M, L> {
    map: M,
    list: L,
}

impl<M: SpatialView, L: ListView> RenderCoordinator<M, L> {
    pub fn new(map: M, list: L) -> Self {
        Self { map, list }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    /// Replaces both views with `records`.
    ///
    /// An empty slice shows the empty state in the list and leaves the
    /// viewport where it was.
    pub fn render(&mut self, records: &[LocationRecord]) {
        self.map.clear_markers();
        self.list.clear();

        if records.is_empty() {
            self.list.append(&markup::empty_locations());
            return;
        }

        for record in records {
            self.map.add_marker(Marker {
                position: record.coordinates,
                icon: MarkerIcon::for_category(&record.category),
                popup: markup::location_popup(record),
            });
            self.list.append(&markup::location_card(record));
        }

        if self.map.marker_count() > 0 {
            if let Some(bounds) = Bounds::enclosing(records.iter().map(|r| r.coordinates)) {
                self.map.fit_bounds(bounds.pad(FIT_PADDING));
            }
        }
    }

    pub fn show_loading(&mut self) {
        self.list.replace(&markup::loading());
    }

    pub fn show_error(&mut self) {
        self.list.replace(&markup::error_block(
            LOCATIONS_ERROR_MESSAGE,
            LOCATIONS_OPERATION,
        ));
    }
}

/// A record type shown as a plain list (no map).
pub trait ListRecord: Record {
    /// Operation name the retry control is bound to.
    const OPERATION: &'static str;
    const EMPTY_MESSAGE: &'static str;
    const ERROR_MESSAGE: &'static str;

    fn item_markup(&self) -> String;
}

impl ListRecord for ContactRecord {
    const OPERATION: &'static str = "load_contacts";
    const EMPTY_MESSAGE: &'static str = "Nenhum contato disponível";
    const ERROR_MESSAGE: &'static str = "Falha ao carregar contatos. Tente novamente.";

    fn item_markup(&self) -> String {
        markup::contact_item(self)
    }
}

impl ListRecord for TipRecord {
    const OPERATION: &'static str = "load_tips";
    const EMPTY_MESSAGE: &'static str = "Nenhuma dica disponível";
    const ERROR_MESSAGE: &'static str = "Falha ao carregar dicas. Tente novamente.";

    fn item_markup(&self) -> String {
        markup::tip_item(self)
    }
}

/// Replaces `list` with one entry per record, or the no-data block.
pub fn render_list<R: ListRecord, L: ListView>(list: &mut L, records: &[R]) {
    list.clear();
    if records.is_empty() {
        list.append(&markup::empty_list(R::EMPTY_MESSAGE));
        return;
    }
    for record in records {
        list.append(&record.item_markup());
    }
}

pub fn render_list_error<R: ListRecord, L: ListView>(list: &mut L) {
    list.replace(&markup::error_block(R::ERROR_MESSAGE, R::OPERATION));
}
