use chrono::{DateTime, Utc};
use safemap_client::{Clock, DataStore, FetchError, KvStore, Locations};
use safemap_core::{filter, CategoryFilter, LocationRecord};

use crate::controller::{LoadOutcome, Operation, Rejected, Ticket, Trigger};
use crate::render::{RenderCoordinator, LOCATIONS_OPERATION};
use crate::views::{ListView, SpatialView};

/// `dd/mm/yyyy HH:MM`
pub const LAST_UPDATED_FORMAT: &str = "%d/%m/%Y %H:%M";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationsState {
    pub records: Vec<LocationRecord>,
    pub loaded: bool,
    pub active_filter: CategoryFilter,
    pub query: String,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Loaded {
        records: Vec<LocationRecord>,
        at: DateTime<Utc>,
    },
    Search(String),
    SelectFilter(CategoryFilter),
}

/// The map page: state, both views and the `load_locations` operation.
#[derive(Debug)]
pub struct LocationsPage<M, L> {
    state: LocationsState,
    views: RenderCoordinator<M, L>,
    operation: Operation,
}

impl<M: SpatialView, L: ListView> LocationsPage<M, L> {
    pub fn new(map: M, list: L) -> Self {
        Self {
            state: LocationsState::default(),
            views: RenderCoordinator::new(map, list),
            operation: Operation::new(LOCATIONS_OPERATION),
        }
    }

    pub fn state(&self) -> &LocationsState {
        &self.state
    }

    pub fn views(&self) -> &RenderCoordinator<M, L> {
        &self.views
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Applies `action` and redraws when the result is visible.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Loaded { records, at } => {
                self.state.records = records;
                self.state.loaded = true;
                self.state.last_updated = Some(at);
            }
            Action::Search(query) => self.state.query = query,
            Action::SelectFilter(active) => self.state.active_filter = active,
        }

        // Input that arrives before the first load only updates the state.
        if self.state.loaded {
            let visible = self.visible();
            tracing::debug!(
                query = %self.state.query,
                filter = %self.state.active_filter,
                shown = visible.len(),
                total = self.state.records.len(),
                "redrawing locations"
            );
            self.views.render(&visible);
        }
    }

    /// Records matching the current query and filter.
    #[must_use]
    pub fn visible(&self) -> Vec<LocationRecord> {
        filter(
            &self.state.records,
            &self.state.query,
            self.state.active_filter,
        )
    }

    #[must_use]
    pub fn last_updated_label(&self) -> Option<String> {
        self.state
            .last_updated
            .map(|at| at.format(LAST_UPDATED_FORMAT).to_string())
    }

    /// Issues a ticket and shows the loading indicator.
    ///
    /// # Errors
    ///
    /// Returns the controller's [`Rejected`] reason; views are untouched.
    pub fn begin_load(&mut self, trigger: Trigger) -> Result<Ticket, Rejected> {
        let ticket = self.operation.begin(trigger)?;
        self.views.show_loading();
        Ok(ticket)
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<LocationRecord>, FetchError>,
        at: DateTime<Utc>,
    ) -> LoadOutcome {
        if !self.operation.complete(ticket, result.is_ok()) {
            return LoadOutcome::Superseded;
        }
        match result {
            Ok(records) => {
                let count = records.len();
                self.dispatch(Action::Loaded { records, at });
                LoadOutcome::Loaded { count }
            }
            Err(e) => {
                tracing::error!(
                    operation = LOCATIONS_OPERATION,
                    kind = e.kind(),
                    error = %e,
                    "failed to load locations"
                );
                self.views.show_error();
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Runs one complete `load_locations` call against `store`.
    pub async fn load<S: KvStore, C: Clock>(
        &mut self,
        store: &DataStore<S, C>,
        trigger: Trigger,
    ) -> LoadOutcome {
        let ticket = match self.begin_load(trigger) {
            Ok(ticket) => ticket,
            Err(rejected) => return LoadOutcome::Rejected(rejected),
        };
        let result = store.load::<Locations>().await;
        let at = super::clock_now(store.clock());
        self.finish_load(ticket, result, at)
    }
}
