use std::marker::PhantomData;

use safemap_client::{Clock, Contacts, DataStore, Dataset, FetchError, KvStore, Tips};

use crate::controller::{LoadOutcome, Operation, Rejected, Ticket, Trigger};
use crate::render::{render_list, render_list_error, ListRecord};
use crate::views::ListView;

/// One list-only dataset section (contacts or tips) with its own operation.
#[derive(Debug)]
pub struct ListSection<D: Dataset, L> {
    list: L,
    records: Vec<D::Record>,
    operation: Operation,
    _dataset: PhantomData<D>,
}

impl<D, L> ListSection<D, L>
where
    D: Dataset,
    D::Record: ListRecord,
    L: ListView,
{
    pub fn new(list: L) -> Self {
        Self {
            list,
            records: Vec::new(),
            operation: Operation::new(<D::Record as ListRecord>::OPERATION),
            _dataset: PhantomData,
        }
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn records(&self) -> &[D::Record] {
        &self.records
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// # Errors
    ///
    /// Returns the controller's [`Rejected`] reason; the list is untouched.
    pub fn begin_load(&mut self, trigger: Trigger) -> Result<Ticket, Rejected> {
        let ticket = self.operation.begin(trigger)?;
        self.list.replace(&crate::markup::loading());
        Ok(ticket)
    }

    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<D::Record>, FetchError>,
    ) -> LoadOutcome {
        if !self.operation.complete(ticket, result.is_ok()) {
            return LoadOutcome::Superseded;
        }
        match result {
            Ok(records) => {
                render_list(&mut self.list, &records);
                let count = records.len();
                self.records = records;
                LoadOutcome::Loaded { count }
            }
            Err(e) => {
                tracing::error!(
                    operation = self.operation.name(),
                    dataset = D::NAME,
                    kind = e.kind(),
                    error = %e,
                    "failed to load list"
                );
                render_list_error::<D::Record, _>(&mut self.list);
                LoadOutcome::Failed(e)
            }
        }
    }

    pub async fn load<S: KvStore, C: Clock>(
        &mut self,
        store: &DataStore<S, C>,
        trigger: Trigger,
    ) -> LoadOutcome {
        let ticket = match self.begin_load(trigger) {
            Ok(ticket) => ticket,
            Err(rejected) => return LoadOutcome::Rejected(rejected),
        };
        let result = store.load::<D>().await;
        self.finish_load(ticket, result)
    }
}

/// Emergency contacts and safety tips, loaded side by side.
#[derive(Debug)]
pub struct SafetyPanel<L> {
    pub contacts: ListSection<Contacts, L>,
    pub tips: ListSection<Tips, L>,
}

impl<L: ListView> SafetyPanel<L> {
    pub fn new(contacts: L, tips: L) -> Self {
        Self {
            contacts: ListSection::new(contacts),
            tips: ListSection::new(tips),
        }
    }

    /// Loads both sections concurrently; neither waits on the other's result.
    pub async fn load_all<S: KvStore, C: Clock>(
        &mut self,
        store: &DataStore<S, C>,
        trigger: Trigger,
    ) -> (LoadOutcome, LoadOutcome) {
        tokio::join!(
            self.contacts.load(store, trigger),
            self.tips.load(store, trigger)
        )
    }
}
