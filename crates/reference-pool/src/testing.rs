//! Test doubles for pool unit tests.

use reference_store::{QueryRequest, ReferenceStore, Row, StoreError};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Store that answers queries from a queue of canned batches.
///
/// Each query consumes the next batch; once the queue is drained every query
/// returns no rows. All requests are recorded for inspection.
#[derive(Default)]
pub(crate) struct ScriptedStore {
    batches: RefCell<VecDeque<Vec<Row>>>,
    requests: RefCell<Vec<QueryRequest>>,
}

impl ScriptedStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_batch(self, rows: Vec<Row>) -> Self {
        self.batches.borrow_mut().push_back(rows);
        self
    }

    pub(crate) fn requests(&self) -> Vec<QueryRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl ReferenceStore for ScriptedStore {
    fn query_many(&self, request: &QueryRequest) -> Result<Vec<Row>, StoreError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.batches.borrow_mut().pop_front().unwrap_or_default())
    }
}

pub(crate) fn surname_row(name: &str) -> Row {
    Row::new().with("name", name)
}

pub(crate) fn given_name_row(name: &str, gender: &str) -> Row {
    Row::new().with("name", name).with("gender", gender)
}

pub(crate) fn location_row(city: &str, province: &str, country: &str, postal_code: &str) -> Row {
    Row::new()
        .with("city", city)
        .with("province", province)
        .with("country", country)
        .with("postalCode", postal_code)
}
