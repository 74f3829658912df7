//! Token-keyed store for computed result sets.
//!
//! Each upload gets its own token, so concurrent uploads never observe
//! each other's results. The store is bounded: once `capacity` result
//! sets are held, the oldest is evicted and its token stops resolving.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use uuid::Uuid;

use crate::analyzers::types::GroupResult;

pub struct ResultStore {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<Uuid, Vec<GroupResult>>,
    order: VecDeque<Uuid>,
}

impl ResultStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Stores a result set and returns the token that resolves it.
    pub fn insert(&self, results: Vec<GroupResult>) -> Uuid {
        let token = Uuid::new_v4();
        let mut inner = self.inner.lock().unwrap();

        while inner.order.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.entries.remove(&evicted);
            }
        }

        inner.order.push_back(token);
        inner.entries.insert(token, results);
        token
    }

    /// Looks up a stored result set. `None` for unknown or evicted tokens.
    pub fn get(&self, token: &Uuid) -> Option<Vec<GroupResult>> {
        self.inner.lock().unwrap().entries.get(token).cloned()
    }
}
