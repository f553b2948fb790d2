use std::collections::HashMap;

use log::debug;

use super::Hashable;

/// A lazily populated table of action values
///
/// Every state maps to a row of exactly `n_actions` estimates. Rows are only created through
/// [`get_or_insert`](Self::get_or_insert), which fills unseen states with zeros.
#[derive(Debug, Clone)]
pub struct QTable<S: Hashable> {
    rows: HashMap<S, Vec<f32>>,
    n_actions: usize,
}

impl<S: Hashable> QTable<S> {
    /// Create an empty table for an action space of size `n_actions`
    pub fn new(n_actions: usize) -> Self {
        Self {
            rows: HashMap::new(),
            n_actions,
        }
    }

    /// Size of the action space, i.e. the length of every row
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Row for `state` if it has been referenced before
    pub fn get(&self, state: &S) -> Option<&[f32]> {
        self.rows.get(state).map(Vec::as_slice)
    }

    /// Row for `state`, zero-initialized if the state has not been seen
    ///
    /// The key is only cloned when a new row is created.
    pub fn get_or_insert(&mut self, state: &S) -> &mut [f32] {
        if !self.rows.contains_key(state) {
            debug!("new state in q table (rows: {})", self.rows.len() + 1);
            self.rows.insert(state.clone(), vec![0.0; self.n_actions]);
        }
        self.rows
            .get_mut(state)
            .map(Vec::as_mut_slice)
            .unwrap_or_default()
    }

    /// Number of states with a row
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[f32])> {
        self.rows.iter().map(|(s, row)| (s, row.as_slice()))
    }
}
