//! Tracking of which catalog entries are not yet answered correctly.
//!
//! The wrong set is the only persisted state in the quiz. Every mutation goes
//! through [`AnswerState::mark_wrong`] or [`AnswerState::mark_correct`], which
//! write the whole set back to the store.

pub mod store;

pub use store::{AnswerStore, JsonFileStore};

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use crate::Error;

/// Answer progress summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub correct: usize,
    pub total: usize,
}

/// The set of catalog indices the user has not answered correctly.
pub struct AnswerState {
    wrong: BTreeSet<usize>,
    total: usize,
    store: Box<dyn AnswerStore>,
}

impl AnswerState {
    /// Load persisted state for a catalog of `total` entries.
    ///
    /// Any read or parse failure falls back to every index being wrong.
    /// Persisted indices outside the catalog are dropped.
    pub fn load(store: Box<dyn AnswerStore>, total: usize) -> Self {
        let wrong = match store.load() {
            Ok(indices) => {
                let (kept, dropped): (BTreeSet<usize>, BTreeSet<usize>) =
                    indices.into_iter().partition(|&i| i < total);
                if !dropped.is_empty() {
                    tracing::warn!(?dropped, total, "ignoring persisted indices outside the catalog");
                }
                kept
            }
            Err(e) => {
                tracing::warn!("failed to load answer state, marking all {} entries wrong: {}", total, e);
                (0..total).collect()
            }
        };

        Self { wrong, total, store }
    }

    /// Mark `index` as not answered correctly and persist the full set.
    pub fn mark_wrong(&mut self, index: usize) -> Result<(), Error> {
        self.check_index(index)?;
        self.wrong.insert(index);
        self.persist()
    }

    /// Mark `index` as answered correctly.
    ///
    /// Only persists when the index was actually in the wrong set.
    /// Returns whether a removal happened.
    pub fn mark_correct(&mut self, index: usize) -> Result<bool, Error> {
        self.check_index(index)?;
        if !self.wrong.remove(&index) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Pick one unanswered index uniformly at random, or `None` when all are correct.
    pub fn next_wrong_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        self.wrong.iter().copied().choose(rng)
    }

    pub fn status(&self) -> Status {
        Status { correct: self.total - self.wrong.len(), total: self.total }
    }

    pub fn is_wrong(&self, index: usize) -> bool {
        self.wrong.contains(&index)
    }

    pub fn wrong_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.wrong.iter().copied()
    }

    /// Mark every entry wrong again and persist.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.wrong = (0..self.total).collect();
        self.persist()
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.total {
            return Err(Error::InvalidInput(format!("index {} out of range (catalog has {})", index, self.total)));
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), Error> {
        let indices: Vec<usize> = self.wrong.iter().copied().collect();
        self.store.save(&indices)
    }
}

impl std::fmt::Debug for AnswerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerState").field("wrong", &self.wrong).field("total", &self.total).finish()
    }
}
