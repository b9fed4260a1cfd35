use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One completed rename, stored as the step that reverses it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOperation {
    /// Where the entry lives after the rename
    pub from: PathBuf,
    /// Where undo puts it back
    pub to: PathBuf,
    pub original_name: String,
    pub new_name: String,
}

/// The successful renames of one execute call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub timestamp: DateTime<Local>,
    pub operations: Vec<RenameOperation>,
    pub success_count: usize,
    pub error_count: usize,
}

impl Batch {
    pub fn new(operations: Vec<RenameOperation>, error_count: usize) -> Self {
        Self {
            timestamp: Local::now(),
            success_count: operations.len(),
            operations,
            error_count,
        }
    }
}

/// Stack of executed batches, newest last.
///
/// Only the in-memory session keeps this; nothing is written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UndoLog {
    batches: Vec<Batch>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch. Empty batches are not recorded.
    pub fn push(&mut self, batch: Batch) {
        if !batch.operations.is_empty() {
            self.batches.push(batch);
        }
    }

    pub fn pop(&mut self) -> Option<Batch> {
        self.batches.pop()
    }

    pub fn last(&self) -> Option<&Batch> {
        self.batches.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.batches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Batches newest first
    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter().rev()
    }
}
