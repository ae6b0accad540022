//! Ordered operation lists and the insertion policy.

use crate::error::{Error, Result};
use crate::operations::{Operation, OperationKind, SOURCE_PRIORITY};
use serde::{Deserialize, Serialize};

/// An operation list in pipeline order, unique by operation id.
///
/// Insertion follows the priority bands:
/// - sources go to the front,
/// - add operations go after the leading run of sources,
/// - everything else is appended in the order requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationList {
    operations: Vec<Operation>,
}

impl OperationList {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap operations that are already in pipeline order.
    ///
    /// Later operations whose id repeats an earlier one are dropped.
    pub fn from_ordered(operations: impl IntoIterator<Item = Operation>) -> Self {
        let mut list = Self::new();
        for operation in operations {
            if list.contains(&operation.id()) {
                tracing::warn!(operation = %operation.id(), "Dropping duplicate operation");
                continue;
            }
            list.operations.push(operation);
        }
        list
    }

    /// Insert according to the band policy, returning the position used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateOperation`] if an operation with the same id
    /// is already in the list.
    pub fn insert(&mut self, operation: Operation) -> Result<usize> {
        let id = operation.id();
        if self.contains(&id) {
            return Err(Error::DuplicateOperation(id));
        }

        let index = match operation.kind() {
            OperationKind::Source => 0,
            OperationKind::Add => self
                .operations
                .iter()
                .take_while(|op| op.priority() == SOURCE_PRIORITY)
                .count(),
            _ => self.operations.len(),
        };
        self.operations.insert(index, operation);
        Ok(index)
    }

    /// Remove the operation if its id is present, otherwise insert it.
    ///
    /// Returns `true` when the operation is in the list afterwards.
    pub fn toggle(&mut self, operation: Operation) -> bool {
        let id = operation.id();
        if let Some(index) = self.position(&id) {
            self.operations.remove(index);
            return false;
        }
        // The id was just checked, so insert cannot report a duplicate.
        self.insert(operation).is_ok()
    }

    /// Remove the operation with this id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationNotFound`] if no operation has this id.
    pub fn remove(&mut self, id: &str) -> Result<Operation> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::OperationNotFound(id.to_string()))?;
        Ok(self.operations.remove(index))
    }

    /// Remove every operation
    pub fn clear(&mut self) {
        self.operations.clear();
    }

    /// Whether an operation with this id is present
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.operations.iter().position(|op| op.id() == id)
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Operations in pipeline order
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Operations in pipeline order, as a slice
    pub fn as_slice(&self) -> &[Operation] {
        &self.operations
    }
}

impl<'a> IntoIterator for &'a OperationList {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<OperationList> for Vec<Operation> {
    fn from(list: OperationList) -> Self {
        list.operations
    }
}
