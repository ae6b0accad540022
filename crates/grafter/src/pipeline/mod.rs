//! The pipeline runner.
//!
//! A run is a left fold over an operation list: start with the initial base
//! graph and an empty result, apply each operation in the given order, and
//! carry the `(base, result)` pair forward. The runner never re-sorts; order
//! is owned by the caller ([`OperationList`]).
//!
//! A step that is not applied leaves the pair unchanged and the fold
//! continues. A source that fails to load or validate aborts the whole run
//! with an error and no partial state.

mod list;
mod session;

pub use list::OperationList;
pub use session::{Commit, RunTicket, Session};

use crate::domain::Graph;
use crate::error::Result;
use crate::operations::{add, filter, remove, transform, Operation, Outcome, Skip};
use crate::sources::SourceRegistry;
use serde::Serialize;

/// The `(base, result)` pair threaded through a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineState {
    /// The universe that constructive operations draw from
    pub base: Graph,
    /// The graph shown to the user
    pub result: Graph,
}

impl PipelineState {
    /// State at the start of a run: `initial_base` and an empty result
    pub fn new(initial_base: Graph) -> Self {
        Self {
            base: initial_base,
            result: Graph::empty(),
        }
    }
}

/// Diagnostics for one step of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Operation id
    pub id: String,
    /// Whether the step changed the state
    pub applied: bool,
    /// Why the step was not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<Skip>,
}

/// Final state of a run plus per-step diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRun {
    /// Final `(base, result)` pair
    pub state: PipelineState,
    /// One report per operation, in run order
    pub steps: Vec<StepReport>,
}

impl PipelineRun {
    /// Number of steps that were applied
    pub fn applied_count(&self) -> usize {
        self.steps.iter().filter(|s| s.applied).count()
    }
}

/// Executes operation lists against the sources of a [`SourceRegistry`].
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    sources: SourceRegistry,
}

impl Pipeline {
    /// Create a pipeline that loads sources through `sources`
    pub fn new(sources: SourceRegistry) -> Self {
        Self { sources }
    }

    /// The registry used for source operations
    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Run `operations` in order, starting from `initial_base` and an empty
    /// result.
    ///
    /// Steps run strictly one after another; each source load is awaited
    /// before the next step sees the state.
    ///
    /// # Errors
    ///
    /// Returns the first source load or validation error. No partial state
    /// is returned in that case.
    pub async fn run(&self, initial_base: Graph, operations: &[Operation]) -> Result<PipelineRun> {
        let mut state = PipelineState::new(initial_base);
        let mut steps = Vec::with_capacity(operations.len());

        for operation in operations {
            let (next, report) = self.step(state, operation).await?;
            state = next;
            steps.push(report);
        }

        Ok(PipelineRun { state, steps })
    }

    /// Apply a single operation to `state`.
    ///
    /// # Errors
    ///
    /// Fails only for source operations whose data cannot be loaded or
    /// validated.
    pub async fn step(
        &self,
        state: PipelineState,
        operation: &Operation,
    ) -> Result<(PipelineState, StepReport)> {
        let id = operation.id();

        if let Operation::Source { source } = operation {
            let base = self.sources.load(source).await?;
            tracing::debug!(operation = %id, applied = true, "Pipeline step");
            return Ok((
                PipelineState {
                    base,
                    result: state.result,
                },
                StepReport {
                    id,
                    applied: true,
                    skipped: None,
                },
            ));
        }

        let PipelineState { base, result } = state;
        let outcome = apply(&base, &result, operation);

        let (result, skipped) = match outcome {
            Outcome::Applied(graph) => (graph, None),
            Outcome::NotApplied(skip) => (result, Some(skip)),
        };
        match &skipped {
            None => tracing::debug!(operation = %id, applied = true, "Pipeline step"),
            Some(reason) => {
                tracing::debug!(operation = %id, applied = false, %reason, "Pipeline step");
            }
        }

        Ok((
            PipelineState { base, result },
            StepReport {
                id,
                applied: skipped.is_none(),
                skipped,
            },
        ))
    }
}

/// Apply a graph-rewriting operation to `(base, result)`.
///
/// Source operations need I/O and are handled by [`Pipeline::step`]; here
/// they report [`Skip::SourceNotLoaded`] and leave result unchanged.
pub fn apply(base: &Graph, result: &Graph, operation: &Operation) -> Outcome {
    match operation {
        Operation::Source { .. } => Outcome::NotApplied(Skip::SourceNotLoaded),
        Operation::AddAll => add::add_all(base, result),
        Operation::AddNode { node_id } => add::add_node(base, result, node_id),
        Operation::AddGroup { group_id } => add::add_group(base, result, group_id),
        Operation::GroupCollapse { group_id } => transform::group_collapse(result, group_id),
        Operation::GrowIn { node_id } => transform::grow_in(base, result, node_id),
        Operation::GrowOut { node_id } => transform::grow_out(base, result, node_id),
        Operation::StartFilter { node_id } => filter::start_filter(result, node_id),
        Operation::EndFilter { node_id } => filter::end_filter(result, node_id),
        Operation::PassThroughFilter { node_id } => filter::pass_through_filter(result, node_id),
        Operation::ConnectedFilter { node_id } => filter::connected_filter(result, node_id),
        Operation::GroupFilter { group_id } => filter::group_filter(result, group_id),
        Operation::RemoveNode { node_id } => remove::remove_node(result, node_id),
        Operation::RemoveGroup { group_id } => remove::remove_group(result, group_id),
    }
}
