//! The internal pipeline driver.
//!
//! [`PfoPipeline`] owns the [`ParticleFlowObjectManager`] for a processing
//! pass and is the only place the mutation capability is created. It runs
//! the construction phase, runs algorithms (each invocation gets a fresh
//! [`AlgorithmId`]) and tears the pass down.
//!
//! # Ownership model
//!
//! Every phase borrows the pipeline mutably for the duration of a closure,
//! so only one surface can mutate the graph at a time and no surface can
//! outlive its phase. Outside a phase, the manager is reachable only by
//! shared reference through [`PfoPipeline::pfos`].

use indexmap::IndexMap;
use log::{debug, trace};

use pfo_core::AlgorithmId;
use pfo_pool::PoolError;

use crate::api::{ConstructionApi, ContentApi};
use crate::config::{ConfigError, PipelineConfig};
use crate::manager::ParticleFlowObjectManager;
use crate::mutator::PfoMutator;

// ── AlgorithmScope ──────────────────────────────────────────────

/// Names and id allocation for algorithm invocations within a pass.
#[derive(Debug, Default)]
pub(crate) struct AlgorithmScope {
    names: IndexMap<AlgorithmId, String>,
    next_id: u32,
}

impl AlgorithmScope {
    /// Allocate the next id. Ids are never reissued, not even across passes.
    pub(crate) fn open(&mut self, name: &str) -> Result<AlgorithmId, PoolError> {
        let next = self
            .next_id
            .checked_add(1)
            .ok_or(PoolError::AlgorithmIdsExhausted)?;
        let id = AlgorithmId(self.next_id);
        self.next_id = next;
        self.names.insert(id, name.to_string());
        Ok(id)
    }

    pub(crate) fn name(&self, id: AlgorithmId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    fn forget(&mut self, id: AlgorithmId) {
        self.names.shift_remove(&id);
    }

    /// Forget names. `next_id` keeps counting so ids from an earlier pass
    /// stay stale.
    fn clear(&mut self) {
        self.names.clear();
    }
}

/// Run `body` inside a freshly opened algorithm scope.
///
/// The scope is always closed again, whatever `body` returns.
pub(crate) fn run_scoped<R>(
    mutator: &mut dyn PfoMutator,
    scope: &mut AlgorithmScope,
    name: &str,
    body: impl FnOnce(&mut ContentApi<'_>) -> R,
) -> Result<R, PoolError> {
    let algorithm = scope.open(name)?;
    if let Err(e) = mutator.begin_algorithm(algorithm) {
        scope.forget(algorithm);
        return Err(e);
    }
    trace!("running '{name}' as {algorithm}");
    let result = {
        let mut api = ContentApi::new(&mut *mutator, &mut *scope, algorithm);
        body(&mut api)
    };
    mutator.end_algorithm(algorithm)?;
    Ok(result)
}

// ── PfoPipeline ─────────────────────────────────────────────────

/// Owner of the PFO graph for one processing pass at a time.
pub struct PfoPipeline {
    manager: ParticleFlowObjectManager,
    scope: AlgorithmScope,
    input_algorithm_name: String,
    input_algorithm: Option<AlgorithmId>,
    pass: u64,
}

impl PfoPipeline {
    /// Create a pipeline from a validated [`PipelineConfig`].
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            manager: ParticleFlowObjectManager::new(&config.pool)?,
            scope: AlgorithmScope::default(),
            input_algorithm_name: config.input_algorithm_name,
            input_algorithm: None,
            pass: 0,
        })
    }

    /// Read-only view of the PFO graph.
    pub fn pfos(&self) -> &ParticleFlowObjectManager {
        &self.manager
    }

    /// Index of the current processing pass (starts at 0).
    pub fn pass(&self) -> u64 {
        self.pass
    }

    /// Name an algorithm invocation was run under.
    pub fn algorithm_name(&self, algorithm: AlgorithmId) -> Option<&str> {
        self.scope.name(algorithm)
    }

    /// The id the construction phase registers input PFOs under, once the
    /// construction phase has run in this pass.
    pub fn input_algorithm(&self) -> Option<AlgorithmId> {
        self.input_algorithm
    }

    /// Run the outward-facing construction phase.
    ///
    /// Constituents registered and PFOs created through the
    /// [`ConstructionApi`] belong to the input algorithm. The first call in
    /// a pass opens the input algorithm id; later calls reuse it.
    pub fn construct<R>(
        &mut self,
        body: impl FnOnce(&mut ConstructionApi<'_>) -> R,
    ) -> Result<R, PoolError> {
        let algorithm = match self.input_algorithm {
            Some(id) => id,
            None => {
                let id = self.scope.open(&self.input_algorithm_name)?;
                self.input_algorithm = Some(id);
                id
            }
        };
        self.manager.begin_algorithm(algorithm)?;
        let result = {
            let mut api = ConstructionApi::new(&mut self.manager, algorithm);
            body(&mut api)
        };
        self.manager.end_algorithm(algorithm)?;
        Ok(result)
    }

    /// Run one algorithm through the algorithm-facing [`ContentApi`].
    ///
    /// Returns whatever `body` returns. Fails only if the algorithm scope
    /// cannot be opened or closed.
    pub fn run_algorithm<R>(
        &mut self,
        name: &str,
        body: impl FnOnce(&mut ContentApi<'_>) -> R,
    ) -> Result<R, PoolError> {
        run_scoped(&mut self.manager, &mut self.scope, name, body)
    }

    /// End the pass: drop every PFO and constituent registration and
    /// forget algorithm names. Outstanding [`PfoId`](pfo_core::PfoId)s
    /// become stale.
    pub fn reset_pass(&mut self) {
        debug!(
            "pass {} ended with {} live pfos",
            self.pass,
            self.manager.len()
        );
        self.manager.reset();
        self.scope.clear();
        self.input_algorithm = None;
        self.pass += 1;
    }
}
