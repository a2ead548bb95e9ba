//! Background evolution runs: start, poll, cancel.
//!
//! The engine itself is synchronous and CPU-bound; the runner gives the
//! CLI/UI boundary its start-and-poll contract by running each evolution
//! on its own thread and recording results in a shared registry. Variants
//! of the final generation land in the pattern store under fresh ids,
//! never overwriting the seed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use patternjam_core::{Pattern, PatternId, PatternStore, RunId};

use crate::algorithm::AlgorithmId;
use crate::engine::{CancelToken, EvolutionEngine, EvolutionRun};
use crate::error::EvolveError;

/// Lifecycle of one background run.
#[derive(Debug, Clone)]
pub enum RunStatus {
    Running,
    Done(EvolutionRun),
    Failed(String),
}

/// Registry of background evolution runs.
pub struct EvolutionRunner {
    engine: Arc<EvolutionEngine>,
    store: Arc<dyn PatternStore>,
    runs: Arc<Mutex<HashMap<RunId, RunStatus>>>,
    counter: AtomicU64,
}

impl EvolutionRunner {
    pub fn new(engine: EvolutionEngine, store: Arc<dyn PatternStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
            runs: Arc::new(Mutex::new(HashMap::new())),
            counter: AtomicU64::new(0),
        }
    }

    /// Kick off an evolution of the stored pattern on a background
    /// thread. Returns the run id and a cancellation token; argument
    /// errors surface synchronously.
    pub fn start_evolution(
        &self,
        pattern_id: &PatternId,
        algorithm: &str,
        generations: u32,
        seed: u32,
    ) -> Result<(RunId, CancelToken), EvolveError> {
        let algorithm: AlgorithmId = algorithm.parse()?;
        let pattern = self
            .store
            .get(pattern_id)
            .ok_or_else(|| EvolveError::UnknownPattern {
                id: pattern_id.clone(),
            })?;
        if pattern.is_empty() {
            return Err(EvolveError::EmptySeed);
        }

        let run_id = RunId::new(format!(
            "run-{:04}",
            self.counter.fetch_add(1, Ordering::Relaxed)
        ));
        self.set_status(&run_id, RunStatus::Running);

        let cancel = CancelToken::new();
        let engine = Arc::clone(&self.engine);
        let store = Arc::clone(&self.store);
        let runs = Arc::clone(&self.runs);
        let thread_cancel = cancel.clone();
        let thread_run_id = run_id.clone();
        let thread_pattern_id = pattern_id.clone();

        thread::spawn(move || {
            let status =
                match engine.evolve(&pattern, algorithm, generations, seed, &thread_cancel) {
                    Ok(run) => {
                        store_variants(&*store, &thread_pattern_id, &thread_run_id, &run);
                        RunStatus::Done(run)
                    }
                    Err(err) => RunStatus::Failed(err.to_string()),
                };
            runs.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(thread_run_id, status);
        });

        Ok((run_id, cancel))
    }

    pub fn get_run(&self, run_id: &RunId) -> Option<RunStatus> {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(run_id)
            .cloned()
    }

    fn set_status(&self, run_id: &RunId, status: RunStatus) {
        self.runs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(run_id.clone(), status);
    }
}

/// Store the final generation ranked by fitness under fresh variant ids.
fn store_variants(
    store: &dyn PatternStore,
    pattern_id: &PatternId,
    run_id: &RunId,
    run: &EvolutionRun,
) {
    let Some(last) = run.generations.last() else {
        return;
    };
    let mut ranked: Vec<(usize, f64)> = last.fitness.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    for (rank, (index, _)) in ranked.into_iter().enumerate() {
        let variant: &Pattern = &last.population[index];
        let id = PatternId::new(format!("{pattern_id}::{run_id}::v{rank}"));
        store.put(id, variant.clone());
    }
}
