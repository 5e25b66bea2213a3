use std::time::{Duration, Instant};

use log::{debug, info};

use crate::cnf::cnf::Cnf;
use crate::config::SolveConfig;
use crate::error::{Error, Result};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub result: SolveResult,
    /// Indexed by variable, slot 0 unused. Present after `Sat` when the
    /// model was requested for printing or verification.
    pub model: Option<Vec<Option<bool>>>,
    pub stats: SolverStats,
    pub elapsed: Duration,
}

/// Configures `solver`, streams `cnf` into it and solves once.
pub fn solve_cnf<S: IncrementalSolver + ?Sized>(
    solver: &mut S,
    cnf: &Cnf,
    config: &SolveConfig,
) -> Result<Outcome> {
    let start = Instant::now();
    config.apply(solver)?;
    cnf.feed(solver)?;
    debug!(
        "fed {} clauses ({} literals) to {}",
        cnf.clauses.len(),
        cnf.num_literals(),
        solver.backend_name()
    );

    let result = solver.solve()?;
    let model = if result == SolveResult::Sat && (config.print_model || config.verify) {
        Some(solver.model(cnf.num_vars)?)
    } else {
        None
    };

    if config.verify {
        if let Some(model) = &model {
            if let Some(clause) = cnf.first_falsified(model) {
                return Err(Error::ModelCheck { clause });
            }
            info!("model satisfies all {} clauses", cnf.clauses.len());
        }
    }

    Ok(Outcome {
        result,
        model,
        stats: solver.stats(),
        elapsed: start.elapsed(),
    })
}
