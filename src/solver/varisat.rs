use log::warn;
use varisat::ExtendFormula;

use crate::error::{Error, Result};
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

/// Pure Rust backend. Unlike the native library it may be solved repeatedly;
/// clauses added after a solve extend the formula.
pub struct VarisatSolver {
    inner: varisat::Solver<'static>,
    clause: Vec<varisat::Lit>,
    last_model: Option<Vec<Option<bool>>>,
    stats: SolverStats,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            inner: varisat::Solver::new(),
            clause: Vec::new(),
            last_model: None,
            stats: SolverStats::default(),
        }
    }
}

/// Largest variable varisat can represent, in DIMACS numbering.
pub fn max_var() -> isize {
    varisat::Var::max_var().to_dimacs()
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementalSolver for VarisatSolver {
    fn add(&mut self, lit: i32) -> Result<()> {
        if lit == i32::MIN || lit.unsigned_abs() as isize > max_var() {
            return Err(Error::InvalidLiteral(lit.into()));
        }
        self.stats.record_add(lit);
        if lit == 0 {
            self.inner.add_clause(&self.clause);
            self.clause.clear();
        } else {
            self.clause.push(varisat::Lit::from_dimacs(lit as isize));
        }
        self.last_model = None;
        Ok(())
    }

    fn solve(&mut self) -> Result<SolveResult> {
        if !self.clause.is_empty() {
            return Err(Error::UnterminatedClause);
        }
        self.stats.solve_calls += 1;
        match self.inner.solve() {
            Ok(true) => {
                let mut values = vec![None; self.stats.max_var as usize + 1];
                for lit in self.inner.model().unwrap_or_default() {
                    let idx = lit.var().to_dimacs() as usize;
                    if idx < values.len() {
                        values[idx] = Some(lit.is_positive());
                    }
                }
                self.last_model = Some(values);
                Ok(SolveResult::Sat)
            }
            Ok(false) => {
                self.last_model = None;
                Ok(SolveResult::Unsat)
            }
            Err(err) => {
                warn!("varisat stopped without a result: {err}");
                self.last_model = None;
                Ok(SolveResult::Unknown)
            }
        }
    }

    fn value(&self, var: u32) -> Result<Option<bool>> {
        let model = self.last_model.as_ref().ok_or(Error::NoModel)?;
        Ok(model.get(var as usize).copied().flatten())
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &str {
        "varisat"
    }
}
