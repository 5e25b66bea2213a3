pub mod native;
pub mod varisat;

use crate::error::{Error, Result};
use crate::ffi::{STATUS_SAT, STATUS_UNKNOWN, STATUS_UNSAT};
use crate::lit::Lit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// Interrupted, limit reached, or otherwise undecided.
    Unknown,
}

impl SolveResult {
    /// Maps a raw status code. Codes other than 10, 20 and 0 are undefined.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            STATUS_SAT => Ok(Self::Sat),
            STATUS_UNSAT => Ok(Self::Unsat),
            STATUS_UNKNOWN => Ok(Self::Unknown),
            other => Err(Error::UnexpectedStatus(other)),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Sat => STATUS_SAT,
            Self::Unsat => STATUS_UNSAT,
            Self::Unknown => STATUS_UNKNOWN,
        }
    }
}

impl TryFrom<i32> for SolveResult {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub solve_calls: usize,
    pub clauses: usize,
    pub literals: usize,
    pub max_var: u32,
}

impl SolverStats {
    pub(crate) fn record_add(&mut self, lit: i32) {
        if lit == 0 {
            self.clauses += 1;
        } else {
            self.literals += 1;
            self.max_var = self.max_var.max(lit.unsigned_abs());
        }
    }
}

/// Literal-streaming solver interface shared by the native handle and the
/// pure Rust backend.
pub trait IncrementalSolver {
    /// Appends `lit` to the open clause; 0 closes it.
    fn add(&mut self, lit: i32) -> Result<()>;

    fn add_clause(&mut self, clause: &[Lit]) -> Result<()> {
        for &lit in clause {
            self.add(lit.to_dimacs())?;
        }
        self.add(0)
    }

    fn solve(&mut self) -> Result<SolveResult>;

    /// Polarity of `var` in the last satisfying assignment, `None` if the
    /// solver left it unassigned.
    fn value(&self, var: u32) -> Result<Option<bool>>;

    /// Sets a named solver option, returning the previous value.
    fn set_option(&mut self, _name: &str, _value: i32) -> Result<i32> {
        Err(Error::Unsupported("set_option"))
    }

    fn set_conflict_limit(&mut self, _limit: u32) -> Result<()> {
        Err(Error::Unsupported("set_conflict_limit"))
    }

    fn set_decision_limit(&mut self, _limit: u32) -> Result<()> {
        Err(Error::Unsupported("set_decision_limit"))
    }

    fn stats(&self) -> SolverStats;

    fn backend_name(&self) -> &str;

    /// Values of variables `1..=num_vars`, indexed by variable (slot 0 unused).
    fn model(&self, num_vars: u32) -> Result<Vec<Option<bool>>> {
        let mut model = Vec::with_capacity(num_vars as usize + 1);
        model.push(None);
        for var in 1..=num_vars {
            model.push(self.value(var)?);
        }
        Ok(model)
    }
}

impl<S: IncrementalSolver + ?Sized> IncrementalSolver for Box<S> {
    fn add(&mut self, lit: i32) -> Result<()> {
        (**self).add(lit)
    }

    fn add_clause(&mut self, clause: &[Lit]) -> Result<()> {
        (**self).add_clause(clause)
    }

    fn solve(&mut self) -> Result<SolveResult> {
        (**self).solve()
    }

    fn value(&self, var: u32) -> Result<Option<bool>> {
        (**self).value(var)
    }

    fn set_option(&mut self, name: &str, value: i32) -> Result<i32> {
        (**self).set_option(name, value)
    }

    fn set_conflict_limit(&mut self, limit: u32) -> Result<()> {
        (**self).set_conflict_limit(limit)
    }

    fn set_decision_limit(&mut self, limit: u32) -> Result<()> {
        (**self).set_decision_limit(limit)
    }

    fn stats(&self) -> SolverStats {
        (**self).stats()
    }

    fn backend_name(&self) -> &str {
        (**self).backend_name()
    }
}
