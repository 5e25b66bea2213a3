pub use crate::lit::Lit;

use crate::error::Result;
use crate::solver::IncrementalSolver;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub num_vars: u32,
    pub clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Adds a clause, growing `num_vars` to cover its variables.
    pub fn add_clause(&mut self, clause: Vec<Lit>) {
        if let Some(max) = clause.iter().map(|l| l.var).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Vec::len).sum()
    }

    /// Streams every clause into `solver`, each followed by the 0 terminator.
    pub fn feed<S: IncrementalSolver + ?Sized>(&self, solver: &mut S) -> Result<()> {
        for clause in &self.clauses {
            solver.add_clause(clause)?;
        }
        Ok(())
    }

    pub fn eval_lit_partial(lit: Lit, assignment: &[Option<bool>]) -> Option<bool> {
        let var = lit.var as usize;
        if var >= assignment.len() {
            return None;
        }
        assignment[var].map(|v| if lit.sign { v } else { !v })
    }

    pub fn eval_clause_partial(clause: &[Lit], assignment: &[Option<bool>]) -> Option<bool> {
        let mut any_unknown = false;
        for &lit in clause {
            match Self::eval_lit_partial(lit, assignment) {
                Some(true) => return Some(true),
                Some(false) => {}
                None => any_unknown = true,
            }
        }
        if any_unknown { None } else { Some(false) }
    }

    pub fn eval_formula_partial(&self, assignment: &[Option<bool>]) -> Option<bool> {
        let mut all_true = true;
        for clause in &self.clauses {
            match Self::eval_clause_partial(clause, assignment) {
                Some(true) => {}
                Some(false) => return Some(false),
                None => all_true = false,
            }
        }
        if all_true { Some(true) } else { None }
    }

    /// Index of the first clause not satisfied by `assignment`.
    ///
    /// Unassigned variables count as neither true nor false, so a clause
    /// whose literals are all unassigned or false is reported.
    pub fn first_falsified(&self, assignment: &[Option<bool>]) -> Option<usize> {
        self.clauses
            .iter()
            .position(|clause| Self::eval_clause_partial(clause, assignment) != Some(true))
    }
}
