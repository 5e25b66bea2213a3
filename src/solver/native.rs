use std::ffi::CString;
use std::ptr::NonNull;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, trace};

use crate::error::{Error, Result};
use crate::ffi::RawSolver;
use crate::library::Library;
use crate::lit::MAX_VAR;
use crate::solver::{IncrementalSolver, SolveResult, SolverStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing added yet; options may still change.
    Configuring,
    Adding,
    Solved(SolveResult),
}

/// A live solver handle. Released exactly once on drop.
///
/// The raw handle makes this type neither `Send` nor `Sync`, so one handle
/// cannot be used from several threads.
pub struct NativeSolver {
    handle: NonNull<RawSolver>,
    library: Arc<Library>,
    phase: Phase,
    clause_open: bool,
    stats: SolverStats,
}

impl NativeSolver {
    pub fn new(library: Arc<Library>) -> Result<Self> {
        // SAFETY: init takes no arguments and returns an owned handle or null.
        let raw = unsafe { (library.api().init)() };
        let handle = NonNull::new(raw).ok_or(Error::NullHandle)?;
        debug!("created solver {:p} from {}", handle, library.origin());
        Ok(Self {
            handle,
            library,
            phase: Phase::Configuring,
            clause_open: false,
            stats: SolverStats::default(),
        })
    }

    pub fn library(&self) -> &Arc<Library> {
        &self.library
    }

    /// Raw handle, for identity checks only.
    pub fn as_ptr(&self) -> *const RawSolver {
        self.handle.as_ptr()
    }

    pub fn last_result(&self) -> Option<SolveResult> {
        match self.phase {
            Phase::Solved(r) => Some(r),
            _ => None,
        }
    }

    fn ensure_unsolved(&self) -> Result<()> {
        match self.phase {
            Phase::Solved(_) => Err(Error::AlreadySolved),
            _ => Ok(()),
        }
    }
}

impl IncrementalSolver for NativeSolver {
    fn add(&mut self, lit: i32) -> Result<()> {
        self.ensure_unsolved()?;
        trace!("add {lit}");
        // SAFETY: handle is live; the library validates the literal.
        unsafe { (self.library.api().add)(self.handle.as_ptr(), lit) };
        self.phase = Phase::Adding;
        self.clause_open = lit != 0;
        self.stats.record_add(lit);
        Ok(())
    }

    fn solve(&mut self) -> Result<SolveResult> {
        self.ensure_unsolved()?;
        if self.clause_open {
            return Err(Error::UnterminatedClause);
        }
        self.stats.solve_calls += 1;
        let start = Instant::now();
        // SAFETY: handle is live and every clause is terminated.
        let code = unsafe { (self.library.api().solve)(self.handle.as_ptr()) };
        let result = SolveResult::from_code(code);
        // the library does not accept further input after solve, whatever it returned
        self.phase = Phase::Solved(result.as_ref().copied().unwrap_or(SolveResult::Unknown));
        info!(
            "solve returned {} after {} ms ({} clauses, {} variables)",
            code,
            start.elapsed().as_millis(),
            self.stats.clauses,
            self.stats.max_var
        );
        result
    }

    fn value(&self, var: u32) -> Result<Option<bool>> {
        if self.phase != Phase::Solved(SolveResult::Sat) {
            return Err(Error::NoModel);
        }
        if var == 0 || var > MAX_VAR {
            return Err(Error::InvalidLiteral(var.into()));
        }
        let lit = var as i32;
        // SAFETY: handle is live and in the satisfied state.
        let raw = unsafe { (self.library.api().value)(self.handle.as_ptr(), lit) };
        match raw {
            0 => Ok(None),
            v if v == lit => Ok(Some(true)),
            v if v == -lit => Ok(Some(false)),
            raw => Err(Error::UnexpectedValue { var, raw }),
        }
    }

    fn set_option(&mut self, name: &str, value: i32) -> Result<i32> {
        let f = self
            .library
            .api()
            .set_option
            .ok_or(Error::Unsupported("set_option"))?;
        if self.phase != Phase::Configuring {
            return Err(Error::OptionsLocked);
        }
        let name_c = CString::new(name)?;
        // SAFETY: handle is live; name is NUL-terminated and outlives the call.
        let previous = unsafe { f(self.handle.as_ptr(), name_c.as_ptr(), value) };
        debug!("option {name}={value} (was {previous})");
        Ok(previous)
    }

    fn set_conflict_limit(&mut self, limit: u32) -> Result<()> {
        let f = self
            .library
            .api()
            .set_conflict_limit
            .ok_or(Error::Unsupported("set_conflict_limit"))?;
        self.ensure_unsolved()?;
        // SAFETY: handle is live.
        unsafe { f(self.handle.as_ptr(), limit) };
        Ok(())
    }

    fn set_decision_limit(&mut self, limit: u32) -> Result<()> {
        let f = self
            .library
            .api()
            .set_decision_limit
            .ok_or(Error::Unsupported("set_decision_limit"))?;
        self.ensure_unsolved()?;
        // SAFETY: handle is live.
        unsafe { f(self.handle.as_ptr(), limit) };
        Ok(())
    }

    fn stats(&self) -> SolverStats {
        self.stats
    }

    fn backend_name(&self) -> &str {
        "native"
    }
}

impl Drop for NativeSolver {
    fn drop(&mut self) {
        debug!("releasing solver {:p}", self.handle);
        // SAFETY: the handle came from init and is released only here.
        unsafe { (self.library.api().release)(self.handle.as_ptr()) };
    }
}

impl std::fmt::Debug for NativeSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeSolver")
            .field("handle", &self.handle)
            .field("library", self.library.origin())
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .finish()
    }
}
