//! Safe binding to a native SAT solver exposing the kissat C ABI.
//!
//! ```no_run
//! use std::sync::Arc;
//! use kissat_handle::library::Library;
//! use kissat_handle::solver::native::NativeSolver;
//! use kissat_handle::solver::{IncrementalSolver, SolveResult};
//!
//! # fn main() -> kissat_handle::Result<()> {
//! let library = Arc::new(Library::open(Library::default_path())?);
//! let mut solver = NativeSolver::new(library)?;
//! solver.add(1)?;
//! solver.add(2)?;
//! solver.add(0)?;
//! assert_eq!(solver.solve()?, SolveResult::Sat);
//! # Ok(())
//! # }
//! ```

pub mod builtin;
pub mod cnf;
pub mod config;
pub mod error;
pub mod ffi;
pub mod library;
pub mod lit;
pub mod report;
pub mod session;
pub mod solver;

pub use error::{Error, Result};
