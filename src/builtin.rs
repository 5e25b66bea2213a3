use std::ffi::{c_char, c_int};

use log::warn;

use crate::ffi::{KissatApi, RawSolver, STATUS_UNKNOWN};
use crate::solver::varisat::VarisatSolver;
use crate::solver::IncrementalSolver;

pub const SIGNATURE: &str = "varisat-0.2 (builtin)";
const SIGNATURE_C: &[u8] = b"varisat-0.2 (builtin)\0";

pub const API: KissatApi = KissatApi {
    init,
    release,
    add,
    solve,
    value,
    signature: Some(signature),
    set_option: None,
    set_conflict_limit: None,
    set_decision_limit: None,
};

struct BuiltinState {
    solver: VarisatSolver,
    // set once a literal was rejected; the formula no longer matches the input
    poisoned: bool,
}

unsafe fn state<'a>(solver: *mut RawSolver) -> &'a mut BuiltinState {
    &mut *solver.cast::<BuiltinState>()
}

unsafe extern "C" fn init() -> *mut RawSolver {
    let inner = BuiltinState {
        solver: VarisatSolver::new(),
        poisoned: false,
    };
    Box::into_raw(Box::new(inner)).cast()
}

unsafe extern "C" fn release(solver: *mut RawSolver) {
    if !solver.is_null() {
        drop(Box::from_raw(solver.cast::<BuiltinState>()));
    }
}

unsafe extern "C" fn add(solver: *mut RawSolver, lit: c_int) {
    let inner = state(solver);
    if let Err(err) = inner.solver.add(lit) {
        warn!("builtin add({lit}) rejected, solve will report unknown: {err}");
        inner.poisoned = true;
    }
}

unsafe extern "C" fn solve(solver: *mut RawSolver) -> c_int {
    let inner = state(solver);
    if inner.poisoned {
        return STATUS_UNKNOWN;
    }
    match inner.solver.solve() {
        Ok(result) => result.code(),
        Err(err) => {
            warn!("builtin solve failed: {err}");
            STATUS_UNKNOWN
        }
    }
}

unsafe extern "C" fn value(solver: *mut RawSolver, lit: c_int) -> c_int {
    if lit == 0 || lit == c_int::MIN {
        return 0;
    }
    match state(solver).solver.value(lit.unsigned_abs()) {
        Ok(Some(v)) => {
            if v == (lit > 0) {
                lit
            } else {
                -lit
            }
        }
        _ => 0,
    }
}

unsafe extern "C" fn signature() -> *const c_char {
    SIGNATURE_C.as_ptr().cast()
}
