use std::ffi::{c_char, c_int, c_uint};
use std::marker::{PhantomData, PhantomPinned};

/// Opaque solver state owned by the library.
#[repr(C)]
pub struct RawSolver {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Status codes returned by `solve`.
pub const STATUS_UNKNOWN: c_int = 0;
pub const STATUS_SAT: c_int = 10;
pub const STATUS_UNSAT: c_int = 20;

pub type InitFn = unsafe extern "C" fn() -> *mut RawSolver;
pub type ReleaseFn = unsafe extern "C" fn(*mut RawSolver);
pub type AddFn = unsafe extern "C" fn(*mut RawSolver, c_int);
pub type SolveFn = unsafe extern "C" fn(*mut RawSolver) -> c_int;
pub type ValueFn = unsafe extern "C" fn(*mut RawSolver, c_int) -> c_int;
pub type SignatureFn = unsafe extern "C" fn() -> *const c_char;
pub type SetOptionFn = unsafe extern "C" fn(*mut RawSolver, *const c_char, c_int) -> c_int;
pub type SetLimitFn = unsafe extern "C" fn(*mut RawSolver, c_uint);

pub mod symbols {
    pub const INIT: &str = "kissat_init";
    pub const RELEASE: &str = "kissat_release";
    pub const ADD: &str = "kissat_add";
    pub const SOLVE: &str = "kissat_solve";
    pub const VALUE: &str = "kissat_value";
    pub const SIGNATURE: &str = "kissat_signature";
    pub const SET_OPTION: &str = "kissat_set_option";
    pub const SET_CONFLICT_LIMIT: &str = "kissat_set_conflict_limit";
    pub const SET_DECISION_LIMIT: &str = "kissat_set_decision_limit";
}

#[derive(Clone, Copy)]
pub struct KissatApi {
    pub init: InitFn,
    pub release: ReleaseFn,
    pub add: AddFn,
    pub solve: SolveFn,
    pub value: ValueFn,
    pub signature: Option<SignatureFn>,
    pub set_option: Option<SetOptionFn>,
    pub set_conflict_limit: Option<SetLimitFn>,
    pub set_decision_limit: Option<SetLimitFn>,
}

impl std::fmt::Debug for KissatApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KissatApi")
            .field("signature", &self.signature.is_some())
            .field("set_option", &self.set_option.is_some())
            .field("set_conflict_limit", &self.set_conflict_limit.is_some())
            .field("set_decision_limit", &self.set_decision_limit.is_some())
            .finish_non_exhaustive()
    }
}
