use std::ffi::CStr;
use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::builtin;
use crate::error::{Error, Result};
use crate::ffi::{symbols, KissatApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Path(PathBuf),
    /// Entry points compiled into this process.
    InProcess(&'static str),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Path(p) => write!(f, "{}", p.display()),
            Origin::InProcess(name) => f.write_str(name),
        }
    }
}

/// A loaded solver library and its resolved entry points.
///
/// Share it through `Arc`; each [`NativeSolver`](crate::solver::native::NativeSolver)
/// holds a clone so the code stays mapped while any handle is live.
pub struct Library {
    api: KissatApi,
    origin: Origin,
    // Keeps the shared object mapped; `api` points into it.
    _lib: Option<libloading::Library>,
}

impl Library {
    /// Platform file name of the kissat shared library, e.g. `libkissat.so`.
    pub fn default_path() -> PathBuf {
        libloading::library_filename("kissat").into()
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: loading runs the library's initialisers. The caller names a
        // solver library exposing the kissat C ABI.
        let lib = unsafe { libloading::Library::new(path) }.map_err(|source| Error::Load {
            path: path.to_path_buf(),
            source,
        })?;
        // SAFETY: the symbol types match the kissat C header.
        let api = unsafe {
            KissatApi {
                init: required(&lib, symbols::INIT)?,
                release: required(&lib, symbols::RELEASE)?,
                add: required(&lib, symbols::ADD)?,
                solve: required(&lib, symbols::SOLVE)?,
                value: required(&lib, symbols::VALUE)?,
                signature: optional(&lib, symbols::SIGNATURE),
                set_option: optional(&lib, symbols::SET_OPTION),
                set_conflict_limit: optional(&lib, symbols::SET_CONFLICT_LIMIT),
                set_decision_limit: optional(&lib, symbols::SET_DECISION_LIMIT),
            }
        };
        debug!("loaded solver library {} ({:?})", path.display(), api);
        Ok(Self {
            api,
            origin: Origin::Path(path.to_path_buf()),
            _lib: Some(lib),
        })
    }

    /// The in-process library implemented on top of varisat.
    pub fn builtin() -> Self {
        // SAFETY: the builtin table points at functions in this crate.
        unsafe { Self::from_api(builtin::API, Origin::InProcess("builtin")) }
    }

    /// Wraps an entry-point table that is not backed by a loaded file.
    ///
    /// # Safety
    ///
    /// Every pointer in `api` must stay valid for the program's lifetime and
    /// follow the kissat C ABI.
    pub unsafe fn from_api(api: KissatApi, origin: Origin) -> Self {
        Self {
            api,
            origin,
            _lib: None,
        }
    }

    pub fn api(&self) -> &KissatApi {
        &self.api
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn signature(&self) -> Option<String> {
        let f = self.api.signature?;
        // SAFETY: kissat_signature takes no arguments and returns a static string.
        let ptr = unsafe { f() };
        if ptr.is_null() {
            return None;
        }
        // SAFETY: non-null, NUL-terminated and static per the library contract.
        let text = unsafe { CStr::from_ptr(ptr) };
        Some(text.to_string_lossy().into_owned())
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("origin", &self.origin)
            .field("api", &self.api)
            .finish()
    }
}

unsafe fn required<T: Copy>(lib: &libloading::Library, name: &'static str) -> Result<T> {
    let sym = lib
        .get::<T>(name.as_bytes())
        .map_err(|source| Error::MissingSymbol { name, source })?;
    Ok(*sym)
}

unsafe fn optional<T: Copy>(lib: &libloading::Library, name: &'static str) -> Option<T> {
    match lib.get::<T>(name.as_bytes()) {
        Ok(sym) => Some(*sym),
        Err(_) => {
            debug!("optional symbol {name} not exported");
            None
        }
    }
}
