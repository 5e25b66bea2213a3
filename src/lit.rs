use std::fmt;

use crate::error::{Error, Result};

/// Largest variable index representable in the 32-bit DIMACS encoding.
pub const MAX_VAR: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        debug_assert!(var != 0 && var <= MAX_VAR, "variable {var} out of range");
        Self { var, sign }
    }

    pub fn pos(var: u32) -> Self {
        Self::new(var, true)
    }

    pub fn neg_of(var: u32) -> Self {
        Self::new(var, false)
    }

    pub fn neg(self) -> Self {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }

    /// Decodes a signed DIMACS integer. 0 and `i32::MIN` are not literals.
    pub fn from_dimacs(value: i32) -> Result<Self> {
        if value == 0 || value == i32::MIN {
            return Err(Error::InvalidLiteral(value.into()));
        }
        Ok(Self {
            var: value.unsigned_abs(),
            sign: value > 0,
        })
    }

    pub fn to_dimacs(self) -> i32 {
        let v = self.var as i32;
        if self.sign { v } else { -v }
    }
}

impl TryFrom<i32> for Lit {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::from_dimacs(value)
    }
}

impl From<Lit> for i32 {
    fn from(lit: Lit) -> Self {
        lit.to_dimacs()
    }
}

impl std::ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        self.neg()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}
