use log::warn;

use crate::error::{Error, Result};
use crate::solver::IncrementalSolver;

/// Per-run settings applied to a fresh solver before any clause is added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveConfig {
    pub options: Vec<(String, i32)>,
    pub conflict_limit: Option<u32>,
    pub decision_limit: Option<u32>,
    pub print_model: bool,
    pub verify: bool,
}

impl SolveConfig {
    /// Applies options and limits. Settings the backend does not support
    /// are skipped with a warning.
    pub fn apply<S: IncrementalSolver + ?Sized>(&self, solver: &mut S) -> Result<()> {
        let backend = solver.backend_name().to_string();
        for (name, value) in &self.options {
            skip_unsupported(&backend, solver.set_option(name, *value).map(drop))?;
        }
        if let Some(limit) = self.conflict_limit {
            skip_unsupported(&backend, solver.set_conflict_limit(limit))?;
        }
        if let Some(limit) = self.decision_limit {
            skip_unsupported(&backend, solver.set_decision_limit(limit))?;
        }
        Ok(())
    }
}

fn skip_unsupported(backend: &str, res: Result<()>) -> Result<()> {
    match res {
        Err(Error::Unsupported(what)) => {
            warn!("{backend} backend does not support {what}, setting ignored");
            Ok(())
        }
        other => other,
    }
}

/// Parses `name=value`; a bare `name` means `name=1` and `no-name` means
/// `name=0`. A leading `--` is accepted.
pub fn parse_option(arg: &str) -> std::result::Result<(String, i32), String> {
    let arg = arg.strip_prefix("--").unwrap_or(arg);
    let (name, value) = match arg.split_once('=') {
        Some((name, raw)) => {
            let value = match raw {
                "true" => 1,
                "false" => 0,
                _ => raw
                    .parse::<i32>()
                    .map_err(|_| format!("invalid value '{raw}' for option '{name}'"))?,
            };
            (name, value)
        }
        None => match arg.strip_prefix("no-") {
            Some(name) => (name, 0),
            None => (arg, 1),
        },
    };
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(format!("invalid option name '{name}'"));
    }
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_syntax() {
        assert_eq!(parse_option("seed=7"), Ok(("seed".to_string(), 7)));
        assert_eq!(parse_option("--quiet"), Ok(("quiet".to_string(), 1)));
        assert_eq!(parse_option("no-restart"), Ok(("restart".to_string(), 0)));
        assert_eq!(parse_option("walk=false"), Ok(("walk".to_string(), 0)));
        assert_eq!(parse_option("tier1=-2"), Ok(("tier1".to_string(), -2)));
        assert!(parse_option("seed=x").is_err());
        assert!(parse_option("=3").is_err());
    }
}
