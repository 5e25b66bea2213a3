use std::io::{self, Write};

use crate::session::Outcome;
use crate::solver::SolveResult;

const MAX_LINE: usize = 78;

pub fn status_line(result: SolveResult) -> &'static str {
    match result {
        SolveResult::Sat => "s SATISFIABLE",
        SolveResult::Unsat => "s UNSATISFIABLE",
        SolveResult::Unknown => "s UNKNOWN",
    }
}

/// Process exit code for a result: 10, 20 or 0.
pub fn exit_code(result: SolveResult) -> i32 {
    result.code()
}

/// `v` lines for variables `1..model.len()`, closed by a final `0`.
/// Unassigned variables are printed as false.
pub fn model_lines(model: &[Option<bool>]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::from("v");
    let values = model
        .iter()
        .enumerate()
        .skip(1)
        .map(|(var, v)| if v.unwrap_or(false) { var as i64 } else { -(var as i64) })
        .chain(std::iter::once(0));
    for value in values {
        let token = value.to_string();
        if line.len() + 1 + token.len() > MAX_LINE {
            lines.push(std::mem::replace(&mut line, String::from("v")));
        }
        line.push(' ');
        line.push_str(&token);
    }
    lines.push(line);
    lines
}

pub fn comment<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    if text.is_empty() {
        writeln!(out, "c")
    } else {
        writeln!(out, "c {text}")
    }
}

pub fn write_outcome<W: Write>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    comment(
        out,
        &format!(
            "solved in {:.3} s ({} clauses, {} literals, max variable {})",
            outcome.elapsed.as_secs_f64(),
            outcome.stats.clauses,
            outcome.stats.literals,
            outcome.stats.max_var
        ),
    )?;
    writeln!(out, "{}", status_line(outcome.result))?;
    if let Some(model) = &outcome.model {
        for line in model_lines(model) {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}
