use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, Result};

use super::cnf::{Cnf, Lit};

pub fn parse_dimacs_str(src: &str) -> Result<Cnf> {
    parse_dimacs_reader(src.as_bytes())
}

/// Parses DIMACS CNF. Clauses may span lines; a line starting with `%`
/// ends the input.
pub fn parse_dimacs_reader<R: Read>(reader: R) -> Result<Cnf> {
    let reader = BufReader::new(reader);

    let mut header: Option<(u32, usize)> = None;
    let mut cnf = Cnf::new(0);
    let mut clause = Vec::new();
    let mut line_no = 0usize;

    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        let trimmed = line.trim_start();

        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }
        if trimmed.starts_with('p') {
            if header.is_some() {
                return Err(Error::dimacs(line_no, "duplicate 'p' line"));
            }
            let (vars, clauses) = parse_header(trimmed, line_no)?;
            header = Some((vars, clauses));
            cnf.num_vars = vars;
            continue;
        }

        let Some((num_vars, _)) = header else {
            return Err(Error::dimacs(line_no, "missing 'p' line before clauses"));
        };

        for token in trimmed.split_whitespace() {
            let value: i32 = token
                .parse()
                .map_err(|_| Error::dimacs(line_no, format!("invalid literal '{token}'")))?;
            if value == 0 {
                cnf.clauses.push(std::mem::take(&mut clause));
                continue;
            }
            let lit = Lit::from_dimacs(value)
                .map_err(|_| Error::dimacs(line_no, format!("invalid literal '{token}'")))?;
            if lit.var > num_vars {
                return Err(Error::dimacs(
                    line_no,
                    format!("variable {} exceeds declared maximum {}", lit.var, num_vars),
                ));
            }
            clause.push(lit);
        }
    }

    let Some((_, num_clauses)) = header else {
        return Err(Error::dimacs(line_no, "missing 'p' line"));
    };
    if !clause.is_empty() {
        return Err(Error::dimacs(line_no, "last clause is not terminated by 0"));
    }
    if cnf.clauses.len() != num_clauses {
        return Err(Error::dimacs(
            line_no,
            format!(
                "header declares {} clauses but {} were found",
                num_clauses,
                cnf.clauses.len()
            ),
        ));
    }
    Ok(cnf)
}

fn parse_header(line: &str, line_no: usize) -> Result<(u32, usize)> {
    let mut parts = line.split_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(Error::dimacs(line_no, "expected 'p cnf <vars> <clauses>'"));
    }
    let vars = parts
        .next()
        .and_then(|t| t.parse::<u32>().ok())
        .filter(|&v| v <= crate::lit::MAX_VAR)
        .ok_or_else(|| Error::dimacs(line_no, "invalid variable count"))?;
    let clauses = parts
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| Error::dimacs(line_no, "invalid clause count"))?;
    if parts.next().is_some() {
        return Err(Error::dimacs(line_no, "trailing tokens after header"));
    }
    Ok((vars, clauses))
}

pub fn to_dimacs(cnf: &Cnf) -> String {
    let mut out = String::new();
    out.push_str(&format!("p cnf {} {}\n", cnf.num_vars, cnf.clauses.len()));
    for clause in &cnf.clauses {
        for &lit in clause {
            out.push_str(&format!("{} ", lit.to_dimacs()));
        }
        out.push_str("0\n");
    }
    out
}
