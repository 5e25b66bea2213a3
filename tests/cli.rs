use std::io::Write;
use std::process::{Command, Output};

use kissat_handle::builtin::SIGNATURE;
use kissat_handle::cnf::cnf::{Cnf, Lit};
use kissat_handle::cnf::dimacs::to_dimacs;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kissat-handle"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("spawn kissat-handle")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn write_cnf(cnf: &Cnf) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(to_dimacs(cnf).as_bytes()).expect("write cnf");
    file
}

#[test]
fn demo_prints_comments_then_status() {
    let output = run(&["--backend", "builtin", "demo"]);
    assert_eq!(output.status.code(), Some(10));
    let lines = stdout_lines(&output);
    assert_eq!(
        lines,
        vec![
            "c Loaded solver library builtin.",
            "c Initialized solver.",
            "c Added some clauses.",
            "s SATISFIABLE",
        ]
    );
}

#[test]
fn demo_on_varisat_backend() {
    let output = run(&["--backend", "varisat", "demo"]);
    assert_eq!(output.status.code(), Some(10));
    assert!(stdout_lines(&output).contains(&"s SATISFIABLE".to_string()));
}

#[test]
fn solve_unsat_file_exits_20() {
    let mut cnf = Cnf::new(1);
    cnf.add_clause(vec![Lit::pos(1)]);
    cnf.add_clause(vec![Lit::neg_of(1)]);
    let file = write_cnf(&cnf);
    let path = file.path().to_str().expect("utf8 path");

    let output = run(&["--backend", "builtin", "solve", path]);
    assert_eq!(output.status.code(), Some(20));
    let lines = stdout_lines(&output);
    assert!(lines.contains(&"s UNSATISFIABLE".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("v ")));
}

#[test]
fn solve_sat_file_prints_verified_model() {
    let mut cnf = Cnf::new(3);
    cnf.add_clause(vec![Lit::pos(1)]);
    cnf.add_clause(vec![Lit::neg_of(1), Lit::neg_of(2)]);
    cnf.add_clause(vec![Lit::pos(2), Lit::pos(3)]);
    let file = write_cnf(&cnf);
    let path = file.path().to_str().expect("utf8 path");

    let output = run(&["--backend", "builtin", "solve", "--verify", path]);
    assert_eq!(output.status.code(), Some(10));
    let lines = stdout_lines(&output);
    assert!(lines.contains(&"s SATISFIABLE".to_string()));
    assert!(lines.contains(&"v 1 -2 3 0".to_string()), "{lines:?}");
}

#[test]
fn no_model_suppresses_value_lines() {
    let mut cnf = Cnf::new(2);
    cnf.add_clause(vec![Lit::pos(1), Lit::pos(2)]);
    let file = write_cnf(&cnf);
    let path = file.path().to_str().expect("utf8 path");

    let output = run(&["--backend", "varisat", "solve", "--no-model", path]);
    assert_eq!(output.status.code(), Some(10));
    assert!(!stdout_lines(&output).iter().any(|l| l.starts_with("v ")));
}

#[test]
fn unsupported_options_are_ignored_with_a_warning() {
    let mut cnf = Cnf::new(1);
    cnf.add_clause(vec![Lit::pos(1)]);
    let file = write_cnf(&cnf);
    let path = file.path().to_str().expect("utf8 path");

    let output = run(&[
        "--backend",
        "builtin",
        "solve",
        "--option",
        "seed=3",
        "--conflicts",
        "10",
        path,
    ]);
    assert_eq!(output.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("set_option"), "{stderr}");
}

#[test]
fn malformed_dimacs_fails() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(b"p cnf 1 1\n2 0\n").expect("write");
    let path = file.path().to_str().expect("utf8 path");

    let output = run(&["--backend", "builtin", "solve", path]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("variable 2 exceeds declared maximum 1"), "{stderr}");
}

#[test]
fn missing_library_is_fatal() {
    let output = run(&["--library", "/nonexistent/libkissat.so", "demo"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/libkissat.so"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn builtin_signature() {
    let output = run(&["--backend", "builtin", "signature"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec![SIGNATURE.to_string()]);
}

#[test]
fn huge_variable_on_varisat_backend_fails_cleanly() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(b"p cnf 2147483647 1\n2000000000 0\n").expect("write");
    let path = file.path().to_str().expect("utf8 path");

    let output = run(&["--backend", "varisat", "solve", path]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid literal 2000000000"), "{stderr}");
}
