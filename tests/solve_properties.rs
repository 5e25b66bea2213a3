use std::sync::Arc;

use proptest::prelude::*;

use kissat_handle::cnf::cnf::{Cnf, Lit};
use kissat_handle::cnf::dimacs::parse_dimacs_str;
use kissat_handle::config::SolveConfig;
use kissat_handle::error::Error;
use kissat_handle::library::Library;
use kissat_handle::session::solve_cnf;
use kissat_handle::solver::native::NativeSolver;
use kissat_handle::solver::varisat::{max_var, VarisatSolver};
use kissat_handle::solver::{IncrementalSolver, SolveResult};

const MAX_VARS: u32 = 6;

fn lit_strategy() -> impl Strategy<Value = Lit> {
    (1..=MAX_VARS, any::<bool>()).prop_map(|(var, sign)| Lit::new(var, sign))
}

fn cnf_strategy() -> impl Strategy<Value = Cnf> {
    prop::collection::vec(prop::collection::vec(lit_strategy(), 1..=3), 0..16).prop_map(
        |clauses| {
            let mut cnf = Cnf::new(MAX_VARS);
            for clause in clauses {
                cnf.add_clause(clause);
            }
            cnf
        },
    )
}

fn brute_force(cnf: &Cnf) -> SolveResult {
    let n = cnf.num_vars as usize;
    for bits in 0u32..(1 << n) {
        let mut assignment = vec![None];
        assignment.extend((0..n).map(|i| Some(bits & (1 << i) != 0)));
        if cnf.eval_formula_partial(&assignment) == Some(true) {
            return SolveResult::Sat;
        }
    }
    SolveResult::Unsat
}

fn check_config() -> SolveConfig {
    SolveConfig {
        print_model: true,
        verify: true,
        ..SolveConfig::default()
    }
}

proptest! {
    #[test]
    fn native_handle_agrees_with_brute_force(cnf in cnf_strategy()) {
        let expected = brute_force(&cnf);
        let mut solver = NativeSolver::new(Arc::new(Library::builtin())).expect("init");
        let outcome = solve_cnf(&mut solver, &cnf, &check_config()).expect("solve");
        prop_assert_eq!(outcome.result, expected);
        prop_assert_eq!(outcome.model.is_some(), expected == SolveResult::Sat);
        prop_assert_eq!(outcome.stats.clauses, cnf.clauses.len());
    }

    #[test]
    fn varisat_backend_agrees_with_brute_force(cnf in cnf_strategy()) {
        let expected = brute_force(&cnf);
        let mut solver = VarisatSolver::new();
        let outcome = solve_cnf(&mut solver, &cnf, &check_config()).expect("solve");
        prop_assert_eq!(outcome.result, expected);
    }

    #[test]
    fn model_values_are_stable(cnf in cnf_strategy()) {
        let mut solver = NativeSolver::new(Arc::new(Library::builtin())).expect("init");
        cnf.feed(&mut solver).expect("feed");
        if solver.solve().expect("solve") == SolveResult::Sat {
            let first = solver.model(cnf.num_vars).expect("model");
            let second = solver.model(cnf.num_vars).expect("model");
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(cnf.first_falsified(&first), None);
        }
    }
}

#[test]
fn varisat_backend_is_incremental() {
    let mut solver = VarisatSolver::new();
    solver.add_clause(&[Lit::pos(1), Lit::pos(2)]).expect("add");
    assert_eq!(solver.solve().expect("solve"), SolveResult::Sat);
    solver.add_clause(&[Lit::neg_of(1)]).expect("add");
    assert!(solver.value(1).is_err());
    assert_eq!(solver.solve().expect("solve"), SolveResult::Sat);
    assert_eq!(solver.value(2).expect("value"), Some(true));
    solver.add_clause(&[Lit::neg_of(2)]).expect("add");
    assert_eq!(solver.solve().expect("solve"), SolveResult::Unsat);
    assert_eq!(solver.stats().solve_calls, 3);
    assert_eq!(solver.backend_name(), "varisat");
}

#[test]
fn varisat_backend_rejects_variables_past_its_limit() {
    let limit = i32::try_from(max_var()).expect("limit fits i32");
    let mut solver = VarisatSolver::new();
    for lit in [limit + 1, -(limit + 1), i32::MAX, -i32::MAX, i32::MIN] {
        assert!(
            matches!(solver.add(lit), Err(Error::InvalidLiteral(v)) if v == i64::from(lit)),
            "{lit}"
        );
    }
    assert_eq!(solver.stats().literals, 0);
    solver.add_clause(&[Lit::pos(1)]).expect("small var still accepted");
    assert_eq!(solver.solve().expect("solve"), SolveResult::Sat);
}

#[test]
fn huge_dimacs_variable_is_an_error_not_a_panic() {
    let cnf = parse_dimacs_str("p cnf 2147483647 1\n2000000000 0\n").expect("parse");
    let mut solver = VarisatSolver::new();
    assert!(matches!(
        cnf.feed(&mut solver),
        Err(Error::InvalidLiteral(2_000_000_000))
    ));
}
