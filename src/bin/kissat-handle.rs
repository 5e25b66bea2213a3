use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use kissat_handle::cnf::dimacs::parse_dimacs_reader;
use kissat_handle::config::{SolveConfig, parse_option};
use kissat_handle::library::Library;
use kissat_handle::report::{comment, exit_code, status_line, write_outcome};
use kissat_handle::session::solve_cnf;
use kissat_handle::solver::native::NativeSolver;
use kissat_handle::solver::varisat::VarisatSolver;
use kissat_handle::solver::IncrementalSolver;

#[derive(Debug, Parser)]
#[command(name = "kissat-handle")]
#[command(about = "Drive a native SAT solver library through its C ABI")]
struct Cli {
    /// Shared library to load for the native backend.
    #[arg(long, global = true)]
    library: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Backend::Native, global = true)]
    backend: Backend,
    /// Raise log verbosity on stderr (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Shared library loaded from --library.
    Native,
    /// The same C ABI implemented in-process over varisat.
    Builtin,
    /// Pure Rust varisat, no FFI.
    Varisat,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Add the clause (1 or 2), solve and print the status.
    Demo,
    /// Solve a DIMACS CNF file ('-' reads stdin).
    Solve {
        path: String,
        /// Solver option as name=value (repeatable).
        #[arg(long = "option", value_parser = parse_option)]
        options: Vec<(String, i32)>,
        #[arg(long)]
        conflicts: Option<u32>,
        #[arg(long)]
        decisions: Option<u32>,
        #[arg(long)]
        no_model: bool,
        /// Check the model against every clause before printing it.
        #[arg(long)]
        verify: bool,
    },
    /// Print the library signature.
    Signature,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let code = match &cli.command {
        Cmd::Demo => demo_cmd(&cli)?,
        Cmd::Solve {
            path,
            options,
            conflicts,
            decisions,
            no_model,
            verify,
        } => {
            let config = SolveConfig {
                options: options.clone(),
                conflict_limit: *conflicts,
                decision_limit: *decisions,
                print_model: !no_model,
                verify: *verify,
            };
            solve_cmd(&cli, path, &config)?
        }
        Cmd::Signature => signature_cmd(&cli)?,
    };
    Ok(ExitCode::from(code))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_library(cli: &Cli) -> Result<Arc<Library>> {
    let library = match cli.backend {
        Backend::Builtin => Library::builtin(),
        _ => {
            let path = cli.library.clone().unwrap_or_else(Library::default_path);
            Library::open(&path)
                .with_context(|| format!("cannot use solver library {}", path.display()))?
        }
    };
    Ok(Arc::new(library))
}

fn open_solver(cli: &Cli) -> Result<Box<dyn IncrementalSolver>> {
    if cli.backend == Backend::Varisat {
        return Ok(Box::new(VarisatSolver::new()));
    }
    let library = load_library(cli)?;
    let solver = NativeSolver::new(library).context("solver initialisation failed")?;
    Ok(Box::new(solver))
}

fn demo_cmd(cli: &Cli) -> Result<u8> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut solver: Box<dyn IncrementalSolver> = if cli.backend == Backend::Varisat {
        comment(&mut out, "Using varisat backend without a library.")?;
        Box::new(VarisatSolver::new())
    } else {
        let library = load_library(cli)?;
        comment(&mut out, &format!("Loaded solver library {}.", library.origin()))?;
        out.flush()?;
        Box::new(NativeSolver::new(library).context("solver initialisation failed")?)
    };
    comment(&mut out, "Initialized solver.")?;

    solver.add(1)?;
    solver.add(2)?;
    solver.add(0)?;
    comment(&mut out, "Added some clauses.")?;

    let result = solver.solve()?;
    writeln!(out, "{}", status_line(result))?;
    Ok(exit_byte(exit_code(result)))
}

fn solve_cmd(cli: &Cli, path: &str, config: &SolveConfig) -> Result<u8> {
    let cnf = if path == "-" {
        parse_dimacs_reader(io::stdin().lock()).context("failed to parse stdin")?
    } else {
        let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
        parse_dimacs_reader(file).with_context(|| format!("failed to parse {path}"))?
    };
    info!("parsed {} variables and {} clauses", cnf.num_vars, cnf.clauses.len());

    let mut out = BufWriter::new(io::stdout().lock());
    comment(
        &mut out,
        &format!(
            "parsed 'p cnf {} {}' from {}",
            cnf.num_vars,
            cnf.clauses.len(),
            path
        ),
    )?;

    let mut solver = open_solver(cli)?;
    comment(&mut out, &format!("backend {}", solver.backend_name()))?;
    let outcome = solve_cnf(&mut solver, &cnf, config)?;
    write_outcome(&mut out, &outcome)?;
    out.flush()?;
    Ok(exit_byte(exit_code(outcome.result)))
}

fn signature_cmd(cli: &Cli) -> Result<u8> {
    let signature = match cli.backend {
        Backend::Varisat => "varisat".to_string(),
        _ => load_library(cli)?
            .signature()
            .unwrap_or_else(|| "unknown".to_string()),
    };
    println!("{signature}");
    Ok(0)
}

fn exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
