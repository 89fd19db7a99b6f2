//! # NorSand CPT CLI
//!
//! Terminal front end for the NorSand CPT resistance calculator. Collects two
//! parameter cases (from a session file or interactively), prints a summary
//! and emits the chart as Plotly figure JSON.
//!
//! ```text
//! cpt_cli [SESSION.json] [--out CHART.json] [--save SESSION.json] [--equations]
//! ```
//!
//! Set `RUST_LOG=debug` to see the computed coefficients.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use log::info;

use cpt_core::calculations::ResistanceCurve;
use cpt_core::equations::{generate_equations_markdown, ALL_EQUATIONS};
use cpt_core::{load_session, save_chart, save_session, CaseId, CalcError, ParameterField, ParameterSet, Session};

const USAGE: &str = "Usage: cpt_cli [SESSION.json] [--out CHART.json] [--save SESSION.json] [--equations]";

/// Parsed command line options
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    session: Option<PathBuf>,
    out: Option<PathBuf>,
    save: Option<PathBuf>,
    equations: bool,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let path = args.next().ok_or("--out requires a path")?;
                parsed.out = Some(PathBuf::from(path));
            }
            "--save" | "-s" => {
                let path = args.next().ok_or("--save requires a path")?;
                parsed.save = Some(PathBuf::from(path));
            }
            "--equations" => parsed.equations = true,
            "--help" | "-h" => parsed.help = true,
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
            path => {
                if parsed.session.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                parsed.session = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

/// Prompt for one field until the value is valid. Empty input or EOF keeps the default.
fn prompt_field<R: BufRead, W: Write>(input: &mut R, output: &mut W, field: ParameterField, default: f64) -> f64 {
    loop {
        let _ = write!(output, "  {:<8} [{}]: ", field.label(), default);
        if output.flush().is_err() {
            return default;
        }

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return default,
            Ok(_) => {}
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return default;
        }

        match trimmed.parse::<f64>() {
            Ok(value) => match field.check(value) {
                Ok(()) => return value,
                Err(e) => {
                    let _ = writeln!(output, "  {}", e);
                }
            },
            Err(_) => {
                let _ = writeln!(output, "  '{}' is not a number", trimmed);
            }
        }
    }
}

/// Build a session by prompting for every field of both cases.
fn prompt_session<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Session, CalcError> {
    let mut session = Session::new("Interactive");

    for case in CaseId::ALL {
        let _ = writeln!(output, "NorSand parameters: {}", case.label());
        let mut params = ParameterSet::default();
        for field in ParameterField::ALL {
            let value = prompt_field(input, output, field, params.get(field));
            params = params.with(field, value)?;
        }
        session.set_case(case, params);
        let _ = writeln!(output);
    }

    Ok(session)
}

/// Format six correlation factors numbered from `first`.
fn factor_line(first: usize, factors: &[f64; 6]) -> String {
    factors
        .iter()
        .enumerate()
        .map(|(i, f)| format!("f{} = {:.4}", first + i, f))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Text summary of both curves.
fn render_summary(session: &Session, curves: &[&ResistanceCurve]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "═══════════════════════════════════════════════════");
    let _ = writeln!(out, "  NORSAND CPT RESISTANCE");
    let _ = writeln!(out, "═══════════════════════════════════════════════════");

    for (case, curve) in CaseId::ALL.iter().zip(curves) {
        let params = session.case(*case);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", curve.label);
        let _ = writeln!(
            out,
            "  G = {} MPa, M = {}, N = {}, H = {}, λ = {}, ν = {}, p = {} kPa",
            params.g_mpa(),
            params.m(),
            params.n(),
            params.h(),
            params.lambda(),
            params.nu(),
            params.p_kpa()
        );
        let _ = writeln!(out, "  G/p = {:.1}", curve.factors.rigidity_ratio);
        let _ = writeln!(out, "  {}", factor_line(1, &curve.factors.k_factors));
        let _ = writeln!(out, "  {}", factor_line(7, &curve.factors.m_factors));
        let _ = writeln!(out, "  k = {:.3}   m = {:.3}", curve.k, curve.m);
        let _ = writeln!(
            out,
            "  Q(ψ=-0.3) = {:.1}   Q(ψ=0) = {:.1}   Q(ψ=0.3) = {:.2}",
            curve.resistance_at(-0.3),
            curve.resistance_at(0.0),
            curve.resistance_at(0.3)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Equations:");
    for equation in ALL_EQUATIONS {
        let _ = writeln!(out, "  {}", equation.metadata().formula_plain);
    }

    out
}

fn run(args: CliArgs) -> Result<(), CalcError> {
    let session = match &args.session {
        Some(path) => {
            info!("loading session from {}", path.display());
            load_session(path)?
        }
        None => {
            // Prompts go to stderr so stdout carries only the chart JSON
            eprintln!("NorSand CPT inversion - Jefferies & Been (2015)");
            eprintln!("Press Enter to keep the value in brackets.");
            eprintln!();
            let stdin = io::stdin();
            prompt_session(&mut stdin.lock(), &mut io::stderr())?
        }
    };

    let rendering = session.render_with_curves()?;

    eprintln!("{}", render_summary(&session, &[&rendering.case1, &rendering.case2]));

    if let Some(path) = &args.save {
        save_session(&session, path)?;
        eprintln!("Session saved to {}", path.display());
    }

    match &args.out {
        Some(path) => {
            save_chart(&rendering.chart, path)?;
            eprintln!("Chart written to {}", path.display());
        }
        None => println!("{}", rendering.chart.to_json_pretty()?),
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    if args.equations {
        println!("{}", generate_equations_markdown());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}
