//! `numlab`: command-line front end for the numerical lab.
//!
//! Every subcommand prints a human-readable report; set `RUST_LOG=debug`
//! to see pivot choices and iteration estimates from the library crates.

mod report;
mod systems;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use numlab::core::precision::{
    machine_epsilon, sqrt1p_minus_one, sqrt1p_minus_one_naive, x_minus_sin,
};
use numlab::interp::CubicSpline;
use numlab::linalg::{
    factorize_scaled, gauss_naive_solve, solve_batch, solve_scaled_with_decomposition,
};
use numlab::pde::{solve_heat, HeatConfig};
use numlab::roots::{bisection, newton, secant, RootConfig};

use crate::report::{failure, labeled_matrix, labeled_vector, section, subsection};
use crate::systems::LinearSystem;

#[derive(Parser)]
#[command(name = "numlab", version, about = "Gaussian elimination and friends")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve linear systems with naive and scaled-pivoting elimination
    Gauss {
        /// JSON file with one system or a list of `{ name, a, b }` objects
        #[arg(long)]
        system: Option<PathBuf>,
    },
    /// Compare both elimination paths on random diagonally dominant systems
    Random {
        #[arg(long, default_value_t = 6)]
        n: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Number of systems, solved in parallel
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Find sqrt(target) with Newton, secant and bisection
    Roots {
        #[arg(long, default_value_t = 2.0)]
        target: f64,
        #[arg(long, default_value_t = 1.0)]
        x0: f64,
        #[arg(long, default_value_t = 2.0)]
        x1: f64,
        #[arg(long, default_value_t = 0.0)]
        a: f64,
        #[arg(long, default_value_t = 2.0)]
        b: f64,
        #[arg(long)]
        delta: Option<f64>,
        #[arg(long)]
        epsilon: Option<f64>,
        #[arg(long)]
        max_iter: Option<usize>,
        /// JSON `RootConfig`; flags override its fields
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Interpolate sqrt(x) with a natural cubic spline
    Spline {
        #[arg(long, default_value_t = 1.5)]
        x: f64,
    },
    /// Explicit finite differences for the heat equation
    Heat {
        #[arg(long)]
        h: Option<f64>,
        #[arg(long)]
        k: Option<f64>,
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Machine epsilon and cancellation examples
    Precision,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Gauss { system } => run_gauss(&mut out, system.as_deref()),
        Command::Random { n, seed, count } => run_random(&mut out, n, seed, count),
        Command::Roots {
            target,
            x0,
            x1,
            a,
            b,
            delta,
            epsilon,
            max_iter,
            config,
        } => {
            let mut cfg = match config {
                Some(path) => read_json::<RootConfig>(&path)?,
                None => RootConfig::default(),
            };
            if let Some(d) = delta {
                cfg.delta = d;
            }
            if let Some(e) = epsilon {
                cfg.epsilon = e;
            }
            if let Some(m) = max_iter {
                cfg.max_iter = m;
            }
            run_roots(&mut out, target, (x0, x1), (a, b), &cfg)
        }
        Command::Spline { x } => run_spline(&mut out, x),
        Command::Heat { h, k, steps } => {
            let mut cfg = HeatConfig::default();
            if let Some(h) = h {
                cfg.h = h;
            }
            if let Some(k) = k {
                cfg.k = k;
            }
            if let Some(steps) = steps {
                cfg.steps = steps;
            }
            run_heat(&mut out, &cfg)
        }
        Command::Precision => run_precision(&mut out),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

// ─── Gaussian elimination ───────────────────────────────────────────────────

fn run_gauss<W: Write>(out: &mut W, path: Option<&Path>) -> Result<()> {
    let systems = match path {
        Some(p) => systems::load_systems(p)?,
        None => systems::lab_systems()?,
    };
    log::info!("solving {} system(s)", systems.len());
    for system in &systems {
        report_system(out, system)?;
    }
    Ok(())
}

fn report_system<W: Write>(out: &mut W, system: &LinearSystem) -> Result<()> {
    section(out, &system.name)?;
    labeled_matrix(out, "A", &system.a)?;
    labeled_vector(out, "b", &system.b)?;

    subsection(out, "Scaled partial pivoting")?;
    match factorize_scaled(&system.a) {
        Ok(fact) => {
            let perm: Vec<String> = fact
                .permutation()
                .as_slice()
                .iter()
                .map(|i| i.to_string())
                .collect();
            labeled_vector(out, "s", fact.scales())?;
            writeln!(out, "\np = [{}]", perm.join(", "))?;
            match solve_scaled_with_decomposition(&fact, &system.b) {
                Ok((x, lu)) => {
                    labeled_vector(out, "x", &x)?;
                    labeled_matrix(out, "L", &lu.l)?;
                    labeled_matrix(out, "U", &lu.u)?;
                    labeled_matrix(out, "P", &lu.p)?;
                    writeln!(out, "\nmax |Ax - b| = {:e}", system.a.residual_inf(&x, &system.b)?)?;
                }
                Err(e) => failure(out, &format!("scaled solve failed: {}", e))?,
            }
        }
        Err(e) => failure(out, &format!("scaled factorization failed: {}", e))?,
    }

    subsection(out, "Naive elimination")?;
    match gauss_naive_solve(&system.a, &system.b) {
        Ok(x) => {
            labeled_vector(out, "x", &x)?;
            writeln!(out, "\nmax |Ax - b| = {:e}", system.a.residual_inf(&x, &system.b)?)?;
        }
        Err(e) => failure(out, &format!("naive elimination failed: {}", e))?,
    }
    Ok(())
}

fn run_random<W: Write>(out: &mut W, n: usize, seed: Option<u64>, count: usize) -> Result<()> {
    anyhow::ensure!(n >= 1, "--n must be at least 1");
    let mut rng = systems::rng(seed);
    let generated = (0..count)
        .map(|_| systems::random_dominant(n, &mut rng))
        .collect::<Result<Vec<_>, _>>()?;

    if count == 1 {
        let system = &generated[0];
        report_system(out, system)?;
        return Ok(());
    }

    section(out, &format!("{} random {}x{} systems", count, n, n))?;
    let batch: Vec<_> = generated.iter().map(|s| (s.a.clone(), s.b.clone())).collect();
    for (i, (system, result)) in generated.iter().zip(solve_batch(&batch)).enumerate() {
        match result {
            Ok(x) => writeln!(
                out,
                "system {:>4}: max |Ax - b| = {:e}",
                i,
                system.a.residual_inf(&x, &system.b)?
            )?,
            Err(e) => failure(out, &format!("system {:>4}: {}", i, e))?,
        }
    }
    Ok(())
}

// ─── Root finding ───────────────────────────────────────────────────────────

fn run_roots<W: Write>(
    out: &mut W,
    target: f64,
    (x0, x1): (f64, f64),
    (a, b): (f64, f64),
    cfg: &RootConfig,
) -> Result<()> {
    let f = |x: f64| x * x - target;
    let df = |x: f64| 2.0 * x;

    section(out, &format!("Roots of x^2 - {}", target))?;
    writeln!(
        out,
        "delta = {:e}, epsilon = {:e}, max_iter = {}",
        cfg.delta, cfg.epsilon, cfg.max_iter
    )?;

    let outcomes = [
        ("Newton", newton(f, df, x0, cfg)),
        ("Secant", secant(f, x0, x1, cfg)),
        ("Bisection", bisection(f, a, b, cfg)),
    ];
    for (name, outcome) in outcomes {
        match outcome {
            Ok(root) => writeln!(
                out,
                "{:<10} x = {:.12}  after {:>3} iterations  f(x) = {:e}",
                name,
                root.x,
                root.iterations,
                f(root.x)
            )?,
            Err(e) => failure(out, &format!("{:<10} {}", name, e))?,
        }
    }
    Ok(())
}

// ─── Spline ─────────────────────────────────────────────────────────────────

fn run_spline<W: Write>(out: &mut W, x: f64) -> Result<()> {
    let t: Vec<f64> = (0..10).map(|i| i as f64 * 0.25).collect();
    let y: Vec<f64> = t.iter().map(|v| v.sqrt()).collect();
    let spline = CubicSpline::new(&t, &y)?;

    section(out, "Natural cubic spline through sqrt(x)")?;
    labeled_vector(out, "t", spline.knots())?;
    labeled_vector(out, "z", spline.second_derivatives())?;
    let s = spline.evaluate(x)?;
    writeln!(
        out,
        "\nS({}) = {:.10}, sqrt({}) = {:.10}, error = {:e}",
        x,
        s,
        x,
        x.sqrt(),
        (s - x.sqrt()).abs()
    )?;
    Ok(())
}

// ─── Heat equation ──────────────────────────────────────────────────────────

fn run_heat<W: Write>(out: &mut W, cfg: &HeatConfig) -> Result<()> {
    let sol = solve_heat::<f64>(cfg)?;

    section(out, "Heat equation u_t = u_xx")?;
    writeln!(
        out,
        "h = {}, k = {}, steps = {}, s = {:.6}, t = {:.6}",
        cfg.h, cfg.k, cfg.steps, sol.s, sol.t_final
    )?;
    if sol.s > 0.5 {
        failure(out, "s > 1/2: the explicit scheme is unstable")?;
    }
    writeln!(out, "\n{:>10} {:>14} {:>14} {:>12}", "x", "numeric", "exact", "error")?;
    for ((x, u), e) in sol.x.iter().zip(&sol.u_numeric).zip(&sol.u_exact) {
        writeln!(out, "{:>10.4} {:>14.8} {:>14.8} {:>12.3e}", x, u, e, (u - e).abs())?;
    }
    writeln!(out, "\nmax error = {:e}", sol.error_inf)?;
    Ok(())
}

// ─── Precision ──────────────────────────────────────────────────────────────

fn run_precision<W: Write>(out: &mut W) -> Result<()> {
    section(out, "Machine epsilon")?;
    let (eps32, k32) = machine_epsilon::<f32>();
    let (eps64, k64) = machine_epsilon::<f64>();
    writeln!(out, "f32: eps = {:e} after {} halvings", eps32, k32)?;
    writeln!(out, "f64: eps = {:e} after {} halvings", eps64, k64)?;

    section(out, "sqrt(x^2 + 1) - 1 for x = 8^-k")?;
    writeln!(out, "{:>4} {:>24} {:>24}", "k", "direct", "rewritten")?;
    for k in 0..16 {
        let x = 8f64.powi(-k);
        writeln!(
            out,
            "{:>4} {:>24e} {:>24e}",
            k,
            sqrt1p_minus_one_naive(x),
            sqrt1p_minus_one(x)
        )?;
    }

    section(out, "x - sin(x)")?;
    let xs: [f64; 4] = [1e-1, 1e-5, 1e-8, 1.0];
    for x in xs {
        writeln!(
            out,
            "x = {:e}: direct = {:e}, stable = {:e}",
            x,
            x - x.sin(),
            x_minus_sin(x)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_precision_report() {
        let text = render(|out| run_precision(out));
        assert!(text.contains("f64: eps = 2.220446049250313e-16 after 52 halvings"));
        assert!(text.contains("after 23 halvings"));

        // One row per k = 0..16
        let rows = text
            .lines()
            .filter(|l| l.split_whitespace().count() == 3)
            .filter(|l| l.split_whitespace().next().map_or(false, |k| k.parse::<u32>().is_ok()))
            .count();
        assert_eq!(rows, 16);

        assert!(text.contains("x = 1e-8: direct = "));
        assert!(text.contains("x = 1e0: direct = "));
    }

    #[test]
    fn test_gauss_report_shows_naive_failure() {
        let systems = systems::lab_systems().unwrap();
        let text = render(|out| report_system(out, &systems[1]));
        assert!(text.contains("p = [1, 0]"));
        assert!(text.contains("naive elimination failed"));
    }
}
