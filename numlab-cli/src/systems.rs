use std::fs;
use std::path::Path;

use anyhow::Context;
use numlab::core::{Matrix, SolverResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// A named system `A x = b`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearSystem {
    #[serde(default = "unnamed")]
    pub name: String,
    pub a: Matrix<f64>,
    pub b: Vec<f64>,
}

fn unnamed() -> String {
    "unnamed system".to_string()
}

/// A system file holds one system or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum SystemFile {
    One(LinearSystem),
    Many(Vec<LinearSystem>),
}

impl LinearSystem {
    fn from_rows(name: &str, a: &[Vec<f64>], b: &[f64]) -> SolverResult<Self> {
        Ok(LinearSystem {
            name: name.to_string(),
            a: Matrix::from_vec2d(a)?,
            b: b.to_vec(),
        })
    }
}

/// The five systems the elimination report walks through by default.
pub fn lab_systems() -> SolverResult<Vec<LinearSystem>> {
    Ok(vec![
        LinearSystem::from_rows(
            "Example 1: well-conditioned",
            &[vec![2.0, 3.0, -6.0], vec![1.0, -6.0, 8.0], vec![3.0, -2.0, 1.0]],
            &[7.0, 14.0, 28.0],
        )?,
        LinearSystem::from_rows(
            "Example 2: zero on the diagonal",
            &[vec![0.0, 1.0], vec![1.0, 1.0]],
            &[1.0, 2.0],
        )?,
        LinearSystem::from_rows(
            "Example 3: tiny leading pivot",
            &[vec![1e-12, 1.0], vec![1.0, 1.0]],
            &[1.0, 2.0],
        )?,
        LinearSystem::from_rows(
            "Example 4: regular 3x3 system",
            &[vec![4.0, -2.0, 1.0], vec![1.0, 6.0, -2.0], vec![3.0, 1.0, 5.0]],
            &[1.0, 2.0, 3.0],
        )?,
        LinearSystem::from_rows(
            "Example 5: ill-conditioned",
            &[vec![1.0, 1.0, 1.0], vec![1.0, 1.0001, 1.0], vec![1.0, 1.0, 1.0002]],
            &[3.0, 3.0001, 3.0002],
        )?,
    ])
}

/// Read one system or a list of systems from a JSON file.
pub fn load_systems(path: &Path) -> anyhow::Result<Vec<LinearSystem>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading system file {}", path.display()))?;
    let file: SystemFile = serde_json::from_str(&json)
        .with_context(|| format!("parsing system file {}", path.display()))?;
    Ok(match file {
        SystemFile::One(system) => vec![system],
        SystemFile::Many(systems) => systems,
    })
}

/// Seeded random generator, or entropy-seeded when no seed is given.
pub fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Random strictly diagonally dominant n×n system.
pub fn random_dominant(n: usize, rng: &mut StdRng) -> SolverResult<LinearSystem> {
    let mut data: Vec<f64> = (0..n * n).map(|_| rng.gen_range(-10.0..10.0)).collect();
    for i in 0..n {
        let off: f64 = (0..n)
            .filter(|&j| j != i)
            .map(|j| data[i * n + j].abs())
            .sum();
        let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
        data[i * n + i] = sign * (off + 1.0);
    }
    let b: Vec<f64> = (0..n).map(|_| rng.gen_range(-100.0..100.0)).collect();
    Ok(LinearSystem {
        name: format!("random {}x{}", n, n),
        a: Matrix::new(data, n, n)?,
        b,
    })
}
