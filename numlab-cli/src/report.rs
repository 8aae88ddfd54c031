use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use numlab::core::Matrix;

const RULE_WIDTH: usize = 70;

/// One row per line, fixed-width columns.
pub fn format_matrix(m: &Matrix<f64>) -> String {
    (0..m.nrows())
        .map(|i| {
            m.row(i)
                .iter()
                .map(|v| format!("{:>12.6}", v))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One entry per line.
pub fn format_vector(v: &[f64]) -> String {
    v.iter()
        .map(|x| format!("{:>12.6}", x))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Coloured title between two rules.
pub fn section<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    execute!(
        out,
        Print("\n"),
        SetForegroundColor(Color::Cyan),
        Print(format!("{}\n{}\n{}\n", rule, title, rule)),
        ResetColor,
    )
}

/// Dimmed sub-heading.
pub fn subsection<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    execute!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(format!("\n{}\n", title)),
        ResetColor,
    )
}

pub fn failure<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    execute!(
        out,
        SetForegroundColor(Color::Red),
        Print(format!("{}\n", message)),
        ResetColor,
    )
}

pub fn labeled_matrix<W: Write>(out: &mut W, label: &str, m: &Matrix<f64>) -> io::Result<()> {
    writeln!(out, "\n{} =\n{}", label, format_matrix(m))
}

pub fn labeled_vector<W: Write>(out: &mut W, label: &str, v: &[f64]) -> io::Result<()> {
    writeln!(out, "\n{} =\n{}", label, format_vector(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_matrix() {
        let m = Matrix::from_vec2d(&[vec![1.0, -2.5], vec![0.0, 3.0]]).unwrap();
        let text = format_matrix(&m);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "    1.000000     -2.500000");
        assert_eq!(lines[1], "    0.000000      3.000000");
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[2.0, 0.5]), "    2.000000\n    0.500000");
    }

    #[test]
    fn test_section_contains_title() {
        let mut buf = Vec::new();
        section(&mut buf, "Example").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Example"));
        assert!(text.contains(&"=".repeat(RULE_WIDTH)));
    }
}
