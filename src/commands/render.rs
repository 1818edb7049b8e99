//! Fixed-width text rendering for matrices, amplitude vectors, and
//! measurement histograms. Plain strings, no color codes, so snapshot
//! tests and piped output stay stable.
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

fn format_amp(z: C64) -> String {
    if z.im.abs() > 1e-12 {
        format!("{:>8.4}{:+.4}i", z.re, z.im)
    } else {
        format!("{:>8.4}", z.re)
    }
}

fn bits_for(len: usize) -> usize {
    (len.trailing_zeros() as usize).max(1)
}

pub fn render_matrix(m: &DMatrix<C64>) -> String {
    let mut out = String::new();
    for i in 0..m.nrows() {
        let row: Vec<String> = (0..m.ncols()).map(|j| format_amp(m[(i, j)])).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// One line per basis state: ket label, amplitude, probability.
pub fn render_amplitudes(v: &DVector<C64>) -> String {
    let width = bits_for(v.len());
    let mut out = String::new();
    for (idx, z) in v.iter().enumerate() {
        out.push_str(&format!(
            "  |{idx:0width$b}>  {}  {:.6}\n",
            format_amp(*z),
            z.norm_sqr(),
            idx = idx,
            width = width
        ));
    }
    out
}

/// One line per basis state with its probability; marked states get a
/// trailing `*`.
pub fn render_probabilities(probs: &[f64], marked: &[usize]) -> String {
    let width = bits_for(probs.len());
    let mut out = String::new();
    for (idx, &p) in probs.iter().enumerate() {
        let tag = if marked.contains(&idx) { "  *" } else { "" };
        out.push_str(&format!(
            "  |{idx:0width$b}>  {p:.6}{tag}\n",
            idx = idx,
            width = width,
            p = p,
            tag = tag
        ));
    }
    out
}

/// Measurement histogram scaled to a 40-column bar.
pub fn render_histogram(counts: &[usize]) -> String {
    let width = bits_for(counts.len());
    let max = counts.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::new();
    for (idx, &count) in counts.iter().enumerate() {
        out.push_str(&format!(
            "  |{idx:0width$b}>  {count:>6}  {bar}\n",
            idx = idx,
            width = width,
            count = count,
            bar = "#".repeat(count * 40 / max)
        ));
    }
    out
}
