use std::cmp::Ordering;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::function::erf::erfc;

/// A correlation coefficient with its two-sided p-value.
///
/// Degenerate input (fewer than two pairs, unequal lengths, NaN values or a
/// constant sample) yields NaN for both fields rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub coefficient: f64,
    pub p_value: f64,
    pub n: usize,
}

impl CorrelationResult {
    pub fn undefined(n: usize) -> Self {
        Self {
            coefficient: f64::NAN,
            p_value: f64::NAN,
            n,
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.coefficient.is_nan()
    }
}

/// 1-based ranks, ties get the average of the ranks they span.
pub fn rankdata(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

pub fn pearson(x: &[f64], y: &[f64]) -> CorrelationResult {
    let n = x.len();
    if !usable(x, y) {
        return CorrelationResult::undefined(n);
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return CorrelationResult::undefined(n);
    }

    let r = (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);
    CorrelationResult {
        coefficient: r,
        p_value: t_test_p_value(r, n),
        n,
    }
}

/// Spearman's rho: Pearson correlation of the average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> CorrelationResult {
    if !usable(x, y) {
        return CorrelationResult::undefined(x.len());
    }
    pearson(&rankdata(x), &rankdata(y))
}

/// Kendall's tau-b.
///
/// Without ties and for at most 33 pairs (or one discordant pair at most) the
/// p-value is exact; otherwise it comes from the tie-corrected asymptotic
/// normal approximation.
pub fn kendall_tau(x: &[f64], y: &[f64]) -> CorrelationResult {
    let n = x.len();
    if !usable(x, y) {
        return CorrelationResult::undefined(n);
    }

    let mut concordant: u64 = 0;
    let mut discordant: u64 = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            match sign(compare(x[i], x[j])) * sign(compare(y[i], y[j])) {
                1 => concordant += 1,
                -1 => discordant += 1,
                _ => {}
            }
        }
    }
    let con_minus_dis = concordant as f64 - discordant as f64;

    let x_ties = TieCounts::of(x);
    let y_ties = TieCounts::of(y);

    let total = (n * (n - 1) / 2) as f64;
    let denom = ((total - x_ties.pairs) * (total - y_ties.pairs)).sqrt();
    if denom == 0.0 {
        return CorrelationResult::undefined(n);
    }
    let tau = (con_minus_dis / denom).clamp(-1.0, 1.0);

    let no_ties = x_ties.pairs == 0.0 && y_ties.pairs == 0.0;
    let p_value = if no_ties && (n <= EXACT_KENDALL_MAX_N || discordant.min(concordant) <= 1) {
        kendall_exact_p_value(n, discordant.min(concordant))
    } else {
        kendall_normal_p_value(n, con_minus_dis, &x_ties, &y_ties)
    };

    CorrelationResult {
        coefficient: tau,
        p_value,
        n,
    }
}

const EXACT_KENDALL_MAX_N: usize = 33;

/// Two-sided permutation p-value: the share of orderings of `n` items with
/// at most `c` inversions, doubled.
fn kendall_exact_p_value(n: usize, c: u64) -> f64 {
    let c = c as usize;
    if n <= 2 || 4 * c == n * (n - 1) {
        return 1.0;
    }

    // counts[k]: permutations of the first j items with exactly k inversions
    let mut counts = vec![0.0f64; c + 1];
    counts[0] = 1.0;
    if c >= 1 {
        counts[1] = 1.0;
    }
    for j in 3..=n {
        let mut running = 0.0;
        let prefix: Vec<f64> = counts
            .iter()
            .map(|count| {
                running += count;
                running
            })
            .collect();
        for k in 0..=c {
            counts[k] = if k >= j { prefix[k] - prefix[k - j] } else { prefix[k] };
        }
    }

    let factorial: f64 = (1..=n).map(|k| k as f64).product();
    (2.0 * counts.iter().sum::<f64>() / factorial).clamp(0.0, 1.0)
}

fn kendall_normal_p_value(n: usize, con_minus_dis: f64, x_ties: &TieCounts, y_ties: &TieCounts) -> f64 {
    let size = n as f64;
    let m = size * (size - 1.0);
    let mut var = (m * (2.0 * size + 5.0) - x_ties.v1 - y_ties.v1) / 18.0
        + (2.0 * x_ties.pairs * y_ties.pairs) / m;
    if n > 2 {
        var += x_ties.v0 * y_ties.v0 / (9.0 * m * (size - 2.0));
    }

    let z = con_minus_dis / var.sqrt();
    if z.is_nan() {
        f64::NAN
    } else {
        erfc(z.abs() / std::f64::consts::SQRT_2).min(1.0)
    }
}

/// Two-sided p-value of `r` under H0: rho = 0, via Student-t with n-2 dof.
fn t_test_p_value(r: f64, n: usize) -> f64 {
    let dof = n as f64 - 2.0;
    if dof <= 0.0 || r.is_nan() {
        return f64::NAN;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }

    let t = r * (dof / ((1.0 - r) * (1.0 + r))).sqrt();
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

fn usable(x: &[f64], y: &[f64]) -> bool {
    x.len() == y.len() && x.len() >= 2 && !x.iter().chain(y.iter()).any(|v| v.is_nan())
}

/// `-0.0` and `0.0` compare equal, as they do in the tie counts. Inputs are
/// NaN-free once [`usable`] passed.
fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn sign(ordering: Ordering) -> i64 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Tie statistics over groups of size t: sum t(t-1)/2, t(t-1)(t-2), t(t-1)(2t+5).
struct TieCounts {
    pairs: f64,
    v0: f64,
    v1: f64,
}

impl TieCounts {
    fn of(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut counts = Self {
            pairs: 0.0,
            v0: 0.0,
            v1: 0.0,
        };
        let mut start = 0;
        while start < sorted.len() {
            let mut end = start + 1;
            while end < sorted.len() && sorted[end] == sorted[start] {
                end += 1;
            }
            let t = (end - start) as f64;
            if t > 1.0 {
                counts.pairs += t * (t - 1.0) / 2.0;
                counts.v0 += t * (t - 1.0) * (t - 2.0);
                counts.v1 += t * (t - 1.0) * (2.0 * t + 5.0);
            }
            start = end;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rankdata_averages_ties() {
        assert_eq!(rankdata(&[10.0, 20.0, 20.0, 5.0]), vec![2.0, 3.5, 3.5, 1.0]);
    }

    #[test]
    fn test_spearman_identity() {
        let x = [3.0, 1.0, 4.0, 1.5, 9.0, 2.6];
        let result = spearman(&x, &x);
        assert_abs_diff_eq!(result.coefficient, 1.0, epsilon = 1e-12);
        assert!(result.p_value < 1e-10);
        assert_eq!(result.n, 6);
    }

    #[test]
    fn test_spearman_reference_value() {
        // rho = 0.8 on five pairs
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let result = spearman(&x, &y);
        assert_abs_diff_eq!(result.coefficient, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 0.104088, epsilon = 1e-5);
    }

    #[test]
    fn test_spearman_reversed() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [8.0, 6.0, 4.0, 2.0];
        assert_abs_diff_eq!(spearman(&x, &y).coefficient, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kendall_without_ties_uses_exact_p_value() {
        // 8 concordant, 2 discordant pairs; 14 of the 120 orderings have at most 2 inversions
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        let result = kendall_tau(&x, &y);
        assert_abs_diff_eq!(result.coefficient, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(result.p_value, 14.0 / 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kendall_exact_p_value_edges() {
        // perfect order: only the identity and its reverse are as extreme
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(kendall_tau(&x, &x).p_value, 2.0 / 24.0, epsilon = 1e-12);
        // half the pairs discordant: nothing to reject
        assert_abs_diff_eq!(kendall_exact_p_value(4, 3), 1.0, epsilon = 1e-12);
        // one inversion among six items: (1 + 5) * 2 / 720
        assert_abs_diff_eq!(kendall_exact_p_value(6, 1), 12.0 / 720.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kendall_large_sample_uses_normal_approximation() {
        let x: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..40).map(|i| ((i * 17) % 40) as f64).collect();
        let result = kendall_tau(&x, &y);

        let (mut con, mut dis) = (0.0f64, 0.0f64);
        for i in 0..40 {
            for j in (i + 1)..40 {
                if (y[j] - y[i]) > 0.0 { con += 1.0 } else { dis += 1.0 }
            }
        }
        // var = n(n-1)(2n+5)/18 without ties
        let z = (con - dis) / (40.0f64 * 39.0 * 85.0 / 18.0).sqrt();
        assert_abs_diff_eq!(result.p_value, erfc(z.abs() / std::f64::consts::SQRT_2), epsilon = 1e-12);
    }

    #[test]
    fn test_signed_zero_is_a_tie() {
        let signed = kendall_tau(&[0.0, -0.0, 1.0], &[1.0, 2.0, 3.0]);
        let plain = kendall_tau(&[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(signed.coefficient, plain.coefficient, epsilon = 1e-12);
        assert_abs_diff_eq!(signed.p_value, plain.p_value, epsilon = 1e-12);
        assert_eq!(rankdata(&[0.0, -0.0, 1.0]), vec![1.5, 1.5, 3.0]);
    }

    #[test]
    fn test_kendall_with_ties() {
        let x = [1.0, 1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let result = kendall_tau(&x, &y);
        // 5 concordant, 0 discordant, one tie in x: 5 / sqrt(5 * 6)
        assert_abs_diff_eq!(result.coefficient, 5.0 / 30.0f64.sqrt(), epsilon = 1e-12);
        assert!(result.p_value > 0.0 && result.p_value < 1.0);
    }

    #[test]
    fn test_degenerate_inputs_are_nan() {
        assert!(!spearman(&[], &[]).is_defined());
        assert!(!spearman(&[1.0], &[2.0]).is_defined());
        assert!(!kendall_tau(&[1.0], &[2.0]).is_defined());
        assert!(!spearman(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_defined());
        assert!(!kendall_tau(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_defined());
        assert!(!pearson(&[1.0, 2.0], &[1.0]).is_defined());
        assert!(!spearman(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_defined());
    }

    #[test]
    fn test_pearson_linear() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let result = pearson(&x, &y);
        assert_abs_diff_eq!(result.coefficient, 1.0, epsilon = 1e-12);
    }
}
