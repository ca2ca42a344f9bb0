//! Binomial distribution primitives in `f64`.
//!
//! Models the number of Byzantine responders X in a sample of `n` validators,
//! where each sampled validator is independently Byzantine with probability
//! `p`. Coefficients are accumulated in log space, so values stay finite for
//! `n` in the hundreds where a factorial formulation overflows past `n ≈ 20`,
//! and probability masses stay finite well past the point where the
//! coefficient itself overflows.
//!
//! Callers are expected to pass `p` in `[0, 1]`; a NaN `p` propagates.

/// Binomial coefficient C(n, k) as `f64`.
///
/// Computed as `exp(Σ_{i=0}^{k-1} ln(n - i) - ln(i + 1))`.
///
/// # Parameters
/// - `n`: Population count.
/// - `k`: Selection count.
///
/// # Returns
/// `C(n, k)`, or `0.0` when `k > n`.
pub fn binomial_coefficient(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    ln_binomial_coefficient(n, k).exp()
}

/// ln C(n, k) for `k <= n`.
fn ln_binomial_coefficient(n: u64, k: u64) -> f64 {
    if k == 0 || k == n {
        return 0.0;
    }
    let mut log_sum = 0.0f64;
    for i in 0..k {
        log_sum += ((n - i) as f64).ln() - ((i + 1) as f64).ln();
    }
    log_sum
}

/// PMF: P(X = k) = C(n, k) · p^k · (1 - p)^(n - k).
///
/// The three factors are combined in log space, so large `n` cannot pair an
/// overflowing coefficient with an underflowing power.
///
/// # Returns
/// Probability mass at `k`, or `0.0` when `k > n`.
pub fn binomial_probability(n: u64, k: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    // Point masses: ln(0) would turn 0 · ln(0) into NaN.
    if p == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p == 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let ln_mass =
        ln_binomial_coefficient(n, k) + k as f64 * p.ln() + (n - k) as f64 * (1.0 - p).ln();
    ln_mass.exp()
}

/// CDF: P(X <= k) = Σ_{i=0}^{k} P(X = i).
///
/// `k` beyond `n` is treated as `n`.
pub fn binomial_cdf(n: u64, k: u64, p: f64) -> f64 {
    let upper = k.min(n);
    (0..=upper).map(|i| binomial_probability(n, i, p)).sum()
}

/// Upper tail: P(X >= k) = Σ_{i=k}^{n} P(X = i).
///
/// Summed directly rather than as `1 - cdf(k - 1)` so that tails far below
/// machine epsilon keep their magnitude.
///
/// # Returns
/// Tail probability, or `0.0` when `k > n`.
pub fn binomial_tail(n: u64, k: u64, p: f64) -> f64 {
    if k > n {
        return 0.0;
    }
    (k..=n).map(|i| binomial_probability(n, i, p)).sum()
}
