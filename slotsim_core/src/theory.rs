//! Analytical reference curves for slotted ALOHA.
//!
//! ```text
//!   Poisson limit:      S = G * e^(-G)
//!   Finite population:  S = n * q * (1 - q)^(n - 1),  q = G / n
//! ```
//!
//! Used to annotate measured results; the engine never depends on them.

/// Throughput of slotted ALOHA with infinitely many sources at offered load `g`.
pub fn poisson_throughput(offered: f64) -> f64 {
    if offered <= 0.0 {
        return 0.0;
    }
    offered * (-offered).exp()
}

/// Throughput with `sources` sources each attempting with probability `q`.
pub fn finite_population_throughput(sources: usize, attempt_prob: f64) -> f64 {
    if sources == 0 {
        return 0.0;
    }
    let q = attempt_prob.clamp(0.0, 1.0);
    let n = sources as f64;
    n * q * (1.0 - q).powf(n - 1.0)
}

/// Throughput with `sources` sources sharing an offered load `g` evenly.
pub fn finite_population_at_load(sources: usize, offered: f64) -> f64 {
    if sources == 0 {
        return 0.0;
    }
    finite_population_throughput(sources, offered / sources as f64)
}

/// Peak throughput of the Poisson model, `1/e`, reached at `G = 1`.
pub fn peak_poisson_throughput() -> f64 {
    (-1.0f64).exp()
}

/// Solves `S = G * e^(-G)` for the stable (lower) load `G <= 1`.
///
/// Fixed-point iteration on `G = S * e^G`, stopped once successive
/// estimates differ by less than `1e-10`. Returns None above the `1/e`
/// capacity, where no equilibrium exists.
pub fn stable_load_for_throughput(throughput: f64) -> Option<f64> {
    if throughput < 0.0 || throughput > peak_poisson_throughput() {
        return None;
    }
    let mut g = throughput;
    let mut diff = 1.0;
    let mut rounds = 0;
    while diff > 1e-10 && rounds < 10_000 {
        let next = (throughput * g.exp()).min(1.0);
        diff = (next - g).abs();
        g = next;
        rounds += 1;
    }
    Some(g)
}
