//! Binomial and multinomial draws over integer counts

use rand::Rng;
use rand_distr::{Binomial, Distribution};

/// Draw from Binomial(trials, p). `p` outside [0, 1] or NaN draws nothing.
pub fn binomial<R: Rng + ?Sized>(rng: &mut R, trials: u64, p: f64) -> u64 {
    if trials == 0 || p == 0.0 {
        return 0;
    }
    if p == 1.0 {
        return trials;
    }
    match Binomial::new(trials, p) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0,
    }
}

/// Draw from Multinomial(trials, probs) via conditional binomials.
///
/// `probs` must be non-negative and sum to 1. The last category takes
/// whatever the earlier draws left, so the counts always sum to `trials`.
pub fn multinomial<R: Rng + ?Sized, const K: usize>(
    rng: &mut R,
    trials: u64,
    probs: &[f64; K],
) -> [u64; K] {
    let mut counts = [0u64; K];
    let mut remaining = trials;

    for k in 0..K {
        if remaining == 0 {
            break;
        }
        if k == K - 1 {
            counts[k] = remaining;
            break;
        }
        let tail_mass: f64 = probs[k..].iter().sum();
        let conditional = if tail_mass > 0.0 {
            (probs[k] / tail_mass).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let draw = binomial(rng, remaining, conditional);
        counts[k] = draw;
        remaining -= draw;
    }

    counts
}
