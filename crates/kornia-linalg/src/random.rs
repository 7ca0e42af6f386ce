//! Standard normal sampling with the Box-Muller transform.

use crate::scalar::Scalar;
use rand::Rng;

/// Draw a sample from the standard normal distribution using `rng`.
///
/// Uses the cosine branch of the Box-Muller transform on two uniform samples
/// `u1 = 1 - U[0, 1)` (never zero, so the logarithm is finite) and
/// `u2 = U[0, 1)`. The sine companion sample is not kept between calls.
///
/// # Arguments
///
/// * `rng` - The uniform random source.
///
/// # Example
///
/// ```
/// use kornia_linalg::randn_with;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let x: f64 = randn_with(&mut rng);
/// assert!(x.is_finite());
/// ```
pub fn randn_with<T: Scalar, R: Rng + ?Sized>(rng: &mut R) -> T {
    let u1 = T::one() - T::sample_unit(rng);
    let u2 = T::sample_unit(rng);
    let r = (T::lit(-2.0) * u1.ln()).sqrt();
    let c = (T::TAU() * u2).cos();
    r * c
}

/// Draw a sample from the standard normal distribution using the thread-local generator.
pub fn randn<T: Scalar>() -> T {
    randn_with(&mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_randn_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 200_000;
        let samples: Vec<f64> = (0..n).map(|_| randn_with(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.01, "mean = {mean}");
        assert!((var - 1.0).abs() < 0.02, "variance = {var}");
    }

    #[test]
    fn test_randn_is_finite() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let x: f32 = randn_with(&mut rng);
            assert!(x.is_finite());
        }
        assert!(randn::<f64>().is_finite());
    }
}
