//! Calibration objective - distance between simulated and observed deaths

use rayon::prelude::*;
use tracing::debug;

use crate::core::config::SimulationConfig;
use crate::core::error::{MetapopError, Result};
use crate::epidemic::output::SimulationOutcome;
use crate::epidemic::params::ParameterVector;
use crate::epidemic::record::DeathMatrix;
use crate::epidemic::simulation::{run_full_simulation, EpidemicInputs};

/// Frobenius relative error, further divided by the number of cells:
/// `|observed - simulated|_F / (rows * cols * |observed|_F)`.
///
/// An all-zero `observed` divides by zero and yields a non-finite cost.
pub fn get_cost(observed: &DeathMatrix, simulated: &DeathMatrix) -> Result<f64> {
    if observed.shape() != simulated.shape() {
        return Err(MetapopError::ShapeMismatch {
            expected: observed.shape(),
            actual: simulated.shape(),
        });
    }

    let (rows, cols) = observed.shape();
    let norm_coeff = (rows * cols) as f64 * observed.frobenius_norm();
    let residual = observed
        .values()
        .iter()
        .zip(simulated.values())
        .map(|(o, s)| (o - s) * (o - s))
        .sum::<f64>()
        .sqrt();

    Ok(residual / norm_coeff)
}

/// Evaluable cost function for an external optimizer
///
/// Holds the inputs, the observed matrix and a base config. Every
/// evaluation re-seeds region state from scratch.
pub struct CalibrationObjective {
    inputs: EpidemicInputs,
    observed: DeathMatrix,
    config: SimulationConfig,
}

impl CalibrationObjective {
    /// Fails if the inputs do not cover the config's horizon or the
    /// observed matrix does not match regions × simulated quarters.
    pub fn new(
        inputs: EpidemicInputs,
        observed: DeathMatrix,
        config: SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;
        let calendar = config.calendar()?;
        let regions = inputs.validate(&calendar)?;
        let expected = (regions, calendar.quarter_count());
        if observed.shape() != expected {
            return Err(MetapopError::ShapeMismatch {
                expected,
                actual: observed.shape(),
            });
        }
        Ok(Self {
            inputs,
            observed,
            config,
        })
    }

    /// Cost at the config's seed
    pub fn evaluate(&self, params: &ParameterVector) -> Result<f64> {
        self.evaluate_with_seed(params, self.config.seed)
    }

    /// Cost of one run. An out-of-domain vector scores
    /// `config.out_of_domain_cost`.
    pub fn evaluate_with_seed(&self, params: &ParameterVector, seed: u64) -> Result<f64> {
        let config = SimulationConfig {
            seed,
            ..self.config.clone()
        };
        match run_full_simulation(params, &self.inputs, &config)? {
            SimulationOutcome::Completed(output) => get_cost(&self.observed, &output.deaths),
            SimulationOutcome::OutOfDomain(violation) => {
                debug!(%violation, cost = self.config.out_of_domain_cost, "Scoring out-of-domain parameters");
                Ok(self.config.out_of_domain_cost)
            }
        }
    }

    /// Mean cost over independent runs, one per seed, run in parallel
    pub fn evaluate_replicates(&self, params: &ParameterVector, seeds: &[u64]) -> Result<f64> {
        if seeds.is_empty() {
            return Err(MetapopError::InvalidConfig(
                "at least one replicate seed is required".into(),
            ));
        }
        let costs = seeds
            .par_iter()
            .map(|&seed| self.evaluate_with_seed(params, seed))
            .collect::<Result<Vec<f64>>>()?;
        Ok(costs.iter().sum::<f64>() / costs.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Quarter, QuarterSlot};

    fn matrix(rows: Vec<Vec<f64>>) -> DeathMatrix {
        let cols = rows.first().map_or(0, Vec::len);
        let slots = (0..cols)
            .map(|i| QuarterSlot::new(2010 + i as i32, Quarter::Q1))
            .collect();
        DeathMatrix::from_rows(rows, slots).unwrap()
    }

    #[test]
    fn test_identical_matrices_cost_zero() {
        let m = matrix(vec![vec![1.0, 5.0], vec![2.0, 0.0], vec![7.0, 3.0]]);
        assert_eq!(get_cost(&m, &m).unwrap(), 0.0);
    }

    #[test]
    fn test_cost_normalization() {
        // |M|_F = 5, residual against zeros = 5, 2x1 cells
        let observed = matrix(vec![vec![3.0], vec![4.0]]);
        let zeros = observed.scaled(0.0);
        assert!((get_cost(&observed, &zeros).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cost_grows_with_deviation() {
        let m = matrix(vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
        let c_double = get_cost(&m, &m.scaled(2.0)).unwrap();
        let c_zero = get_cost(&m, &m.scaled(0.0)).unwrap();
        let c_triple = get_cost(&m, &m.scaled(3.0)).unwrap();
        let c_near = get_cost(&m, &m.scaled(1.1)).unwrap();
        assert!((c_double - c_zero).abs() < 1e-12);
        assert!(c_near < c_double);
        assert!(c_double < c_triple);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = matrix(vec![vec![1.0, 2.0]]);
        let b = matrix(vec![vec![1.0]]);
        assert!(matches!(
            get_cost(&a, &b),
            Err(MetapopError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zero_observed_is_not_finite() {
        let zeros = matrix(vec![vec![0.0, 0.0]]);
        assert!(!get_cost(&zeros, &zeros).unwrap().is_finite());
    }
}
