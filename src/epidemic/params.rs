//! Calibratable parameter vector and derived outcome probabilities

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three probabilities an external optimizer sweeps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    /// Background infection probability per susceptible per quarter
    pub p_inf: f64,
    /// Per-contact transmission probability (travel and local)
    pub p_transfer: f64,
    /// Recovery probability per recovery step
    pub p_rec: f64,
}

impl ParameterVector {
    pub fn new(p_inf: f64, p_transfer: f64, p_rec: f64) -> Self {
        Self {
            p_inf,
            p_transfer,
            p_rec,
        }
    }

    /// Optimizer-order view: `[p_inf, p_transfer, p_rec]`
    pub fn from_array(x: [f64; 3]) -> Self {
        Self::new(x[0], x[1], x[2])
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.p_inf, self.p_transfer, self.p_rec]
    }

    /// First parameter outside [0, 1], checked in optimizer order
    pub fn domain_violation(&self) -> Option<DomainViolation> {
        [
            (Parameter::PInf, self.p_inf),
            (Parameter::PTransfer, self.p_transfer),
            (Parameter::PRec, self.p_rec),
        ]
        .into_iter()
        .find(|(_, value)| !(0.0..=1.0).contains(value))
        .map(|(parameter, value)| DomainViolation { parameter, value })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    PInf,
    PTransfer,
    PRec,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::PInf => "p_inf",
            Parameter::PTransfer => "p_transfer",
            Parameter::PRec => "p_rec",
        };
        f.write_str(name)
    }
}

/// A parameter found outside its probability domain
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainViolation {
    pub parameter: Parameter,
    pub value: f64,
}

impl fmt::Display for DomainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} is outside [0, 1]", self.parameter, self.value)
    }
}

/// Normalized {recover, stay infected, die} split for one recovery step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub recover: f64,
    pub stay: f64,
    pub die: f64,
}

impl OutcomeProbabilities {
    /// Derive `p_stay = 1 - p_rec - p_die` and normalize absolute values so
    /// the split sums to 1 even when `p_stay` is slightly negative.
    pub fn from_rates(p_rec: f64, p_die: f64) -> Self {
        let raw = [p_rec.abs(), (1.0 - p_rec - p_die).abs(), p_die.abs()];
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return Self {
                recover: 0.0,
                stay: 1.0,
                die: 0.0,
            };
        }
        Self {
            recover: raw[0] / total,
            stay: raw[1] / total,
            die: raw[2] / total,
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.recover, self.stay, self.die]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_check_reports_first_violation() {
        let params = ParameterVector::new(-0.1, 2.0, 0.5);
        let violation = params.domain_violation().unwrap();
        assert_eq!(violation.parameter, Parameter::PInf);
        assert_eq!(violation.value, -0.1);
    }

    #[test]
    fn test_domain_check_accepts_bounds() {
        assert!(ParameterVector::new(0.0, 1.0, 0.5).domain_violation().is_none());
        assert!(ParameterVector::new(0.0, 0.0, f64::NAN).domain_violation().is_some());
    }

    #[test]
    fn test_outcome_split_sums_to_one() {
        let split = OutcomeProbabilities::from_rates(0.1, 7.5e-5);
        let sum: f64 = split.as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((split.recover - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_outcome_split_absorbs_negative_stay() {
        // p_rec = 1 with a nonzero p_die makes p_stay slightly negative
        let split = OutcomeProbabilities::from_rates(1.0, 0.01);
        assert!(split.stay >= 0.0);
        let sum: f64 = split.as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_recovery_split() {
        let split = OutcomeProbabilities::from_rates(1.0, 0.0);
        assert_eq!(split.as_array(), [1.0, 0.0, 0.0]);
    }
}
