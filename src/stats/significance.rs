//! Tests for the difference between two correlation coefficients.
//!
//! - dependent correlations (`xy` vs `xz`, sharing `x`, with `yz` known):
//!   Steiger's t-test or Zou's confidence interval
//! - independent correlations (`xy` vs `ab` from separate samples):
//!   Fisher's z-test or Zou's confidence interval
//!
//! Samples of three or fewer observations are rejected up front. Other
//! degeneracies of the formulas (a negative radicand in Steiger's statistic,
//! `|r| = 1` in the Fisher transform, a vanishing denominator in the Zou
//! correlation term) come back as NaN or infinite values.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SignificanceError {
    #[error("unknown method '{0}'")]
    UnknownMethod(String),
    #[error("sample size {n} is too small, need more than 3 observations")]
    InvalidSampleSize { n: usize },
    #[error("confidence level {0} must lie strictly between 0 and 1")]
    InvalidConfidenceLevel(f64),
    #[error("distribution error: {0}")]
    Distribution(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependentMethod {
    Steiger,
    Zou,
}

impl FromStr for DependentMethod {
    type Err = SignificanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steiger" => Ok(Self::Steiger),
            "zou" => Ok(Self::Zou),
            _ => Err(SignificanceError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for DependentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steiger => write!(f, "steiger"),
            Self::Zou => write!(f, "zou"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndependentMethod {
    Fisher,
    Zou,
}

impl FromStr for IndependentMethod {
    type Err = SignificanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fisher" => Ok(Self::Fisher),
            "zou" => Ok(Self::Zou),
            _ => Err(SignificanceError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for IndependentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fisher => write!(f, "fisher"),
            Self::Zou => write!(f, "zou"),
        }
    }
}

/// `two_tailed` applies to the t/z tests, `conf_level` to the Zou intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOptions {
    pub two_tailed: bool,
    pub conf_level: f64,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            two_tailed: true,
            conf_level: 0.95,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignificanceVerdict {
    /// Test statistic (t or z) and its p-value.
    Test { statistic: f64, p_value: f64 },
    /// Confidence interval for the difference of the two correlations.
    Interval { lower: f64, upper: f64 },
}

impl SignificanceVerdict {
    pub fn p_value(&self) -> Option<f64> {
        match self {
            Self::Test { p_value, .. } => Some(*p_value),
            Self::Interval { .. } => None,
        }
    }

    pub fn interval(&self) -> Option<(f64, f64)> {
        match self {
            Self::Test { .. } => None,
            Self::Interval { lower, upper } => Some((*lower, *upper)),
        }
    }

    /// p below `alpha`, or an interval that excludes zero.
    pub fn is_significant(&self, alpha: f64) -> bool {
        match self {
            Self::Test { p_value, .. } => *p_value < alpha,
            Self::Interval { lower, upper } => *lower > 0.0 || *upper < 0.0,
        }
    }
}

impl fmt::Display for SignificanceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Test { p_value, .. } => write!(f, "{p_value}"),
            Self::Interval { lower, upper } => write!(f, "{lower};{upper}"),
        }
    }
}

/// Confidence interval of a correlation through the Fisher z-transform.
pub fn rz_ci(r: f64, n: usize, conf_level: f64) -> Result<(f64, f64), SignificanceError> {
    check_sample_size(n)?;
    check_conf_level(conf_level)?;

    let z_se = (1.0 / (n as f64 - 3.0)).sqrt();
    let moe = standard_normal()?.inverse_cdf(1.0 - (1.0 - conf_level) / 2.0) * z_se;
    let z = r.atanh();
    Ok(((z - moe).tanh(), (z + moe).tanh()))
}

/// Correlation between the sample correlations `rxy` and `rxz`.
pub fn rho_rxy_rxz(rxy: f64, rxz: f64, ryz: f64) -> f64 {
    let num = (ryz - 0.5 * rxy * rxz) * (1.0 - rxy.powi(2) - rxz.powi(2) - ryz.powi(2)) + ryz.powi(3);
    let den = (1.0 - rxy.powi(2)) * (1.0 - rxz.powi(2));
    num / den
}

/// Compares `xy` and `xz`, two correlations measured on the same `n` elements
/// that share the variable `x`; `yz` is the correlation between the others.
pub fn dependent_corr(
    xy: f64,
    xz: f64,
    yz: f64,
    n: usize,
    options: &TestOptions,
    method: DependentMethod,
) -> Result<SignificanceVerdict, SignificanceError> {
    check_sample_size(n)?;

    match method {
        DependentMethod::Steiger => {
            let n = n as f64;
            let d = xy - xz;
            let determinant = 1.0 - xy * xy - xz * xz - yz * yz + 2.0 * xy * xz * yz;
            let avg = (xy + xz) / 2.0;
            let cube = (1.0 - yz).powi(3);

            let statistic = d
                * ((n - 1.0) * (1.0 + yz)
                    / ((2.0 * (n - 1.0) / (n - 3.0)) * determinant + avg * avg * cube))
                    .sqrt();

            let dist = StudentsT::new(0.0, 1.0, n - 3.0)
                .map_err(|e| SignificanceError::Distribution(e.to_string()))?;
            let p_value = tail_probability(statistic, options.two_tailed, |t| dist.sf(t));

            Ok(SignificanceVerdict::Test { statistic, p_value })
        }
        DependentMethod::Zou => {
            let (l1, u1) = rz_ci(xy, n, options.conf_level)?;
            let (l2, u2) = rz_ci(xz, n, options.conf_level)?;
            let rho = rho_rxy_rxz(xy, xz, yz);

            let lower = xy - xz
                - ((xy - l1).powi(2) + (u2 - xz).powi(2) - 2.0 * rho * (xy - l1) * (u2 - xz)).sqrt();
            let upper = xy - xz
                + ((u1 - xy).powi(2) + (xz - l2).powi(2) - 2.0 * rho * (u1 - xy) * (xz - l2)).sqrt();

            Ok(SignificanceVerdict::Interval { lower, upper })
        }
    }
}

/// Compares `xy` (from `n` elements) with `ab` (from `n2` elements, `n` when
/// `None`), two correlations from unrelated samples.
pub fn independent_corr(
    xy: f64,
    ab: f64,
    n: usize,
    n2: Option<usize>,
    options: &TestOptions,
    method: IndependentMethod,
) -> Result<SignificanceVerdict, SignificanceError> {
    let n2 = n2.unwrap_or(n);
    check_sample_size(n)?;
    check_sample_size(n2)?;

    match method {
        IndependentMethod::Fisher => {
            let se_diff = (1.0 / (n as f64 - 3.0) + 1.0 / (n2 as f64 - 3.0)).sqrt();
            let statistic = ((xy.atanh() - ab.atanh()) / se_diff).abs();

            let normal = standard_normal()?;
            let p_value = tail_probability(statistic, options.two_tailed, |z| normal.sf(z));

            Ok(SignificanceVerdict::Test { statistic, p_value })
        }
        IndependentMethod::Zou => {
            let (l1, u1) = rz_ci(xy, n, options.conf_level)?;
            let (l2, u2) = rz_ci(ab, n2, options.conf_level)?;

            let lower = xy - ab - ((xy - l1).powi(2) + (u2 - ab).powi(2)).sqrt();
            let upper = xy - ab + ((u1 - xy).powi(2) + (ab - l2).powi(2)).sqrt();

            Ok(SignificanceVerdict::Interval { lower, upper })
        }
    }
}

fn tail_probability(statistic: f64, two_tailed: bool, sf: impl Fn(f64) -> f64) -> f64 {
    if statistic.is_nan() {
        return f64::NAN;
    }
    let one_tailed = if statistic.is_infinite() {
        0.0
    } else {
        sf(statistic.abs())
    };
    if two_tailed {
        (2.0 * one_tailed).min(1.0)
    } else {
        one_tailed
    }
}

fn standard_normal() -> Result<Normal, SignificanceError> {
    Normal::new(0.0, 1.0).map_err(|e| SignificanceError::Distribution(e.to_string()))
}

fn check_sample_size(n: usize) -> Result<(), SignificanceError> {
    if n <= 3 {
        return Err(SignificanceError::InvalidSampleSize { n });
    }
    Ok(())
}

fn check_conf_level(conf_level: f64) -> Result<(), SignificanceError> {
    if !(conf_level > 0.0 && conf_level < 1.0) {
        return Err(SignificanceError::InvalidConfidenceLevel(conf_level));
    }
    Ok(())
}
