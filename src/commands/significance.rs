use super::CommandError;
use crate::config::Config;
use crate::stats::{dependent_corr, independent_corr, DependentMethod, IndependentMethod, TestOptions};

pub(super) fn options(one_tailed: bool, conf_level: Option<f64>, config: &Config) -> TestOptions {
    TestOptions {
        two_tailed: !one_tailed,
        conf_level: conf_level.unwrap_or(config.conf_level),
    }
}

pub(super) fn run_dependent(
    xy: f64,
    xz: f64,
    yz: f64,
    n: usize,
    options: &TestOptions,
    method: DependentMethod,
) -> Result<(), CommandError> {
    let verdict = dependent_corr(xy, xz, yz, n, options, method)?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

pub(super) fn run_independent(
    xy: f64,
    ab: f64,
    n: usize,
    n2: Option<usize>,
    options: &TestOptions,
    method: IndependentMethod,
) -> Result<(), CommandError> {
    let verdict = independent_corr(xy, ab, n, n2, options, method)?;
    println!("{}", serde_json::to_string_pretty(&verdict)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_configured_level() {
        let config = Config {
            conf_level: 0.9,
            ..Default::default()
        };
        assert_eq!(options(false, None, &config).conf_level, 0.9);
        assert_eq!(options(false, Some(0.99), &config).conf_level, 0.99);
        assert!(!options(true, None, &config).two_tailed);
    }
}
