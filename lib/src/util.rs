use num_integer::gcd;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};

const NS_PER_US: i64 = 1_000;
const NS_PER_SEC: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

/// Read a YAML document and deserialize it into `T`.
pub fn load_yaml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let file_content = fs::read_to_string(file_path).map_err(|source| ConvertError::Read {
        path: file_path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&file_content).map_err(|source| ConvertError::Parse {
        path: file_path.to_path_buf(),
        source,
    })
}

/// Least common multiple of all activation periods, reduced left to right.
///
/// # Arguments
///
/// *  `periods` - activation period of each dag in ns, in dag order
///
/// # Returns
///
/// *  `hyper_period` - in ns
pub fn get_hyper_period(periods: &[u64]) -> Result<u64> {
    let mut hyper_period = 1;
    for (dag_id, &period) in periods.iter().enumerate() {
        if period == 0 {
            return Err(ConvertError::ZeroPeriod { dag_id });
        }
        // Durations are written out as i64, so that is the real upper bound.
        hyper_period = (hyper_period / gcd(hyper_period, period))
            .checked_mul(period)
            .filter(|&hyper_period| hyper_period <= i64::MAX as u64)
            .ok_or(ConvertError::HyperPeriodOverflow { dag_id })?;
    }
    Ok(hyper_period)
}

/// Convert ns to us. `Floor` truncates toward zero.
pub fn to_us(ns: i64, rounding: Rounding) -> i64 {
    let us = ns / NS_PER_US;
    match rounding {
        Rounding::Ceil if ns % NS_PER_US > 0 => us + 1,
        _ => us,
    }
}

/// Repetitions needed so that the dag set runs at least `min_seconds`.
///
/// `num_iters` wins when it already covers the requested time or when
/// `min_seconds` is zero.
pub fn get_repetitions(num_iters: u64, min_seconds: u64, hyper_period: u64) -> Result<u64> {
    if min_seconds == 0 || hyper_period == 0 {
        return Ok(num_iters);
    }
    let min_ns = min_seconds
        .checked_mul(NS_PER_SEC)
        .ok_or(ConvertError::MinSecondsOverflow(min_seconds))?;
    Ok(num_iters.max(min_ns.div_ceil(hyper_period)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_hyper_period_normal() {
        assert_eq!(get_hyper_period(&[6, 4]).unwrap(), 12);
        assert_eq!(get_hyper_period(&[10, 20, 30, 40]).unwrap(), 120);
    }

    #[test]
    fn test_get_hyper_period_divisible_by_every_period() {
        let periods = [7, 12, 18, 25];
        let hyper_period = get_hyper_period(&periods).unwrap();
        assert!(periods.iter().all(|p| hyper_period % p == 0));
        assert_eq!(hyper_period, 6300);
    }

    #[test]
    fn test_get_hyper_period_overflow() {
        // pairwise coprime periods whose product exceeds u64::MAX
        let periods = [33_333_331, 16_666_669, 7_000_001];
        match get_hyper_period(&periods) {
            Err(ConvertError::HyperPeriodOverflow { dag_id }) => assert_eq!(dag_id, 2),
            other => panic!("expected HyperPeriodOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_get_hyper_period_above_i64_max() {
        let periods = [1 << 62, 3];
        assert!(matches!(
            get_hyper_period(&periods),
            Err(ConvertError::HyperPeriodOverflow { dag_id: 1 })
        ));
        assert_eq!(get_hyper_period(&[1 << 62]).unwrap(), 1 << 62);
    }

    #[test]
    fn test_get_hyper_period_zero_period() {
        match get_hyper_period(&[10, 0, 5]) {
            Err(ConvertError::ZeroPeriod { dag_id }) => assert_eq!(dag_id, 1),
            other => panic!("expected ZeroPeriod, got {:?}", other),
        }
    }

    #[test]
    fn test_to_us_floor() {
        assert_eq!(to_us(3000, Rounding::Floor), 3);
        assert_eq!(to_us(3500, Rounding::Floor), 3);
        assert_eq!(to_us(999, Rounding::Floor), 0);
    }

    #[test]
    fn test_to_us_ceil() {
        assert_eq!(to_us(3500, Rounding::Ceil), 4);
        assert_eq!(to_us(3000, Rounding::Ceil), 3);
        assert_eq!(to_us(1, Rounding::Ceil), 1);
    }

    #[test]
    fn test_get_repetitions_min_seconds() {
        let hyper_period = 1_000_000_000;
        assert_eq!(get_repetitions(10, 0, hyper_period).unwrap(), 10);
        assert_eq!(get_repetitions(10, 5, hyper_period).unwrap(), 10);
        assert_eq!(get_repetitions(10, 20, hyper_period).unwrap(), 20);
    }

    #[test]
    fn test_get_repetitions_rounds_up() {
        // 1s needs 3 runs of a 400ms hyperperiod
        assert_eq!(get_repetitions(1, 1, 400_000_000).unwrap(), 3);
    }

    #[test]
    fn test_get_repetitions_min_seconds_overflow() {
        assert!(matches!(
            get_repetitions(10, u64::MAX / 10, 1_000_000_000),
            Err(ConvertError::MinSecondsOverflow(_))
        ));
    }

    #[test]
    fn test_load_yaml_missing_file() {
        let result: Result<Vec<u64>> = load_yaml(Path::new("tests/sample_inputs/missing.yaml"));
        assert!(matches!(result, Err(ConvertError::Read { .. })));
    }
}
