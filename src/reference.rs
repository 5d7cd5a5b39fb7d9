//! Reference-population distribution tables
//!
//! Per metric, per age bracket, per sex normal-distribution parameters
//! used to convert raw readings into percentiles. Tables are compile-time
//! constants and read-only for the process lifetime, so concurrent
//! lookups need no synchronization.
//!
//! Age brackets are fixed and non-overlapping: 18-29, 30-39, 40-49,
//! 50-59, 60-69, 70-120. Ages outside every bracket fail with
//! `UnsupportedDemographic`. `Sex::Other` resolves to the midpoint of
//! the male and female parameters for the bracket.

use crate::errors::EngineError;
use crate::types::{Sex, StrengthExercise};

/// Youngest age with reference coverage
pub const AGE_MIN: u32 = 18;
/// Oldest age with reference coverage
pub const AGE_MAX: u32 = 120;

/// Which way "healthier" points for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lower raw value ranks higher (times, HbA1c, resting HR, cholesterol ratio)
    LowerIsBetter,
    /// Higher raw value ranks higher (relative strength, sleep score)
    HigherIsBetter,
}

/// Metric key for reference lookup
///
/// Strength is ranked per exercise on the 1RM / body-weight ratio;
/// cholesterol on the total/HDL ratio; sleep on the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMetric {
    /// 1-mile time, seconds
    CardioFitness,
    /// Resting heart rate, bpm
    RestingHeartRate,
    /// One-rep-max divided by body weight
    RelativeStrength(StrengthExercise),
    /// HbA1c, percent
    BloodSugar,
    /// Total cholesterol / HDL
    CholesterolRatio,
    /// Sleep composite score, 0-100
    SleepScore,
}

impl ReferenceMetric {
    /// Directionality applied when ranking against this metric's tables
    pub fn direction(&self) -> Direction {
        match self {
            ReferenceMetric::CardioFitness
            | ReferenceMetric::RestingHeartRate
            | ReferenceMetric::BloodSugar
            | ReferenceMetric::CholesterolRatio => Direction::LowerIsBetter,
            ReferenceMetric::RelativeStrength(_) | ReferenceMetric::SleepScore => {
                Direction::HigherIsBetter
            }
        }
    }

    fn table(&self) -> &'static [Bracket; 6] {
        match self {
            ReferenceMetric::CardioFitness => &MILE_TIME_SECS,
            ReferenceMetric::RestingHeartRate => &RESTING_HR_BPM,
            ReferenceMetric::RelativeStrength(StrengthExercise::Squat) => &SQUAT_RELATIVE_1RM,
            ReferenceMetric::RelativeStrength(StrengthExercise::Bench) => &BENCH_RELATIVE_1RM,
            ReferenceMetric::BloodSugar => &HBA1C_PERCENT,
            ReferenceMetric::CholesterolRatio => &CHOLESTEROL_RATIO,
            ReferenceMetric::SleepScore => &SLEEP_SCORE,
        }
    }
}

/// Normal-distribution parameters for one demographic cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub mean: f64,
    pub std_dev: f64,
}

impl Params {
    /// Percentile of `value` within this distribution, direction-adjusted
    /// so higher always means healthier
    ///
    /// Values beyond the distribution's tails saturate at 0 or 100.
    pub fn percentile(&self, value: f64, direction: Direction) -> f64 {
        let z = (value - self.mean) / self.std_dev;
        let z = match direction {
            Direction::HigherIsBetter => z,
            Direction::LowerIsBetter => -z,
        };
        (standard_normal_cdf(z) * 100.0).clamp(0.0, 100.0)
    }

    fn midpoint(a: Params, b: Params) -> Params {
        Params {
            mean: (a.mean + b.mean) / 2.0,
            std_dev: (a.std_dev + b.std_dev) / 2.0,
        }
    }
}

/// One age bracket's parameters for both sexes
#[derive(Debug, Clone, Copy)]
struct Bracket {
    age_min: u32,
    age_max: u32,
    male: Params,
    female: Params,
}

const fn bracket(
    age_min: u32,
    age_max: u32,
    male_mean: f64,
    male_sd: f64,
    female_mean: f64,
    female_sd: f64,
) -> Bracket {
    Bracket {
        age_min,
        age_max,
        male: Params {
            mean: male_mean,
            std_dev: male_sd,
        },
        female: Params {
            mean: female_mean,
            std_dev: female_sd,
        },
    }
}

/// Look up distribution parameters for a metric and demographic cell
pub fn lookup(metric: ReferenceMetric, age_years: u32, sex: Sex) -> Result<Params, EngineError> {
    let cell = metric
        .table()
        .iter()
        .find(|b| age_years >= b.age_min && age_years <= b.age_max)
        .ok_or(EngineError::UnsupportedDemographic { age_years })?;

    Ok(match sex {
        Sex::Male => cell.male,
        Sex::Female => cell.female,
        Sex::Other => Params::midpoint(cell.male, cell.female),
    })
}

/// Standard normal CDF via the error-function approximation
fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / 2.0_f64.sqrt()))
}

/// Abramowitz and Stegun approximation 7.1.26, max error ~1.5e-7
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

// ============================================================================
// Tables
// ============================================================================
//
// Population-plausible means and spreads per bracket. Lower-is-better
// metrics keep their natural units; the direction flag handles inversion
// at ranking time.

/// 1-mile time, seconds
static MILE_TIME_SECS: [Bracket; 6] = [
    bracket(18, 29, 560.0, 90.0, 640.0, 100.0),
    bracket(30, 39, 590.0, 95.0, 675.0, 105.0),
    bracket(40, 49, 630.0, 100.0, 720.0, 110.0),
    bracket(50, 59, 680.0, 110.0, 780.0, 120.0),
    bracket(60, 69, 740.0, 120.0, 850.0, 130.0),
    bracket(70, 120, 820.0, 130.0, 930.0, 140.0),
];

/// Resting heart rate, bpm
static RESTING_HR_BPM: [Bracket; 6] = [
    bracket(18, 29, 70.0, 10.0, 73.0, 10.0),
    bracket(30, 39, 71.0, 10.0, 74.0, 10.0),
    bracket(40, 49, 72.0, 10.0, 74.0, 11.0),
    bracket(50, 59, 72.0, 11.0, 75.0, 11.0),
    bracket(60, 69, 73.0, 11.0, 76.0, 11.0),
    bracket(70, 120, 74.0, 11.0, 76.0, 12.0),
];

/// Squat 1RM / body weight
static SQUAT_RELATIVE_1RM: [Bracket; 6] = [
    bracket(18, 29, 1.40, 0.40, 1.00, 0.30),
    bracket(30, 39, 1.30, 0.38, 0.95, 0.29),
    bracket(40, 49, 1.15, 0.35, 0.85, 0.27),
    bracket(50, 59, 1.00, 0.32, 0.70, 0.24),
    bracket(60, 69, 0.85, 0.28, 0.60, 0.21),
    bracket(70, 120, 0.70, 0.25, 0.50, 0.18),
];

/// Bench press 1RM / body weight
static BENCH_RELATIVE_1RM: [Bracket; 6] = [
    bracket(18, 29, 1.05, 0.30, 0.60, 0.20),
    bracket(30, 39, 1.00, 0.29, 0.55, 0.19),
    bracket(40, 49, 0.90, 0.27, 0.50, 0.17),
    bracket(50, 59, 0.80, 0.24, 0.45, 0.16),
    bracket(60, 69, 0.70, 0.21, 0.40, 0.14),
    bracket(70, 120, 0.60, 0.18, 0.35, 0.12),
];

/// HbA1c, percent
static HBA1C_PERCENT: [Bracket; 6] = [
    bracket(18, 29, 5.3, 0.45, 5.2, 0.45),
    bracket(30, 39, 5.4, 0.50, 5.3, 0.50),
    bracket(40, 49, 5.5, 0.55, 5.5, 0.55),
    bracket(50, 59, 5.7, 0.60, 5.6, 0.60),
    bracket(60, 69, 5.8, 0.60, 5.8, 0.60),
    bracket(70, 120, 6.0, 0.65, 5.9, 0.65),
];

/// Total cholesterol / HDL
static CHOLESTEROL_RATIO: [Bracket; 6] = [
    bracket(18, 29, 4.2, 1.20, 3.7, 1.10),
    bracket(30, 39, 4.4, 1.20, 3.9, 1.10),
    bracket(40, 49, 4.5, 1.25, 4.0, 1.15),
    bracket(50, 59, 4.5, 1.25, 4.2, 1.15),
    bracket(60, 69, 4.4, 1.25, 4.3, 1.20),
    bracket(70, 120, 4.3, 1.25, 4.3, 1.20),
];

/// Sleep composite score, 0-100
static SLEEP_SCORE: [Bracket; 6] = [
    bracket(18, 29, 72.0, 13.0, 73.0, 13.0),
    bracket(30, 39, 71.0, 13.0, 72.0, 13.0),
    bracket(40, 49, 70.0, 13.0, 71.0, 13.0),
    bracket(50, 59, 69.0, 13.0, 70.0, 13.0),
    bracket(60, 69, 68.0, 14.0, 69.0, 14.0),
    bracket(70, 120, 67.0, 14.0, 68.0, 14.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_value_at_mean_ranks_fiftieth() {
        let params = lookup(ReferenceMetric::BloodSugar, 30, Sex::Male).unwrap();
        let pct = params.percentile(params.mean, ReferenceMetric::BloodSugar.direction());
        assert!((pct - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_lower_is_better_inverts() {
        let params = lookup(ReferenceMetric::CardioFitness, 25, Sex::Male).unwrap();
        let fast = params.percentile(params.mean - 60.0, Direction::LowerIsBetter);
        let slow = params.percentile(params.mean + 60.0, Direction::LowerIsBetter);
        assert!(fast > 50.0);
        assert!(slow < 50.0);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let params = lookup(ReferenceMetric::BloodSugar, 30, Sex::Male).unwrap();
        let worst = params.percentile(70.0, Direction::LowerIsBetter);
        let best = params.percentile(3.5, Direction::LowerIsBetter);
        assert!((0.0..=100.0).contains(&worst));
        assert!((0.0..=100.0).contains(&best));
        assert!(worst < 0.001);
        assert!(best > 99.9);
    }

    #[rstest]
    #[case(18)]
    #[case(29)]
    #[case(30)]
    #[case(55)]
    #[case(70)]
    #[case(120)]
    fn test_supported_ages_resolve(#[case] age: u32) {
        assert!(lookup(ReferenceMetric::SleepScore, age, Sex::Female).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(17)]
    #[case(121)]
    fn test_unsupported_ages_fail(#[case] age: u32) {
        let err = lookup(ReferenceMetric::SleepScore, age, Sex::Female).unwrap_err();
        assert_eq!(err, EngineError::UnsupportedDemographic { age_years: age });
    }

    #[test]
    fn test_other_sex_is_midpoint() {
        let male = lookup(ReferenceMetric::CardioFitness, 25, Sex::Male).unwrap();
        let female = lookup(ReferenceMetric::CardioFitness, 25, Sex::Female).unwrap();
        let other = lookup(ReferenceMetric::CardioFitness, 25, Sex::Other).unwrap();
        assert_eq!(other.mean, (male.mean + female.mean) / 2.0);
        assert_eq!(other.std_dev, (male.std_dev + female.std_dev) / 2.0);
    }

    #[test]
    fn test_every_table_covers_full_age_range() {
        let metrics = [
            ReferenceMetric::CardioFitness,
            ReferenceMetric::RestingHeartRate,
            ReferenceMetric::RelativeStrength(StrengthExercise::Squat),
            ReferenceMetric::RelativeStrength(StrengthExercise::Bench),
            ReferenceMetric::BloodSugar,
            ReferenceMetric::CholesterolRatio,
            ReferenceMetric::SleepScore,
        ];
        for metric in metrics {
            for age in AGE_MIN..=AGE_MAX {
                assert!(
                    lookup(metric, age, Sex::Other).is_ok(),
                    "{metric:?} missing coverage at age {age}"
                );
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_percentile_always_in_range(value in -1.0e6f64..1.0e6) {
            let params = Params { mean: 100.0, std_dev: 15.0 };
            let pct = params.percentile(value, Direction::HigherIsBetter);
            prop_assert!((0.0..=100.0).contains(&pct));
        }

        #[test]
        fn prop_cdf_monotonic(a in -6.0f64..6.0, delta in 0.001f64..3.0) {
            prop_assert!(standard_normal_cdf(a + delta) >= standard_normal_cdf(a));
        }

        #[test]
        fn prop_lower_is_better_monotonic(value in 400.0f64..1200.0, delta in 0.1f64..200.0) {
            let params = Params { mean: 600.0, std_dev: 95.0 };
            let better = params.percentile(value - delta, Direction::LowerIsBetter);
            let worse = params.percentile(value, Direction::LowerIsBetter);
            prop_assert!(better >= worse);
        }
    }
}
