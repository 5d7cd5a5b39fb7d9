//! End-to-end tests: profile + readings through compute_percentiles and
//! assess_risk, including the combined wire document callers serialize.

use serde_json::json;
use vitals_engine::{
    assess_risk, compute_percentiles, Cholesterol, EngineError, MetricReadings, RiskLevel, Sex,
    Sleep, StrengthExercise, StrengthMeasurement, StrengthTraining, SubjectProfile,
};

fn sample_profile() -> SubjectProfile {
    SubjectProfile {
        age_years: 30,
        sex: Sex::Male,
        body_weight: 180.0,
    }
}

fn sample_readings() -> MetricReadings {
    MetricReadings {
        cardio_fitness: Some(450.0),
        heart_rate: Some(62.0),
        strength_training: Some(StrengthTraining {
            exercise: StrengthExercise::Squat,
            measurement: StrengthMeasurement::OneRepMax { one_rep_max: 225.0 },
        }),
        blood_sugar: Some(6.0),
        cholesterol: Some(Cholesterol {
            total: 200.0,
            hdl: 50.0,
        }),
        sleep: Some(Sleep {
            duration: 7.5,
            efficiency: 0.92,
            rem: 0.22,
            deep: 0.18,
        }),
    }
}

#[test]
fn full_pipeline_round_trip_is_deterministic() {
    let profile = sample_profile();
    let readings = sample_readings();

    let first = compute_percentiles(&profile, &readings).unwrap();
    let first_risk = assess_risk(&first.percentiles);
    let second = compute_percentiles(&profile, &readings).unwrap();
    let second_risk = assess_risk(&second.percentiles);

    assert_eq!(first, second);
    assert_eq!(first_risk, second_risk);
}

#[test]
fn full_pipeline_produces_bounded_results() {
    let outcome = compute_percentiles(&sample_profile(), &sample_readings()).unwrap();

    assert_eq!(outcome.percentiles.values().count(), 6);
    for pct in outcome.percentiles.values() {
        assert!((0.0..=100.0).contains(&pct));
    }

    let risk = assess_risk(&outcome.percentiles);
    assert!((0.0..=100.0).contains(&risk.score));
    assert!((risk.score + risk.average_risk - 100.0).abs() < 1e-9);
}

#[test]
fn combined_document_has_expected_shape() {
    // The document shape the HTTP collaborator serializes for callers
    let outcome = compute_percentiles(&sample_profile(), &sample_readings()).unwrap();
    let risk = assess_risk(&outcome.percentiles);

    let document = json!({
        "percentiles": outcome.percentiles,
        "calculatedValues": outcome.calculated_values,
        "overallHealthRisk": risk,
    });

    assert!(document["percentiles"]["bloodSugar"].is_number());
    assert!(document["percentiles"]["strength"].is_number());
    assert_eq!(document["calculatedValues"]["oneRepMax"], 225.0);
    assert!(document["calculatedValues"]["sleepScore"].is_number());
    assert!(document["overallHealthRisk"]["score"].is_number());
    assert!(document["overallHealthRisk"]["averageRisk"].is_number());
    assert!(document["overallHealthRisk"]["level"].is_string());
}

#[test]
fn goal_document_round_trips_through_same_engine() {
    // Goals are the same reading shapes; editing a goal re-runs the
    // engine on the stored document.
    let profile = sample_profile();
    let goal_readings = MetricReadings {
        cardio_fitness: Some(420.0),
        strength_training: Some(StrengthTraining {
            exercise: StrengthExercise::Squat,
            measurement: StrengthMeasurement::OneRepMax { one_rep_max: 275.0 },
        }),
        blood_sugar: Some(5.2),
        ..Default::default()
    };

    let current = compute_percentiles(&profile, &sample_readings()).unwrap();
    let goal = compute_percentiles(&profile, &goal_readings).unwrap();

    // The goal targets strictly better readings, so its standing is higher
    let current_risk = assess_risk(&current.percentiles);
    let goal_risk = assess_risk(&goal.percentiles);
    assert!(goal.percentiles.blood_sugar > current.percentiles.blood_sugar);
    assert!(goal_risk.score > current_risk.score);
}

#[test]
fn profile_from_birth_date_feeds_pipeline() {
    let dob = chrono::NaiveDate::from_ymd_opt(1996, 3, 14).unwrap();
    let profile = SubjectProfile::from_birth_date(dob, Sex::Female, 145.0).unwrap();
    assert!(profile.age_years >= 18);

    let readings = MetricReadings {
        heart_rate: Some(58.0),
        ..Default::default()
    };
    let outcome = compute_percentiles(&profile, &readings).unwrap();
    assert!(outcome.percentiles.heart_rate.is_some());
}

#[test]
fn invalid_reading_fails_whole_call() {
    let readings = MetricReadings {
        blood_sugar: Some(2.0),
        sleep: Some(Sleep {
            duration: 8.0,
            efficiency: 0.9,
            rem: 0.2,
            deep: 0.2,
        }),
        ..Default::default()
    };
    let err = compute_percentiles(&sample_profile(), &readings).unwrap_err();
    assert!(matches!(err, EngineError::InvalidMetricRange { .. }));
}

#[test]
fn empty_assessment_is_lowest_tier() {
    let outcome =
        compute_percentiles(&sample_profile(), &MetricReadings::default()).unwrap();
    let risk = assess_risk(&outcome.percentiles);
    assert_eq!(risk.score, 0.0);
    assert_eq!(risk.average_risk, 100.0);
    assert_eq!(risk.level, RiskLevel::Starting);
    assert!(risk.level.description().contains("Starting"));
}
