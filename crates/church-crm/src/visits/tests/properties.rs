use super::common::*;
use crate::visits::rating::{
    calculate_visit_rating, hospitality_description, mission_openness_description,
    WeightingScheme,
};

const OFFERINGS: [f64; 8] = [0.0, 1.0, 250.0, 500.0, 1_000.0, 2_000.0, 9_999.5, -40.0];
const HEADCOUNTS: [i64; 5] = [0, 1, 15, 80, 400];

#[test]
fn scores_stay_within_bounds_across_input_space() {
    for mission_openness in -1..=6 {
        for hospitality in -1..=6 {
            for offerings in OFFERINGS {
                for attendees in HEADCOUNTS {
                    let result = calculate_visit_rating(&observation(
                        mission_openness,
                        hospitality,
                        offerings,
                        120,
                        attendees,
                    ));
                    assert!((1..=5).contains(&result.star_rating), "{result:?}");
                    assert!(
                        (0.0..=5.0).contains(&result.financial_score),
                        "{result:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn identical_input_yields_identical_output() {
    let visit = observation(4, 3, 500.0, 100, 80);

    let first = serde_json::to_vec(&calculate_visit_rating(&visit)).expect("serializes");
    let second = serde_json::to_vec(&calculate_visit_rating(&visit)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn zero_offering_score_ignores_headcounts() {
    for mission_openness in 1..=5 {
        for hospitality in 1..=5 {
            let baseline =
                calculate_visit_rating(&observation(mission_openness, hospitality, 0.0, 10, 5));

            for members in HEADCOUNTS {
                for attendees in HEADCOUNTS {
                    let result = calculate_visit_rating(&observation(
                        mission_openness,
                        hospitality,
                        0.0,
                        members,
                        attendees,
                    ));
                    assert_eq!(result.financial_score, 0.0);
                    assert_eq!(result.breakdown.financial, 0.0);
                    assert_eq!(result.weighting, WeightingScheme::NoOffering);
                    assert_eq!(result.star_rating, baseline.star_rating);
                }
            }
        }
    }
}

#[test]
fn missionary_bonus_is_always_zero() {
    for count in [0, 1, 3, 25, 1_000] {
        let mut visit = observation(5, 5, 2_000.0, 200, 150);
        visit.missionary_support_count = count;
        let result = calculate_visit_rating(&visit);
        assert_eq!(result.missionary_bonus, 0.0);
        assert_eq!(result.breakdown.missionary_bonus, 0.0);
    }
}

#[test]
fn raising_subjective_ratings_never_lowers_stars() {
    for offerings in OFFERINGS {
        for fixed in 1..=5 {
            let mut previous_by_mission = 0;
            let mut previous_by_hospitality = 0;
            for rating in 1..=5 {
                let by_mission =
                    calculate_visit_rating(&observation(rating, fixed, offerings, 100, 80))
                        .star_rating;
                let by_hospitality =
                    calculate_visit_rating(&observation(fixed, rating, offerings, 100, 80))
                        .star_rating;

                assert!(by_mission >= previous_by_mission);
                assert!(by_hospitality >= previous_by_hospitality);
                previous_by_mission = by_mission;
                previous_by_hospitality = by_hospitality;
            }
        }
    }
}

#[test]
fn raising_offering_per_person_never_lowers_financial_score() {
    let mut previous = 0.0;
    for per_person in [0.0, 0.5, 5.99, 6.0, 6.25, 16.9, 17.0, 33.0, 34.0, 66.0, 67.0, 500.0] {
        let result = calculate_visit_rating(&observation(3, 3, per_person * 50.0, 60, 50));
        assert!(
            result.financial_score >= previous,
            "{per_person} per person scored {} after {previous}",
            result.financial_score
        );
        previous = result.financial_score;
    }
}

#[test]
fn reference_scenarios_score_as_documented() {
    let lowest = calculate_visit_rating(&observation(1, 1, 0.0, 10, 5));
    assert_eq!(lowest.star_rating, 1);
    assert_eq!(lowest.financial_score, 0.0);

    let tier_boundary = calculate_visit_rating(&observation(4, 3, 500.0, 100, 80));
    assert!(tier_boundary.financial_score > 0.0);
    assert!(tier_boundary.financial_score < 5.0);
}

#[test]
fn description_sentinels() {
    assert_eq!(mission_openness_description(0), "");
    assert_eq!(hospitality_description(6), "");
    assert!(!mission_openness_description(3).is_empty());
}
