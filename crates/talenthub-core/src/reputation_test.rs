use super::*;

#[test]
fn total_score_is_clamped_to_max() {
    for raw in 0..=2000 {
        let summary = derive_reputation(raw, vec![]);
        assert_eq!(summary.total_score, raw.min(1000), "raw score {raw}");
    }
}

#[test]
fn level_thresholds() {
    let cases = [
        (0, Level::Bronze),
        (99, Level::Bronze),
        (100, Level::Silver),
        (499, Level::Silver),
        (500, Level::Gold),
        (999, Level::Gold),
        (1000, Level::Platinum),
    ];
    for (score, expected) in cases {
        assert_eq!(derive_reputation(score, vec![]).level, expected, "score {score}");
    }
}

#[test]
fn level_depends_only_on_total_score() {
    let a = derive_reputation(1500, vec!["early_adopter".to_string()]);
    let b = derive_reputation(1000, vec![]);
    assert_eq!(a.total_score, b.total_score);
    assert_eq!(a.level, b.level);
}

#[test]
fn level_for_score_matches_min_score_table() {
    for score in 0..=1000 {
        let level = Level::for_score(score);
        assert!(score >= level.min_score());
        if let Some(next) = level.next() {
            assert!(score < next.min_score(), "score {score} should be below {next}");
        }
    }
}

#[test]
fn ratings_count_never_below_one() {
    for score in 0..=1000 {
        assert!(derive_reputation(score, vec![]).ratings_count >= 1);
    }
    assert_eq!(derive_reputation(0, vec![]).ratings_count, 1);
    assert_eq!(derive_reputation(49, vec![]).ratings_count, 1);
    assert_eq!(derive_reputation(50, vec![]).ratings_count, 1);
    assert_eq!(derive_reputation(100, vec![]).ratings_count, 2);
    assert_eq!(derive_reputation(1000, vec![]).ratings_count, 20);
}

#[test]
fn average_rating_stays_in_range() {
    for score in 0..=2000 {
        let avg = derive_reputation(score, vec![]).average_rating;
        assert!((1.0..=5.0).contains(&avg), "score {score} gave {avg}");
    }
}

#[test]
fn average_rating_values() {
    // 0 / 10 = 0.0, clamped up to 1.0
    assert!((derive_reputation(0, vec![]).average_rating - 1.0).abs() < f64::EPSILON);
    // 12 / 10 = 1.2
    assert!((derive_reputation(12, vec![]).average_rating - 1.2).abs() < 1e-9);
    // 37 / 10 = 3.7
    assert!((derive_reputation(37, vec![]).average_rating - 3.7).abs() < 1e-9);
    // 99 / 10 = 9.9, clamped down to 5.0
    assert!((derive_reputation(99, vec![]).average_rating - 5.0).abs() < f64::EPSILON);
    // 1000 / 200 = 5.0
    assert!((derive_reputation(1000, vec![]).average_rating - 5.0).abs() < f64::EPSILON);
}

#[test]
fn average_rating_rounds_half_up() {
    // 25 / 10 = 2.5 exactly, one decimal already
    assert!((derive_reputation(25, vec![]).average_rating - 2.5).abs() < 1e-9);
    // 31 / 10 = 3.1
    assert!((derive_reputation(31, vec![]).average_rating - 3.1).abs() < 1e-9);
}

#[test]
fn badges_pass_through_unchanged() {
    let badges = vec![
        "verified".to_string(),
        "top_rated".to_string(),
        "verified".to_string(),
    ];
    let summary = derive_reputation(10, badges.clone());
    assert_eq!(summary.badges, badges);
}

#[test]
fn rating_submission_adds_ten_per_star() {
    assert_eq!(apply_rating_submission(0, 1).unwrap(), 10);
    assert_eq!(apply_rating_submission(120, 3).unwrap(), 150);
}

#[test]
fn rating_submission_caps_at_max() {
    assert_eq!(apply_rating_submission(950, 5).unwrap(), 1000);
    assert_eq!(apply_rating_submission(990, 5).unwrap(), 1000);
    assert_eq!(apply_rating_submission(1000, 1).unwrap(), 1000);
    assert_eq!(apply_rating_submission(u32::MAX, 5).unwrap(), 1000);
}

#[test]
fn rating_submission_rejects_out_of_range() {
    for current in [0, 500, 1000] {
        assert!(matches!(
            apply_rating_submission(current, 0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            apply_rating_submission(current, 6),
            Err(CoreError::Validation(_))
        ));
    }
}

#[test]
fn self_rating_is_refused() {
    assert!(!can_rate("GABC", "GABC"));
    assert!(can_rate("GABC", "GXYZ"));
    assert!(matches!(
        ensure_can_rate("GABC", "GABC"),
        Err(CoreError::Permission(_))
    ));
    assert!(ensure_can_rate("GABC", "GXYZ").is_ok());
}

#[test]
fn progress_to_next_level() {
    let bronze = derive_reputation(50, vec![]);
    assert!((bronze.progress_to_next_level().unwrap() - 50.0).abs() < 1e-9);

    let silver = derive_reputation(250, vec![]);
    assert!((silver.progress_to_next_level().unwrap() - 50.0).abs() < 1e-9);

    let platinum = derive_reputation(1000, vec![]);
    assert!(platinum.progress_to_next_level().is_none());
}

#[test]
fn level_catalogue() {
    assert_eq!(Level::Gold.label(), "Gold");
    assert_eq!(Level::Gold.to_string(), "gold");
    assert_eq!(Level::Bronze.benefits().len(), 2);
    assert!(Level::Platinum.benefits().contains(&"Premium features"));
    assert_eq!(Level::Platinum.next(), None);
}

#[test]
fn summary_serializes_level_lowercase() {
    let summary = derive_reputation(600, vec![]);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["level"], "gold");
    assert_eq!(json["total_score"], 600);
}
