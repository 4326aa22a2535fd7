//! Score calculation and achievement rules.

use std::ops::RangeInclusive;

use lectern_metrics::{Achievement, GameScore, ReadingMetrics};
use tracing::debug;

/// WPM band that earns a full speed score.
const IDEAL_WPM: RangeInclusive<f64> = 150.0..=160.0;
/// WPM band that still earns a scaled speed score.
const ACCEPTABLE_WPM: RangeInclusive<f64> = 120.0..=180.0;

/// Compute the full game score for one session's metrics.
///
/// Sub-scores land on a 0-100 scale and the overall score is their
/// rounded mean. Achievement rules run against the finished sub-scores.
pub fn calculate_score(metrics: &ReadingMetrics) -> GameScore {
    let accuracy_score = rate_score(metrics.accuracy);
    let speed_score = speed_score(metrics.wpm);
    let completion_score = rate_score(metrics.completion_rate);

    let overall_score =
        ((accuracy_score + speed_score + completion_score) as f64 / 3.0).round() as i32;

    let mut score = GameScore {
        overall_score,
        accuracy_score,
        speed_score,
        completion_score,
        achievements: Vec::new(),
    };
    score.achievements = check_achievements(&score);

    debug!(
        overall = score.overall_score,
        accuracy = score.accuracy_score,
        speed = score.speed_score,
        completion = score.completion_score,
        achievements = score.achievements.len(),
        "scored session"
    );

    score
}

/// Speed sub-score on a 10-100 scale.
///
/// Full marks inside the ideal band, a scaled fall-off through the
/// acceptable band, and a proportional score with a floor of 10 outside.
pub fn speed_score(wpm: f64) -> i32 {
    if IDEAL_WPM.contains(&wpm) {
        return 100;
    }

    if ACCEPTABLE_WPM.contains(&wpm) {
        let distance_from_ideal = (wpm - IDEAL_WPM.start())
            .abs()
            .min((wpm - IDEAL_WPM.end()).abs());
        let max_distance = (IDEAL_WPM.start() - ACCEPTABLE_WPM.start())
            .max(ACCEPTABLE_WPM.end() - IDEAL_WPM.end());
        let score = 100 - (distance_from_ideal / max_distance * 30.0) as i32;
        return score.max(70);
    }

    if wpm < *ACCEPTABLE_WPM.start() {
        ((wpm / ACCEPTABLE_WPM.start() * 70.0) as i32).max(10)
    } else {
        ((ACCEPTABLE_WPM.end() / wpm * 70.0) as i32).max(10)
    }
}

/// Evaluate the achievement rules against a computed score.
///
/// Rules run in a fixed order and every match fires. Each emission
/// carries a fresh id and timestamp; duplicates across sessions are the
/// caller's concern.
pub fn check_achievements(score: &GameScore) -> Vec<Achievement> {
    let mut achievements = Vec::new();

    if score.accuracy_score >= 95 {
        achievements.push(Achievement::new(
            "Word Perfect",
            "Achieved 95%+ accuracy",
            "star.fill",
        ));
    }

    if score.speed_score >= 95 {
        achievements.push(Achievement::new(
            "Speed Reader",
            "Hit the ideal reading speed",
            "bolt.fill",
        ));
    }

    if score.completion_score == 100 {
        achievements.push(Achievement::new(
            "Finisher",
            "Read the entire text",
            "checkmark.circle.fill",
        ));
    }

    if score.overall_score >= 90 {
        achievements.push(Achievement::new(
            "Reading Master",
            "Excellent overall performance",
            "crown.fill",
        ));
    }

    if score.accuracy_score >= 80 && score.speed_score >= 80 && score.completion_score >= 80 {
        achievements.push(Achievement::new(
            "Well Rounded",
            "Good performance in all areas",
            "circle.hexagongrid.fill",
        ));
    }

    // Unconditional
    achievements.push(Achievement::new(
        "First Steps",
        "Completed your first reading session",
        "figure.walk",
    ));

    if score.accuracy_score == 100 && score.completion_score == 100 {
        achievements.push(Achievement::new(
            "Perfectionist",
            "Perfect accuracy and completion",
            "diamond.fill",
        ));
    }

    if score.speed_score >= 90 && score.accuracy_score >= 85 {
        achievements.push(Achievement::new(
            "Speed Demon",
            "Fast and accurate reading",
            "flame.fill",
        ));
    }

    achievements
}

fn rate_score(rate: f64) -> i32 {
    (rate * 100.0).round() as i32
}
