//! Words-per-minute calculation and banded evaluation.
//!
//! The read-aloud target is 150-160 WPM. Everything outside that band is
//! graded by distance from it, with a floor score of 10.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reading pace relative to the 150-160 WPM target band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WpmPerformance {
    TooSlow,
    BelowTarget,
    Ideal,
    AboveTarget,
    TooFast,
}

impl WpmPerformance {
    /// Classify a WPM reading.
    ///
    /// Bands: `[0,100)` too slow, `[100,150)` below target, `[150,160]`
    /// ideal, `(160,200)` above target, everything else too fast.
    pub fn classify(wpm: f64) -> Self {
        if (0.0..100.0).contains(&wpm) {
            WpmPerformance::TooSlow
        } else if (100.0..150.0).contains(&wpm) {
            WpmPerformance::BelowTarget
        } else if (150.0..=160.0).contains(&wpm) {
            WpmPerformance::Ideal
        } else if wpm > 160.0 && wpm < 200.0 {
            WpmPerformance::AboveTarget
        } else {
            WpmPerformance::TooFast
        }
    }
}

impl fmt::Display for WpmPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WpmPerformance::TooSlow => "too slow",
            WpmPerformance::BelowTarget => "below target",
            WpmPerformance::Ideal => "ideal",
            WpmPerformance::AboveTarget => "above target",
            WpmPerformance::TooFast => "too fast",
        };
        write!(f, "{}", label)
    }
}

/// Words per minute for `word_count` words read in `duration_secs` seconds.
///
/// A non-positive duration yields `0.0` rather than a division error.
pub fn calculate_wpm(word_count: usize, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 {
        return 0.0;
    }
    word_count as f64 / (duration_secs / 60.0)
}

/// Score a pace reading on a 10-100 scale centered on the ideal band.
///
/// Exactly 100 on `[150,160]`, falling off toward 10 on both sides.
/// Intermediate math is floating point; the result truncates toward zero.
pub fn wpm_score(wpm: f64) -> i32 {
    match WpmPerformance::classify(wpm) {
        WpmPerformance::Ideal => 100,
        WpmPerformance::BelowTarget => {
            let progress = (wpm - 100.0) / 50.0;
            (70.0 + progress * 25.0) as i32
        }
        WpmPerformance::AboveTarget => {
            let excess = (wpm - 160.0).min(40.0);
            let penalty = excess / 40.0 * 25.0;
            (95.0 - penalty) as i32
        }
        WpmPerformance::TooSlow => {
            let progress = (wpm / 100.0).min(1.0);
            (10.0 + progress * 60.0) as i32
        }
        WpmPerformance::TooFast => {
            let over = ((wpm - 200.0) / 10.0) as i32;
            (70 - over).max(10)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_calculate_wpm_basic() {
        assert_relative_eq!(calculate_wpm(150, 60.0), 150.0);
        assert_relative_eq!(calculate_wpm(300, 120.0), 150.0);
        assert_relative_eq!(calculate_wpm(80, 30.0), 160.0);
    }

    #[test]
    fn test_calculate_wpm_zero_duration() {
        assert_relative_eq!(calculate_wpm(100, 0.0), 0.0);
        assert_relative_eq!(calculate_wpm(100, -5.0), 0.0);
    }

    #[test]
    fn test_calculate_wpm_zero_words() {
        assert_relative_eq!(calculate_wpm(0, 60.0), 0.0);
    }

    #[test]
    fn test_classify_bands() {
        assert_eq!(WpmPerformance::classify(80.0), WpmPerformance::TooSlow);
        assert_eq!(WpmPerformance::classify(130.0), WpmPerformance::BelowTarget);
        assert_eq!(WpmPerformance::classify(155.0), WpmPerformance::Ideal);
        assert_eq!(WpmPerformance::classify(175.0), WpmPerformance::AboveTarget);
        assert_eq!(WpmPerformance::classify(220.0), WpmPerformance::TooFast);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(WpmPerformance::classify(0.0), WpmPerformance::TooSlow);
        assert_eq!(WpmPerformance::classify(100.0), WpmPerformance::BelowTarget);
        assert_eq!(WpmPerformance::classify(150.0), WpmPerformance::Ideal);
        // 160 belongs to the ideal band, not above-target.
        assert_eq!(WpmPerformance::classify(160.0), WpmPerformance::Ideal);
        assert_eq!(WpmPerformance::classify(160.1), WpmPerformance::AboveTarget);
        assert_eq!(WpmPerformance::classify(200.0), WpmPerformance::TooFast);
    }

    #[test]
    fn test_wpm_score_ideal_band() {
        assert_eq!(wpm_score(150.0), 100);
        assert_eq!(wpm_score(155.0), 100);
        assert_eq!(wpm_score(160.0), 100);
    }

    #[test]
    fn test_wpm_score_below_target() {
        assert_eq!(wpm_score(100.0), 70);
        assert_eq!(wpm_score(130.0), 85);
        // 70 + 25 * 49.9/50 = 94.95, truncated.
        assert_eq!(wpm_score(149.9), 94);
    }

    #[test]
    fn test_wpm_score_above_target() {
        // 95 - 25 * 1/40 = 94.375, truncated.
        assert_eq!(wpm_score(161.0), 94);
        assert_eq!(wpm_score(180.0), 82);
        assert_eq!(wpm_score(199.0), 70);
    }

    #[test]
    fn test_wpm_score_too_slow() {
        assert_eq!(wpm_score(0.0), 10);
        assert_eq!(wpm_score(50.0), 40);
        assert_eq!(wpm_score(99.9), 69);
    }

    #[test]
    fn test_wpm_score_too_fast() {
        assert_eq!(wpm_score(200.0), 70);
        assert_eq!(wpm_score(250.0), 65);
        assert_eq!(wpm_score(900.0), 10);
    }

    #[test]
    fn test_wpm_score_floor() {
        assert!(wpm_score(5000.0) >= 10);
        assert!(wpm_score(1.0) >= 10);
    }

    #[test]
    fn test_performance_display() {
        assert_eq!(WpmPerformance::BelowTarget.to_string(), "below target");
        assert_eq!(WpmPerformance::Ideal.to_string(), "ideal");
    }
}
