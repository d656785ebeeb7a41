//! Voltage to emotion-index conversion
//!
//! A piezo strike produces a peak voltage; the installation converts it to a
//! "negative emotion index" that seeds the game budget. The curve is
//! quadratic so harder hits pay off disproportionately, with a floor below
//! which the reading counts as noise and a cap so one heroic strike cannot
//! make the game unwinnable by length.

use serde::{Deserialize, Serialize};

/// Converts a peak sensor voltage into the budget a session starts with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionCalculator {
    /// Readings at or below this are treated as noise and map to zero
    pub min_voltage_threshold: f32,
    /// Hard cap on the emotion index
    pub max_emotion_value: u32,
}

impl Default for EmotionCalculator {
    fn default() -> Self {
        Self {
            min_voltage_threshold: 0.01,
            max_emotion_value: 1000,
        }
    }
}

impl EmotionCalculator {
    pub fn new(min_voltage_threshold: f32, max_emotion_value: u32) -> Self {
        Self {
            min_voltage_threshold,
            max_emotion_value,
        }
    }

    /// Map a peak voltage to a negative-emotion index.
    ///
    /// Sub-threshold readings yield zero. Above threshold the index grows as
    /// `((v * 5)^2) * 100`, clamped to `max_emotion_value`.
    pub fn negative_emotion_index(&self, voltage: f32) -> u32 {
        if voltage <= self.min_voltage_threshold || !voltage.is_finite() {
            return 0;
        }
        let scaled = (voltage * 5.0).powi(2) * 100.0;
        if scaled >= self.max_emotion_value as f32 {
            self.max_emotion_value
        } else {
            scaled as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_threshold_is_noise() {
        let calc = EmotionCalculator::default();
        assert_eq!(calc.negative_emotion_index(0.0), 0);
        assert_eq!(calc.negative_emotion_index(0.01), 0);
        assert_eq!(calc.negative_emotion_index(-1.0), 0);
    }

    #[test]
    fn test_quadratic_growth() {
        let calc = EmotionCalculator::default();
        // (0.2 * 5)^2 * 100 = 100
        assert_eq!(calc.negative_emotion_index(0.2), 100);
        // (0.4 * 5)^2 * 100 = 400: double the voltage, four times the index
        assert_eq!(calc.negative_emotion_index(0.4), 400);
    }

    #[test]
    fn test_cap() {
        let calc = EmotionCalculator::default();
        // (0.7 * 5)^2 * 100 = 1225, above the cap
        assert_eq!(calc.negative_emotion_index(0.7), 1000);
        assert_eq!(calc.negative_emotion_index(100.0), 1000);
    }

    #[test]
    fn test_non_finite_reads_are_zero() {
        let calc = EmotionCalculator::default();
        assert_eq!(calc.negative_emotion_index(f32::NAN), 0);
        assert_eq!(calc.negative_emotion_index(f32::INFINITY), 0);
    }

    #[test]
    fn test_custom_bounds() {
        let calc = EmotionCalculator::new(0.1, 500);
        assert_eq!(calc.negative_emotion_index(0.05), 0);
        assert_eq!(calc.negative_emotion_index(0.5), 500);
    }
}
