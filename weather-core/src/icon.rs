use serde::{Deserialize, Serialize};

/// Display category for a feels-like temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconCategory {
    Scorching,
    Hot,
    Mild,
    Cool,
    Freezing,
}

impl IconCategory {
    /// Classify a feels-like temperature in °C.
    ///
    /// Thresholds are strict: exactly 30.0 is `Hot`, exactly 0.0 is
    /// `Freezing`. Everything at or below zero, including NaN, is `Freezing`.
    pub fn classify(feels_like_c: f64) -> Self {
        if feels_like_c > 30.0 {
            IconCategory::Scorching
        } else if feels_like_c > 20.0 {
            IconCategory::Hot
        } else if feels_like_c > 10.0 {
            IconCategory::Mild
        } else if feels_like_c > 0.0 {
            IconCategory::Cool
        } else {
            IconCategory::Freezing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::Scorching => "scorching",
            IconCategory::Hot => "hot",
            IconCategory::Mild => "mild",
            IconCategory::Cool => "cool",
            IconCategory::Freezing => "freezing",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::Scorching => "🔥",
            IconCategory::Hot => "☀️",
            IconCategory::Mild => "🌤️",
            IconCategory::Cool => "💧",
            IconCategory::Freezing => "❄️",
        }
    }

    pub const fn all() -> &'static [IconCategory] {
        &[
            IconCategory::Scorching,
            IconCategory::Hot,
            IconCategory::Mild,
            IconCategory::Cool,
            IconCategory::Freezing,
        ]
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`IconCategory::classify`].
pub fn classify(feels_like_c: f64) -> IconCategory {
    IconCategory::classify(feels_like_c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rank(category: IconCategory) -> u8 {
        match category {
            IconCategory::Freezing => 0,
            IconCategory::Cool => 1,
            IconCategory::Mild => 2,
            IconCategory::Hot => 3,
            IconCategory::Scorching => 4,
        }
    }

    proptest! {
        #[test]
        fn classify_never_decreases_as_temperature_rises(
            a in -1.0e6f64..1.0e6,
            b in -1.0e6f64..1.0e6,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(classify(lo)) <= rank(classify(hi)));
        }

        #[test]
        fn classify_is_total_over_real_inputs(
            t in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
        ) {
            prop_assert!(IconCategory::all().contains(&classify(t)));
        }
    }

    #[test]
    fn boundaries_are_strict() {
        assert_eq!(classify(30.0), IconCategory::Hot);
        assert_eq!(classify(20.0), IconCategory::Mild);
        assert_eq!(classify(10.0), IconCategory::Cool);
        assert_eq!(classify(0.0), IconCategory::Freezing);
    }

    #[test]
    fn just_above_boundaries() {
        assert_eq!(classify(30.0001), IconCategory::Scorching);
        assert_eq!(classify(20.5), IconCategory::Hot);
        assert_eq!(classify(10.1), IconCategory::Mild);
        assert_eq!(classify(0.01), IconCategory::Cool);
    }

    #[test]
    fn extreme_cold_folds_into_freezing() {
        assert_eq!(classify(-0.5), IconCategory::Freezing);
        assert_eq!(classify(-10.0), IconCategory::Freezing);
        assert_eq!(classify(-50.0), IconCategory::Freezing);
        assert_eq!(classify(f64::NEG_INFINITY), IconCategory::Freezing);
    }

    #[test]
    fn non_finite_inputs_are_classified() {
        assert_eq!(classify(f64::INFINITY), IconCategory::Scorching);
        assert_eq!(classify(f64::NAN), IconCategory::Freezing);
    }

    #[test]
    fn every_category_has_distinct_glyph() {
        let mut glyphs: Vec<_> = IconCategory::all().iter().map(|c| c.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), IconCategory::all().len());
    }
}
