use super::types::{HealthTag, MacroSplit, NutritionFacts};

/// Health score on a 0-100 scale, starting from 100. Penalties for sodium,
/// sugar, saturated fat (each capped) and trans fat (uncapped), small
/// bonuses for fiber and protein. Clamped and rounded to an integer.
pub fn health_score(n: &NutritionFacts) -> u8 {
    let mut score = 100.0_f64;

    if n.sodium > 500.0 {
        score -= ((n.sodium - 500.0) / 20.0).min(30.0);
    }
    if n.sugars > 10.0 {
        score -= ((n.sugars - 10.0) * 2.0).min(20.0);
    }
    if n.saturated_fat > 5.0 {
        score -= ((n.saturated_fat - 5.0) * 3.0).min(20.0);
    }
    if n.trans_fat > 0.0 {
        score -= n.trans_fat * 10.0;
    }
    if n.fiber > 3.0 {
        score += ((n.fiber - 3.0) * 2.0).min(10.0);
    }
    if n.protein > 5.0 {
        score += (n.protein - 5.0).min(10.0);
    }

    score.round().clamp(0.0, 100.0) as u8
}

/// Tag is a pure function of the score: avoid below 40, risky below 70.
pub fn health_tag(score: u8) -> HealthTag {
    if score < 40 {
        HealthTag::Avoid
    } else if score < 70 {
        HealthTag::Risky
    } else {
        HealthTag::Healthy
    }
}

/// Percentage-of-calories split across the three macros (4 cal/g for carbs
/// and protein, 9 cal/g for fat). Percentages are rounded independently and
/// need not sum to 100. An all-zero macro profile yields 0/0/0 rather than
/// dividing by zero.
pub fn macro_split(n: &NutritionFacts) -> MacroSplit {
    let carb_cal = n.total_carbs * 4.0;
    let protein_cal = n.protein * 4.0;
    let fat_cal = n.total_fat * 9.0;
    let total = carb_cal + protein_cal + fat_cal;

    if total <= 0.0 {
        return MacroSplit {
            carbs: 0,
            protein: 0,
            fat: 0,
        };
    }

    MacroSplit {
        carbs: (carb_cal / total * 100.0).round() as u8,
        protein: (protein_cal / total * 100.0).round() as u8,
        fat: (fat_cal / total * 100.0).round() as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrition() -> NutritionFacts {
        NutritionFacts::default()
    }

    #[test]
    fn benign_inputs_take_no_penalty() {
        let mut n = nutrition();
        n.sodium = 500.0;
        n.sugars = 10.0;
        n.saturated_fat = 5.0;
        n.trans_fat = 0.0;
        assert_eq!(health_score(&n), 100);
    }

    #[test]
    fn bonuses_cannot_push_past_100() {
        let mut n = nutrition();
        n.fiber = 20.0;
        n.protein = 40.0;
        assert_eq!(health_score(&n), 100);
    }

    #[test]
    fn trans_fat_penalty_is_unbounded_but_score_clamps_at_zero() {
        let mut n = nutrition();
        n.trans_fat = 50.0;
        assert_eq!(health_score(&n), 0);
    }

    #[test]
    fn sodium_penalty_is_capped_at_30() {
        let mut n = nutrition();
        n.sodium = 10_000.0;
        assert_eq!(health_score(&n), 70);
    }

    #[test]
    fn sugar_and_saturated_fat_penalties_apply() {
        let mut n = nutrition();
        n.sugars = 15.0; // -10
        n.saturated_fat = 7.0; // -6
        assert_eq!(health_score(&n), 84);
    }

    #[test]
    fn tag_thresholds_are_exact() {
        assert_eq!(health_tag(39), HealthTag::Avoid);
        assert_eq!(health_tag(40), HealthTag::Risky);
        assert_eq!(health_tag(69), HealthTag::Risky);
        assert_eq!(health_tag(70), HealthTag::Healthy);
        assert_eq!(health_tag(0), HealthTag::Avoid);
        assert_eq!(health_tag(100), HealthTag::Healthy);
    }

    #[test]
    fn macro_split_rounds_each_share_independently() {
        let mut n = nutrition();
        n.total_carbs = 63.7; // 254.8 cal
        n.protein = 11.5; // 46.0 cal
        n.total_fat = 7.1; // 63.9 cal, total 364.7
        let m = macro_split(&n);
        assert_eq!(m.carbs, 70);
        assert_eq!(m.protein, 13);
        assert_eq!(m.fat, 18);
    }

    #[test]
    fn zero_macros_yield_zero_split() {
        let m = macro_split(&nutrition());
        assert_eq!(
            m,
            MacroSplit {
                carbs: 0,
                protein: 0,
                fat: 0
            }
        );
    }
}
