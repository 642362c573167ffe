//! Daily goal calculation
//!
//! Harris-Benedict basal rate estimate and the fixed macro split used to
//! derive a user's daily targets.

use crate::error::{ValidationError, ValidationResult};
use crate::models::{Gender, GoalDirection, MacroTargets};

/// Default age used when a caller has no age on record
pub const DEFAULT_AGE: i32 = 25;

/// Kcal per gram of protein and carbohydrate
const KCAL_PER_G_PROTEIN_CARB: f64 = 4.0;
/// Kcal per gram of fat
const KCAL_PER_G_FAT: f64 = 9.0;
/// Share of the calorie target allotted to fat
const FAT_ENERGY_SHARE: f64 = 0.25;

/// Estimated baseline daily energy expenditure in kcal.
///
/// Male profiles use the male Harris-Benedict variant; female and other
/// profiles share the female variant.
pub fn basal_rate(weight_kg: f64, height_cm: i32, age: i32, gender: Gender) -> f64 {
    let height = f64::from(height_cm);
    let age = f64::from(age);
    match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height - 5.677 * age,
        Gender::Female | Gender::Other => {
            447.593 + 9.247 * weight_kg + 3.098 * height - 4.330 * age
        }
    }
}

/// Daily calorie target: basal rate scaled by the goal direction,
/// rounded up to the next whole kcal.
pub fn energy_target(basal: f64, direction: GoalDirection) -> f64 {
    let scaled = match direction {
        GoalDirection::Maintain => basal,
        GoalDirection::Lose => basal * 0.9,
        GoalDirection::Gain => basal * 1.06,
    };
    scaled.ceil()
}

/// Daily protein target in grams: 2g per kg of body weight
pub fn protein_target(weight_kg: f64) -> f64 {
    2.0 * weight_kg
}

/// Daily fat target in grams: 25% of the calorie target, rounded down
pub fn fat_target(energy_kcal: f64) -> f64 {
    (energy_kcal * FAT_ENERGY_SHARE / KCAL_PER_G_FAT).floor()
}

/// Daily carbohydrate target in grams: calories left after protein and
/// fat, rounded down
pub fn carb_target(energy_kcal: f64, protein_g: f64, fat_g: f64) -> f64 {
    let remaining =
        energy_kcal - (protein_g * KCAL_PER_G_PROTEIN_CARB + fat_g * KCAL_PER_G_FAT);
    (remaining / KCAL_PER_G_PROTEIN_CARB).floor()
}

/// Compute the full set of daily targets for a profile.
///
/// Rejects a non-positive age. The weight is the caller's responsibility;
/// profiles pass their most recent weight-history entry.
pub fn macro_targets(
    weight_kg: f64,
    height_cm: i32,
    age: i32,
    gender: Gender,
    direction: GoalDirection,
) -> ValidationResult<MacroTargets> {
    if age <= 0 {
        return Err(ValidationError::invalid("age must be positive"));
    }

    let energy = energy_target(basal_rate(weight_kg, height_cm, age, gender), direction);
    let protein = protein_target(weight_kg);
    let fat = fat_target(energy);
    let carbs = carb_target(energy, protein, fat);

    MacroTargets::new(energy, protein, carbs, fat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basal_rate_male_reference() {
        // 88.362 + 13.397*70 + 4.799*175 - 5.677*25 = 1705.154
        let bmr = basal_rate(70.0, 175, 25, Gender::Male);
        assert!((bmr - 1705.154).abs() < 1e-9);
    }

    #[test]
    fn test_basal_rate_other_uses_female_variant() {
        let female = basal_rate(60.0, 165, 30, Gender::Female);
        let other = basal_rate(60.0, 165, 30, Gender::Other);
        assert_eq!(female, other);
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*30
        assert!((female - 1383.683).abs() < 1e-9);
    }

    #[test]
    fn test_energy_target_by_direction() {
        let bmr = basal_rate(70.0, 175, 25, Gender::Male);
        assert_eq!(energy_target(bmr, GoalDirection::Maintain), 1706.0);
        assert_eq!(energy_target(bmr, GoalDirection::Lose), 1535.0);
        assert_eq!(energy_target(bmr, GoalDirection::Gain), 1808.0);
    }

    #[test]
    fn test_protein_target_is_two_grams_per_kg() {
        assert_eq!(protein_target(70.0), 140.0);
        assert_eq!(protein_target(82.5), 165.0);
    }

    #[test]
    fn test_fat_and_carb_targets_rounded_down() {
        // floor(1706 * 0.25 / 9) = 47
        assert_eq!(fat_target(1706.0), 47.0);
        // floor((1706 - (140*4 + 47*9)) / 4) = floor(723 / 4) = 180
        assert_eq!(carb_target(1706.0, 140.0, 47.0), 180.0);
    }

    #[test]
    fn test_macro_targets_reference_profile() {
        let targets =
            macro_targets(70.0, 175, 25, Gender::Male, GoalDirection::Maintain).unwrap();
        assert_eq!(targets.energy_kcal(), 1706.0);
        assert_eq!(targets.protein_g(), 140.0);
        assert_eq!(targets.fat_g(), 47.0);
        assert_eq!(targets.carbs_g(), 180.0);
    }

    #[test]
    fn test_rejects_non_positive_age() {
        assert!(macro_targets(70.0, 175, 0, Gender::Male, GoalDirection::Maintain).is_err());
        assert!(macro_targets(70.0, 175, -5, Gender::Male, GoalDirection::Maintain).is_err());
    }
}
