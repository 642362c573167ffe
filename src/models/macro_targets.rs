//! Daily macro targets
//!
//! Immutable daily calorie and macronutrient targets for a user.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// One day's calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    energy_kcal: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

impl MacroTargets {
    /// Create new targets, rejecting any negative value
    pub fn new(
        energy_kcal: f64,
        protein_g: f64,
        carbs_g: f64,
        fat_g: f64,
    ) -> ValidationResult<Self> {
        let fields = [
            ("calorie target", energy_kcal),
            ("protein target", protein_g),
            ("carbohydrate target", carbs_g),
            ("fat target", fat_g),
        ];
        for (name, value) in fields {
            if value < 0.0 {
                return Err(ValidationError::invalid(format!(
                    "{name} cannot be negative"
                )));
            }
        }
        Ok(Self {
            energy_kcal,
            protein_g,
            carbs_g,
            fat_g,
        })
    }

    pub fn energy_kcal(&self) -> f64 {
        self.energy_kcal
    }

    pub fn protein_g(&self) -> f64 {
        self.protein_g
    }

    pub fn carbs_g(&self) -> f64 {
        self.carbs_g
    }

    pub fn fat_g(&self) -> f64 {
        self.fat_g
    }
}

impl std::fmt::Display for MacroTargets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} kcal, {:.1}g protein, {:.1}g carbs, {:.1}g fat",
            self.energy_kcal, self.protein_g, self.carbs_g, self.fat_g
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getters_return_constructor_values() {
        let targets = MacroTargets::new(2000.0, 150.0, 200.0, 55.0).unwrap();
        assert_eq!(targets.energy_kcal(), 2000.0);
        assert_eq!(targets.protein_g(), 150.0);
        assert_eq!(targets.carbs_g(), 200.0);
        assert_eq!(targets.fat_g(), 55.0);
    }

    #[test]
    fn test_rejects_negative_values() {
        assert!(MacroTargets::new(-1.0, 0.0, 0.0, 0.0).is_err());
        assert!(MacroTargets::new(0.0, -1.0, 0.0, 0.0).is_err());
        assert!(MacroTargets::new(0.0, 0.0, -1.0, 0.0).is_err());
        assert!(MacroTargets::new(0.0, 0.0, 0.0, -1.0).is_err());
        assert!(MacroTargets::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }
}
