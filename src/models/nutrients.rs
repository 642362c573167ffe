//! Shared nutrient data structure
//!
//! Used across foods, meals, the food log, and shared diets.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Per-unit nutritional content
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub energy_kcal: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub fiber_g: f64,
    pub calcium_mg: f64,
}

impl Nutrients {
    /// Create a new Nutrients, rejecting any negative value
    pub fn new(
        energy_kcal: f64,
        protein_g: f64,
        fat_g: f64,
        carbs_g: f64,
        fiber_g: f64,
        calcium_mg: f64,
    ) -> ValidationResult<Self> {
        let nutrients = Self {
            energy_kcal,
            protein_g,
            fat_g,
            carbs_g,
            fiber_g,
            calcium_mg,
        };
        nutrients.validate()?;
        Ok(nutrients)
    }

    /// Create a new Nutrients with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Reject any negative nutrient value
    pub fn validate(&self) -> ValidationResult<()> {
        let fields = [
            ("energy", self.energy_kcal),
            ("protein", self.protein_g),
            ("fat", self.fat_g),
            ("carbohydrate", self.carbs_g),
            ("fiber", self.fiber_g),
            ("calcium", self.calcium_mg),
        ];
        for (name, value) in fields {
            if value < 0.0 {
                return Err(ValidationError::invalid(format!(
                    "{name} cannot be negative"
                )));
            }
        }
        Ok(())
    }

    /// Scale nutrient values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            energy_kcal: self.energy_kcal * multiplier,
            protein_g: self.protein_g * multiplier,
            fat_g: self.fat_g * multiplier,
            carbs_g: self.carbs_g * multiplier,
            fiber_g: self.fiber_g * multiplier,
            calcium_mg: self.calcium_mg * multiplier,
        }
    }

    /// Add another nutrient record to this one
    pub fn add(&self, other: &Nutrients) -> Self {
        Self {
            energy_kcal: self.energy_kcal + other.energy_kcal,
            protein_g: self.protein_g + other.protein_g,
            fat_g: self.fat_g + other.fat_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fiber_g: self.fiber_g + other.fiber_g,
            calcium_mg: self.calcium_mg + other.calcium_mg,
        }
    }
}

impl std::ops::Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, multiplier: f64) -> Nutrients {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Nutrients::new(52.0, 0.3, 0.2, 14.0, 2.4, 6.0).is_ok());
        assert!(Nutrients::new(-1.0, 0.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(Nutrients::new(0.0, 0.0, 0.0, 0.0, -2.4, 0.0).is_err());
    }

    #[test]
    fn test_sum_over_empty_is_zero() {
        let total: Nutrients = std::iter::empty().sum();
        assert_eq!(total, Nutrients::zero());
    }

    #[test]
    fn test_scale_and_add() {
        let n = Nutrients::new(100.0, 10.0, 5.0, 20.0, 3.0, 50.0).unwrap();
        let half = n.scale(0.5);
        assert!((half.energy_kcal - 50.0).abs() < 1e-9);
        assert!((half.protein_g - 5.0).abs() < 1e-9);

        let total = n + half;
        assert!((total.energy_kcal - 150.0).abs() < 1e-9);
        assert!((total.calcium_mg - 75.0).abs() < 1e-9);
    }
}
