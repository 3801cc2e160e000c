//! Lifetime workout totals and the measures they accumulate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

const KG_PER_LB: f64 = 0.453592;
const LB_PER_KG: f64 = 2.20462;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    /// Parses a unit; empty input means kilograms.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "" | "kg" => Ok(WeightUnit::Kg),
            "lb" => Ok(WeightUnit::Lb),
            other => Err(ValidationError::invalid_format(
                "weight_unit",
                format!("unknown unit '{}'", other),
            )),
        }
    }
}

/// A non-negative weight in a given unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    value: f64,
    unit: WeightUnit,
}

impl Weight {
    pub fn new(value: f64, unit: WeightUnit) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::invalid_format(
                "weight",
                "weight cannot be negative",
            ));
        }
        Ok(Self { value, unit })
    }

    pub fn kg(value: f64) -> Result<Self, ValidationError> {
        Self::new(value, WeightUnit::Kg)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> WeightUnit {
        self.unit
    }

    pub fn to_kg(&self) -> f64 {
        match self.unit {
            WeightUnit::Kg => self.value,
            WeightUnit::Lb => self.value * KG_PER_LB,
        }
    }

    pub fn to_lbs(&self) -> f64 {
        match self.unit {
            WeightUnit::Lb => self.value,
            WeightUnit::Kg => self.value * LB_PER_KG,
        }
    }
}

/// Length of a workout in whole minutes, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutDuration(u32);

impl WorkoutDuration {
    pub fn from_minutes(minutes: i64) -> Result<Self, ValidationError> {
        if minutes < 0 {
            return Err(ValidationError::invalid_format(
                "duration",
                "duration cannot be negative",
            ));
        }
        if minutes == 0 {
            return Err(ValidationError::invalid_format(
                "duration",
                "duration cannot be zero",
            ));
        }
        u32::try_from(minutes)
            .map(Self)
            .map_err(|_| ValidationError::invalid_format("duration", "duration too long"))
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }
}

/// Running totals across every recorded workout.
///
/// Volume is always stored in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub workouts: u32,
    pub volume_kg: f64,
    pub minutes: u64,
}

impl Totals {
    pub fn record_workout(&self, volume: Weight, duration: WorkoutDuration) -> Self {
        Self {
            workouts: self.workouts.saturating_add(1),
            volume_kg: self.volume_kg + volume.to_kg(),
            minutes: self.minutes + u64::from(duration.minutes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn weight_rejects_negative() {
        assert!(Weight::kg(-1.0).is_err());
        assert!(Weight::kg(f64::NAN).is_err());
        assert!(Weight::kg(0.0).is_ok());
    }

    #[test]
    fn weight_converts_between_units() {
        let lb = Weight::new(100.0, WeightUnit::Lb).unwrap();
        assert!(approx(lb.to_kg(), 45.3592));
        assert!(approx(lb.to_lbs(), 100.0));

        let kg = Weight::kg(10.0).unwrap();
        assert!(approx(kg.to_lbs(), 22.0462));
    }

    #[test]
    fn unit_parse_defaults_to_kg() {
        assert_eq!(WeightUnit::parse(""), Ok(WeightUnit::Kg));
        assert_eq!(WeightUnit::parse("lb"), Ok(WeightUnit::Lb));
        assert!(WeightUnit::parse("stone").is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(WorkoutDuration::from_minutes(0).is_err());
        assert!(WorkoutDuration::from_minutes(-10).is_err());
        assert_eq!(WorkoutDuration::from_minutes(45).unwrap().minutes(), 45);
    }

    #[test]
    fn record_workout_accumulates_in_kg() {
        let totals = Totals::default()
            .record_workout(Weight::kg(1000.0).unwrap(), WorkoutDuration::from_minutes(60).unwrap())
            .record_workout(
                Weight::new(100.0, WeightUnit::Lb).unwrap(),
                WorkoutDuration::from_minutes(30).unwrap(),
            );
        assert_eq!(totals.workouts, 2);
        assert!(approx(totals.volume_kg, 1045.3592));
        assert_eq!(totals.minutes, 90);
    }
}
