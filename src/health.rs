use crate::models::FitnessProfile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    pub value: f64,
    pub category: &'static str,
}

/// BMI from height in centimeters and weight in kilograms, rounded to one decimal.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Option<Bmi> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let value = (weight_kg / (height_m * height_m) * 10.0).round() / 10.0;
    let category = if value < 18.5 {
        "Underweight"
    } else if value < 25.0 {
        "Normal weight"
    } else if value < 30.0 {
        "Overweight"
    } else {
        "Obese"
    };
    Some(Bmi { value, category })
}

pub fn profile_bmi(profile: &FitnessProfile) -> Option<Bmi> {
    calculate_bmi(profile.height_cm?, profile.weight_kg?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_is_rounded_and_categorized() {
        let bmi = calculate_bmi(178.0, 74.0).unwrap();
        assert_eq!(bmi.value, 23.4);
        assert_eq!(bmi.category, "Normal weight");

        assert_eq!(calculate_bmi(170.0, 50.0).unwrap().category, "Underweight");
        assert_eq!(calculate_bmi(170.0, 80.0).unwrap().category, "Overweight");
        assert_eq!(calculate_bmi(160.0, 90.0).unwrap().category, "Obese");
    }

    #[test]
    fn missing_or_invalid_measurements_give_no_bmi() {
        assert_eq!(calculate_bmi(0.0, 70.0), None);
        let mut profile = FitnessProfile::sample();
        profile.height_cm = None;
        assert_eq!(profile_bmi(&profile), None);
    }
}
