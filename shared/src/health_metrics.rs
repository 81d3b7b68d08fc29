//! Health metric calculations
//!
//! Pure functions over profile data, no side effects.

/// Calculate Body Mass Index from weight in kilograms and height in
/// centimeters, rounded to two decimal places.
///
/// Returns `None` when either input is missing or non-positive, so an
/// incomplete profile reports no BMI rather than a bogus one.
pub fn calculate_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let height_m = height_cm.filter(|h| *h > 0.0)? / 100.0;
    Some((weight / (height_m * height_m) * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_reference_value() {
        // 70 kg at 175 cm: 70 / 1.75^2 = 22.857... -> 22.86
        assert_eq!(calculate_bmi(Some(70.0), Some(175.0)), Some(22.86));
    }

    #[test]
    fn bmi_undefined_without_height() {
        assert_eq!(calculate_bmi(Some(70.0), None), None);
    }

    #[test]
    fn bmi_undefined_without_weight() {
        assert_eq!(calculate_bmi(None, Some(175.0)), None);
    }

    #[test]
    fn bmi_rejects_zero_height() {
        assert_eq!(calculate_bmi(Some(70.0), Some(0.0)), None);
    }

    #[test]
    fn bmi_rounds_to_two_decimals() {
        let bmi = calculate_bmi(Some(82.5), Some(180.0)).unwrap();
        assert_eq!(bmi, 25.46);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bmi_is_positive_and_finite_over_valid_inputs(
                weight in 20.0f64..500.0,
                height in 50.0f64..280.0,
            ) {
                let bmi = calculate_bmi(Some(weight), Some(height)).unwrap();
                prop_assert!(bmi > 0.0);
                prop_assert!(bmi.is_finite());
            }

            #[test]
            fn bmi_grows_with_weight(
                weight in 20.0f64..400.0,
                height in 50.0f64..280.0,
            ) {
                let lighter = calculate_bmi(Some(weight), Some(height)).unwrap();
                let heavier = calculate_bmi(Some(weight + 50.0), Some(height)).unwrap();
                prop_assert!(heavier > lighter);
            }
        }
    }
}
