//! Input validation functions
//!
//! Range checks for user-supplied values. Each returns a human-readable
//! message the API layer maps to a validation error.

use chrono::NaiveDate;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.len() > 150 {
        return Err("Username too long".to_string());
    }
    Ok(())
}

/// Validate body weight (kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if !(20.0..=500.0).contains(&weight_kg) {
        return Err("Weight must be between 20 and 500 kg".to_string());
    }
    Ok(())
}

/// Validate height (cm)
pub fn validate_height_cm(height_cm: i32) -> Result<(), String> {
    if !(50..=280).contains(&height_cm) {
        return Err("Height must be between 50 and 280 cm".to_string());
    }
    Ok(())
}

/// Validate age (years)
pub fn validate_age(age: i32) -> Result<(), String> {
    if !(5..=120).contains(&age) {
        return Err("Age must be between 5 and 120".to_string());
    }
    Ok(())
}

/// Validate an inclusive date range
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if end < start {
        return Err("end_date must not be before start_date".to_string());
    }
    Ok(())
}

/// Validate water intake (litres)
pub fn validate_litres(litres: f64) -> Result<(), String> {
    if litres.is_nan() || litres.is_infinite() {
        return Err("Litres must be a valid number".to_string());
    }
    if litres <= 0.0 || litres > 20.0 {
        return Err("Litres must be between 0 and 20".to_string());
    }
    Ok(())
}
