//! Catalog field validation.
//!
//! Validators return [`CoreError::Validation`] with a message suitable
//! for rendering to the admin user. Referential checks (brand/model
//! existence) are the caller's job; only field-level rules live here.

use chrono::Datelike;

use crate::error::CoreError;

/// Oldest model year the marketplace accepts.
pub const MIN_MODEL_YEAR: i32 = 1990;

/// Field values common to car creation and replace-all update.
#[derive(Debug, Clone)]
pub struct CarFields {
    pub body_type: String,
    pub year: i32,
    pub registration_year: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub price: i64,
    pub kms_driven: i32,
    pub ownership_count: i32,
    pub registration_code: String,
    pub engine_cc: i32,
}

/// Validate the numeric ranges and required text fields of a car.
pub fn validate_car_fields(fields: &CarFields) -> Result<(), CoreError> {
    let current_year = chrono::Utc::now().year();

    if fields.year < MIN_MODEL_YEAR || fields.year > current_year + 1 {
        return Err(CoreError::Validation(format!(
            "Year must be between {MIN_MODEL_YEAR} and {}",
            current_year + 1
        )));
    }
    if fields.registration_year < MIN_MODEL_YEAR || fields.registration_year > current_year + 1 {
        return Err(CoreError::Validation(format!(
            "Registration year must be between {MIN_MODEL_YEAR} and {}",
            current_year + 1
        )));
    }
    if fields.registration_year < fields.year {
        return Err(CoreError::Validation(
            "Registration year cannot precede the model year".into(),
        ));
    }
    if fields.price <= 0 {
        return Err(CoreError::Validation("Price must be positive".into()));
    }
    if fields.kms_driven < 0 {
        return Err(CoreError::Validation("Mileage cannot be negative".into()));
    }
    if fields.ownership_count < 1 {
        return Err(CoreError::Validation(
            "Ownership count must be at least 1".into(),
        ));
    }
    if fields.engine_cc <= 0 {
        return Err(CoreError::Validation(
            "Engine displacement must be positive".into(),
        ));
    }
    for (label, value) in [
        ("Body type", &fields.body_type),
        ("Fuel type", &fields.fuel_type),
        ("Transmission", &fields.transmission),
        ("Registration code", &fields.registration_code),
    ] {
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{label} must not be blank")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> CarFields {
        CarFields {
            body_type: "Hatchback".into(),
            year: 2019,
            registration_year: 2020,
            fuel_type: "Petrol".into(),
            transmission: "Manual".into(),
            price: 450_000,
            kms_driven: 42_000,
            ownership_count: 1,
            registration_code: "KL-07".into(),
            engine_cc: 1197,
        }
    }

    #[test]
    fn accepts_valid_fields() {
        assert!(validate_car_fields(&valid_fields()).is_ok());
    }

    #[test]
    fn rejects_pre_1990_year() {
        let mut f = valid_fields();
        f.year = 1989;
        f.registration_year = 1989;
        assert!(validate_car_fields(&f).is_err());
    }

    #[test]
    fn rejects_non_positive_price() {
        let mut f = valid_fields();
        f.price = 0;
        assert!(validate_car_fields(&f).is_err());
    }

    #[test]
    fn rejects_negative_mileage() {
        let mut f = valid_fields();
        f.kms_driven = -1;
        assert!(validate_car_fields(&f).is_err());
    }

    #[test]
    fn rejects_registration_before_model_year() {
        let mut f = valid_fields();
        f.registration_year = f.year - 1;
        assert!(validate_car_fields(&f).is_err());
    }

    #[test]
    fn rejects_blank_body_type() {
        let mut f = valid_fields();
        f.body_type = "  ".into();
        assert!(validate_car_fields(&f).is_err());
    }
}
