pub mod bookings;
pub mod listings;
pub mod reviews;

use rust_decimal::Decimal;
use sea_orm::entity::prelude::Date;

use crate::error::{AppError, AppResult};

/// Nightly price must be at least 0.01.
pub(crate) fn validate_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::new(1, 2) {
        return Err(AppError::Validation {
            field: "price_per_night",
            message: "price per night must be at least 0.01".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_rating(rating: i32) -> AppResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::Validation {
            field: "rating",
            message: "rating must be between 1 and 5".to_string(),
        });
    }
    Ok(())
}

/// A stay must cover at least one night.
pub(crate) fn validate_date_order(start_date: Date, end_date: Date) -> AppResult<()> {
    if start_date >= end_date {
        return Err(AppError::Integrity(
            "start_date must be before end_date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn rejects_zero_and_negative_prices() {
        assert!(validate_price(Decimal::ZERO).is_err());
        assert!(validate_price(Decimal::new(-5000, 2)).is_err());
    }

    #[test]
    fn accepts_prices_from_one_cent_up() {
        assert!(validate_price(Decimal::new(1, 2)).is_ok());
        assert!(validate_price(Decimal::new(29999, 2)).is_ok());
    }

    #[test]
    fn price_error_names_the_field() {
        match validate_price(Decimal::ZERO) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "price_per_night"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn equal_dates_violate_date_order() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        match validate_date_order(day, day) {
            Err(AppError::Integrity(_)) => {}
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn reversed_dates_violate_date_order() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert!(validate_date_order(start, end).is_err());
        assert!(validate_date_order(end, start).is_ok());
    }
}
