use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub mod area;
pub mod auth;
pub mod category;
pub mod grade;
pub mod loan;
pub mod meeting;
pub mod pedagogical_hour;
pub mod reservation;
pub mod resource;
pub mod settings;
pub mod user;

/// Parses an enum stored as TEXT.
pub(crate) fn parse_stored<T>(value: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value)
        .map_err(|e| AppError::ConversionEntityError(format!("unexpected value '{value}': {e}")))
}
