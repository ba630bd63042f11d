use thiserror::Error;

use crate::domain::{MAX_AGE, MIN_AGE};
use crate::models::profile::ProfileInput;
use crate::models::search::SearchCriteria;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 3;
pub const PASSWORD_MAX_LEN: usize = 4096;
pub const TEXT_MAX_LEN: usize = 150;
pub const INTEREST_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

type Result<T> = std::result::Result<T, ValidationError>;

pub fn validate_username(username: &str) -> Result<&str> {
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::new(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }
    Ok(username)
}

pub fn validate_password(password: &str) -> Result<&str> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(ValidationError::new(format!(
            "Password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"
        )));
    }
    Ok(password)
}

/// Required free-text field: not blank, at most `max` characters.
pub fn validate_text<'a>(field: &str, value: &'a str, max: usize) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max {
        return Err(ValidationError::new(format!(
            "{field} must be {max} characters or less"
        )));
    }
    Ok(value)
}

pub fn validate_age(age: i32) -> Result<i32> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::new(format!(
            "Invalid age: {age}. Age must be between {MIN_AGE} and {MAX_AGE}"
        )));
    }
    Ok(age)
}

pub fn validate_interest(value: &str) -> Result<&str> {
    validate_text("Interest", value, INTEREST_MAX_LEN)
}

pub fn validate_profile_input(input: &ProfileInput) -> Result<()> {
    validate_text("Name", &input.name, TEXT_MAX_LEN)?;
    validate_text("Surname", &input.surname, TEXT_MAX_LEN)?;
    validate_age(input.age)?;
    validate_text("City", &input.city, TEXT_MAX_LEN)?;
    for interest in &input.interests {
        validate_interest(interest)?;
    }
    Ok(())
}

pub fn validate_search(criteria: &SearchCriteria) -> Result<()> {
    let optional = [
        ("Name", criteria.name.as_deref()),
        ("Surname", criteria.surname.as_deref()),
        ("City", criteria.city.as_deref()),
    ];
    for (field, value) in optional {
        if value.is_some_and(|v| v.chars().count() > TEXT_MAX_LEN) {
            return Err(ValidationError::new(format!(
                "{field} must be {TEXT_MAX_LEN} characters or less"
            )));
        }
    }

    for age in [criteria.age_from, criteria.age_to].into_iter().flatten() {
        if !(1..=MAX_AGE).contains(&age) {
            return Err(ValidationError::new(format!(
                "Invalid age filter: {age}. Must be between 1 and {MAX_AGE}"
            )));
        }
    }

    Ok(())
}
