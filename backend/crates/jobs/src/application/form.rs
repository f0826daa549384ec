//! Offer form

use std::str::FromStr;

use accounts::application::forms::{REQUIRED_MESSAGE, max_length_message};
use kernel::validation::FieldErrors;
use rust_decimal::Decimal;

use crate::domain::skills::parse_skills;

pub const TITLE_MAX_LENGTH: usize = 255;
pub const SALARY_MAX_DIGITS: u32 = 10;
pub const SALARY_DECIMAL_PLACES: u32 = 2;

const FALSE_VALUES: [&str; 4] = ["off", "false", "0", "no"];

/// Raw offer submission
#[derive(Debug, Clone, Default)]
pub struct OfferForm {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub skills_input: String,
    /// Checkbox value; absent means the default (active)
    pub active: Option<String>,
}

/// Validated offer contents
#[derive(Debug, Clone, PartialEq)]
pub struct OfferDraft {
    pub title: String,
    pub description: String,
    pub salary: Option<Decimal>,
    pub skills: Vec<String>,
    pub active: bool,
}

pub fn validate_offer(form: &OfferForm) -> Result<OfferDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = form.title.trim();
    let title_length = title.chars().count();
    if title.is_empty() {
        errors.add("title", REQUIRED_MESSAGE);
    } else if title_length > TITLE_MAX_LENGTH {
        errors.add("title", max_length_message(TITLE_MAX_LENGTH, title_length));
    }

    let description = form.description.trim();
    if description.is_empty() {
        errors.add("description", REQUIRED_MESSAGE);
    }

    let salary = match parse_salary(&form.salary) {
        Ok(salary) => salary,
        Err(messages) => {
            for message in messages {
                errors.add("salary", message);
            }
            None
        }
    };

    errors.into_result(OfferDraft {
        title: title.to_string(),
        description: description.to_string(),
        salary,
        skills: parse_skills(&form.skills_input),
        active: parse_checkbox(form.active.as_deref()),
    })
}

/// Blank is no salary; otherwise a non-negative amount that fits
/// `NUMERIC(10, 2)`.
pub fn parse_salary(raw: &str) -> Result<Option<Decimal>, Vec<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value = Decimal::from_str(raw).map_err(|_| vec!["Enter a number.".to_string()])?;

    let mut messages = Vec::new();
    if let Some(message) = digit_limit_message(&value) {
        messages.push(message);
    }
    if value.is_sign_negative() && !value.is_zero() {
        messages.push("Ensure this value is greater than or equal to 0.".to_string());
    }

    if messages.is_empty() {
        Ok(Some(value))
    } else {
        Err(messages)
    }
}

/// Digits are counted as entered, so `1.000` has three decimal places.
fn digit_limit_message(value: &Decimal) -> Option<String> {
    let scale = value.scale();
    let significant = value.mantissa().unsigned_abs().to_string().len() as u32;

    let (digits, decimals) = if scale == 0 {
        (significant, 0)
    } else if scale > significant {
        (scale, scale)
    } else {
        (significant, scale)
    };
    let whole_digits = digits - decimals;
    let max_whole_digits = SALARY_MAX_DIGITS - SALARY_DECIMAL_PLACES;

    if digits > SALARY_MAX_DIGITS {
        Some(format!(
            "Ensure that there are no more than {SALARY_MAX_DIGITS} digits in total."
        ))
    } else if decimals > SALARY_DECIMAL_PLACES {
        Some(format!(
            "Ensure that there are no more than {SALARY_DECIMAL_PLACES} decimal places."
        ))
    } else if whole_digits > max_whole_digits {
        Some(format!(
            "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
        ))
    } else {
        None
    }
}

fn parse_checkbox(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(value) => {
            let value = value.trim().to_ascii_lowercase();
            !FALSE_VALUES.contains(&value.as_str())
        }
    }
}
