//! Registration and profile forms
//!
//! Validators take the raw submitted strings plus the role context and
//! return either a normalized record or field-keyed errors, never both.
//! Role-conditional rules:
//!
//! | field        | applicant          | company                      |
//! |--------------|--------------------|------------------------------|
//! | `first_name` | required, ≤30      | optional, ≤30                |
//! | `siret`      | ignored            | required, exactly 14 digits  |
//! | `cv_ref`     | optional           | discarded                    |

use kernel::validation::FieldErrors;
use platform::password::{ClearTextPassword, UserAttributes, validate_password};

use crate::domain::value_object::{Email, Role, Siret, Username};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "The two password fields didn't match.";

pub const FIRST_NAME_MAX_LENGTH: usize = 30;
pub const LAST_NAME_MAX_LENGTH: usize = 150;
pub const ADDRESS_MAX_LENGTH: usize = 255;
pub const REF_MAX_LENGTH: usize = 255;

// ============================================================================
// Submitted values
// ============================================================================

/// Raw registration submission; absent fields are empty strings.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub address: String,
    pub siret: String,
    pub image_ref: String,
    pub cv_ref: String,
}

/// Raw profile-update submission. The role is not part of it.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub siret: String,
    pub image_ref: String,
    pub cv_ref: String,
}

// ============================================================================
// Validated records
// ============================================================================

#[derive(Debug)]
pub struct Registration {
    pub username: Username,
    pub password: ClearTextPassword,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub address: String,
    pub siret: Option<Siret>,
    pub image_ref: Option<String>,
    pub cv_ref: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub siret: Option<Siret>,
    /// `None` keeps the stored reference
    pub image_ref: Option<String>,
    /// `None` keeps the stored reference
    pub cv_ref: Option<String>,
}

// ============================================================================
// Validators
// ============================================================================

pub fn validate_registration(form: &RegistrationForm) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = Username::new(&form.username)
        .map_err(|e| errors.add("username", e.to_string()))
        .ok();

    let email = Email::new(&form.email)
        .map_err(|e| errors.add("email", e.to_string()))
        .ok();

    let role = match form.role.trim() {
        "" => {
            errors.add("role", REQUIRED_MESSAGE);
            None
        }
        code => {
            let role = Role::from_code(code);
            if role.is_none() {
                errors.add(
                    "role",
                    format!("Select a valid choice. {code} is not one of the available choices."),
                );
            }
            role
        }
    };

    let first_name = text_field(
        &mut errors,
        "first_name",
        &form.first_name,
        FIRST_NAME_MAX_LENGTH,
        role == Some(Role::Applicant),
    );
    let last_name = text_field(
        &mut errors,
        "last_name",
        &form.last_name,
        LAST_NAME_MAX_LENGTH,
        true,
    );
    let address = text_field(
        &mut errors,
        "address",
        &form.address,
        ADDRESS_MAX_LENGTH,
        true,
    );
    let siret = role.and_then(|role| siret_field(&mut errors, role, &form.siret));
    let image_ref = optional_ref(&mut errors, "image_ref", &form.image_ref);
    let cv_ref = optional_ref(&mut errors, "cv_ref", &form.cv_ref);

    let password = password_field(&mut errors, form);

    match (username, email, role, password) {
        (Some(username), Some(email), Some(role), Some(password)) if errors.is_empty() => {
            Ok(Registration {
                username,
                password,
                email,
                first_name,
                last_name,
                role,
                address,
                siret,
                image_ref,
                cv_ref: if role.is_company() { None } else { cv_ref },
            })
        }
        _ => Err(errors),
    }
}

/// Profile update, re-checked against the role stored on the profile
pub fn validate_profile_update(form: &ProfileForm, role: Role) -> Result<ProfileChanges, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = Email::new(&form.email)
        .map_err(|e| errors.add("email", e.to_string()))
        .ok();
    let first_name = text_field(
        &mut errors,
        "first_name",
        &form.first_name,
        FIRST_NAME_MAX_LENGTH,
        role == Role::Applicant,
    );
    let last_name = text_field(
        &mut errors,
        "last_name",
        &form.last_name,
        LAST_NAME_MAX_LENGTH,
        true,
    );
    let address = text_field(
        &mut errors,
        "address",
        &form.address,
        ADDRESS_MAX_LENGTH,
        true,
    );
    let siret = siret_field(&mut errors, role, &form.siret);
    let image_ref = optional_ref(&mut errors, "image_ref", &form.image_ref);
    let cv_ref = optional_ref(&mut errors, "cv_ref", &form.cv_ref);

    match email {
        Some(email) if errors.is_empty() => Ok(ProfileChanges {
            email,
            first_name,
            last_name,
            address,
            siret,
            image_ref,
            cv_ref: if role.is_company() { None } else { cv_ref },
        }),
        _ => Err(errors),
    }
}

// ============================================================================
// Field helpers
// ============================================================================

pub fn max_length_message(max: usize, actual: usize) -> String {
    format!("Ensure this value has at most {max} characters (it has {actual}).")
}

/// Trimmed text with a length cap; empty is an error only when `required`.
fn text_field(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    max: usize,
    required: bool,
) -> String {
    let value = raw.trim();
    let actual = value.chars().count();

    if value.is_empty() && required {
        errors.add(field, REQUIRED_MESSAGE);
    } else if actual > max {
        errors.add(field, max_length_message(max, actual));
    }

    value.to_string()
}

/// Companies must supply a SIRET; for applicants the field is ignored.
fn siret_field(errors: &mut FieldErrors, role: Role, raw: &str) -> Option<Siret> {
    if !role.is_company() {
        return None;
    }
    Siret::new(raw)
        .map_err(|e| errors.add("siret", e.to_string()))
        .ok()
}

fn optional_ref(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    let actual = value.chars().count();
    if actual > REF_MAX_LENGTH {
        errors.add(field, max_length_message(REF_MAX_LENGTH, actual));
        return None;
    }
    Some(value.to_string())
}

/// Both entries required and equal, then the password policy.
/// Mismatch and policy messages are reported on `password2`.
fn password_field(errors: &mut FieldErrors, form: &RegistrationForm) -> Option<ClearTextPassword> {
    let first = ClearTextPassword::new(&form.password1);
    let second = ClearTextPassword::new(&form.password2);

    if first.is_empty() {
        errors.add("password1", REQUIRED_MESSAGE);
    }
    if second.is_empty() {
        errors.add("password2", REQUIRED_MESSAGE);
    }
    if first.is_empty() || second.is_empty() {
        return None;
    }

    if form.password1 != form.password2 {
        errors.add("password2", PASSWORD_MISMATCH_MESSAGE);
        return None;
    }

    let attributes = UserAttributes {
        username: form.username.trim(),
        first_name: form.first_name.trim(),
        last_name: form.last_name.trim(),
        email: form.email.trim(),
    };
    let violations = validate_password(&second, &attributes);
    if violations.is_empty() {
        Some(second)
    } else {
        for violation in violations {
            errors.add("password2", violation.to_string());
        }
        None
    }
}

/// Single-field policy check used outside the registration form
pub fn check_new_password(
    raw: &str,
    attributes: &UserAttributes<'_>,
) -> Result<ClearTextPassword, FieldErrors> {
    let password = ClearTextPassword::new(raw);
    let mut errors = FieldErrors::new();
    if password.is_empty() {
        errors.add("password", REQUIRED_MESSAGE);
    }
    for violation in validate_password(&password, attributes) {
        errors.add("password", violation.to_string());
    }
    errors.into_result(password)
}
