//! Submit-time validation. Never run on change or blur.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::form::{Field, FormErrors, FormMode, FormValues};

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORDS_DIFFER: &str = "Passwords do not match";
pub const NAME_REQUIRED: &str = "Name is required";
pub const GENDER_REQUIRED: &str = "Please select a gender";
pub const TERMS_REQUIRED: &str = "You must accept the terms and conditions";

/// Minimum password length in Register mode, in chars.
pub const MIN_PASSWORD_LEN: usize = 8;

// Unanchored: any `x@y.z` run of non-space characters inside the value passes.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Produce a fresh error map for `values` under the rules of `mode`.
///
/// Role, bio, interests, marketing preferences and remember-me are never
/// checked.
pub fn validate(mode: FormMode, values: &FormValues) -> FormErrors {
    let mut errors = FormErrors::new();
    let register = mode == FormMode::Register;

    if values.email.is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_email(&values.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if mode != FormMode::ForgotPassword {
        if values.password.is_empty() {
            errors.insert(Field::Password, PASSWORD_REQUIRED);
        } else if register && values.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(Field::Password, PASSWORD_TOO_SHORT);
        }
    }

    if register {
        if values.confirm_password != values.password {
            errors.insert(Field::ConfirmPassword, PASSWORDS_DIFFER);
        }
        if values.name.is_empty() {
            errors.insert(Field::Name, NAME_REQUIRED);
        }
        if values.gender.is_empty() {
            errors.insert(Field::Gender, GENDER_REQUIRED);
        }
        if !values.accept_terms {
            errors.insert(Field::AcceptTerms, TERMS_REQUIRED);
        }
    }

    errors
}
