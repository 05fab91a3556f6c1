//! Form state: the field catalogue, the value record, the error map and the
//! reducers that move them between states.
//!
//! Everything here is plain data plus pure functions over it. The screen owns
//! one [`FormState`] and only ever changes it through
//! [`set_mode`](FormState::set_mode), [`apply_change`](FormState::apply_change)
//! and [`submit`](FormState::submit).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use authform_widgets::ChangeEvent;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::validate;

/// Which variant of the form is on screen.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FormMode {
    #[default]
    Login,
    Register,
    ForgotPassword,
}

impl FormMode {
    /// Visible fields, in focus order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            FormMode::Login => &[Field::Email, Field::Password, Field::RememberMe],
            FormMode::Register => &[
                Field::Name,
                Field::Email,
                Field::Password,
                Field::ConfirmPassword,
                Field::Gender,
                Field::Role,
                Field::Interests,
                Field::MarketingPreferences,
                Field::Bio,
                Field::AcceptTerms,
            ],
            FormMode::ForgotPassword => &[Field::Email],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FormMode::Login => "Welcome back",
            FormMode::Register => "Create an account",
            FormMode::ForgotPassword => "Reset your password",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            FormMode::Login => "Sign in to your account",
            FormMode::Register => "Fill in your details to get started",
            FormMode::ForgotPassword => "We'll email you a reset link",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Login => "Sign In",
            FormMode::Register => "Create Account",
            FormMode::ForgotPassword => "Send Reset Link",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormMode::Login => "login",
            FormMode::Register => "register",
            FormMode::ForgotPassword => "forgot-password",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field the form knows about, across all modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    Name,
    Gender,
    Role,
    RememberMe,
    AcceptTerms,
    Bio,
    Interests,
    MarketingPreferences,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::Name,
        Field::Gender,
        Field::Role,
        Field::RememberMe,
        Field::AcceptTerms,
        Field::Bio,
        Field::Interests,
        Field::MarketingPreferences,
    ];

    /// The name carried by change events for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Name => "name",
            Field::Gender => "gender",
            Field::Role => "role",
            Field::RememberMe => "rememberMe",
            Field::AcceptTerms => "acceptTerms",
            Field::Bio => "bio",
            Field::Interests => "interests",
            Field::MarketingPreferences => "marketingPreferences",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change event named a field the form does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The single value record shared by all three modes. Values of fields that
/// are hidden in the current mode are kept.
#[derive(Clone, PartialEq, Eq)]
pub struct FormValues {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub gender: String,
    pub role: String,
    pub remember_me: bool,
    pub accept_terms: bool,
    pub bio: String,
    pub interests: Vec<String>,
    pub marketing_preferences: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            name: String::new(),
            gender: String::new(),
            role: "user".to_string(),
            remember_me: false,
            accept_terms: false,
            bio: String::new(),
            interests: Vec::new(),
            marketing_preferences: String::new(),
        }
    }
}

impl FormValues {
    /// The string slot backing a text-shaped field.
    pub fn text(&self, field: Field) -> Option<&str> {
        let text = match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Name => &self.name,
            Field::Gender => &self.gender,
            Field::Role => &self.role,
            Field::Bio => &self.bio,
            Field::MarketingPreferences => &self.marketing_preferences,
            Field::RememberMe | Field::AcceptTerms | Field::Interests => return None,
        };
        Some(text)
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let text = match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Name => &mut self.name,
            Field::Gender => &mut self.gender,
            Field::Role => &mut self.role,
            Field::Bio => &mut self.bio,
            Field::MarketingPreferences => &mut self.marketing_preferences,
            Field::RememberMe | Field::AcceptTerms | Field::Interests => return None,
        };
        Some(text)
    }

    fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        match field {
            Field::RememberMe => Some(&mut self.remember_me),
            Field::AcceptTerms => Some(&mut self.accept_terms),
            _ => None,
        }
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<set>"
    }
}

impl fmt::Debug for FormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValues")
            .field("email", &self.email)
            .field("password", &redacted(&self.password))
            .field("confirm_password", &redacted(&self.confirm_password))
            .field("name", &self.name)
            .field("gender", &self.gender)
            .field("role", &self.role)
            .field("remember_me", &self.remember_me)
            .field("accept_terms", &self.accept_terms)
            .field("bio", &self.bio)
            .field("interests", &self.interests)
            .field("marketing_preferences", &self.marketing_preferences)
            .finish()
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("FormValues", 11)?;
        s.serialize_field("email", &self.email)?;
        s.serialize_field("password", redacted(&self.password))?;
        s.serialize_field("confirmPassword", redacted(&self.confirm_password))?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("gender", &self.gender)?;
        s.serialize_field("role", &self.role)?;
        s.serialize_field("rememberMe", &self.remember_me)?;
        s.serialize_field("acceptTerms", &self.accept_terms)?;
        s.serialize_field("bio", &self.bio)?;
        s.serialize_field("interests", &self.interests)?;
        s.serialize_field("marketingPreferences", &self.marketing_preferences)?;
        s.end()
    }
}

/// Validation messages keyed by field, in field order. A key is present only
/// for a field that failed the last validation pass and has not been edited
/// since.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; the caller should hand the values to its handler.
    Accepted,
    /// Validation failed with this many errors, now stored in the error map.
    Blocked(usize),
}

/// Mode, values and errors, with the reducers that change them.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub mode: FormMode,
    pub values: FormValues,
    pub errors: FormErrors,
}

impl FormState {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Switch mode. Errors are always cleared, even when the mode is unchanged.
    pub fn set_mode(&mut self, mode: FormMode) {
        tracing::info!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
        self.errors = FormErrors::new();
    }

    /// Merge a change event into the values, then drop the field's error.
    ///
    /// The error is cleared without re-validating: the field counts as fixed
    /// until the next submit. An event whose shape does not fit its field is
    /// ignored.
    pub fn apply_change(&mut self, event: &ChangeEvent) -> Result<(), UnknownField> {
        let field: Field = event.name().parse()?;
        let stored = match event {
            ChangeEvent::Bool { checked, .. } => self
                .values
                .flag_mut(field)
                .map(|slot| *slot = *checked)
                .is_some(),
            ChangeEvent::Text { value, .. } => self
                .values
                .text_mut(field)
                .map(|slot| slot.clone_from(value))
                .is_some(),
            ChangeEvent::Multi { values, .. } => match field {
                Field::Interests => {
                    self.values.interests.clone_from(values);
                    true
                }
                _ => false,
            },
        };
        if !stored {
            tracing::warn!(
                %field,
                checkbox_shaped = event.is_checkbox_shaped(),
                "change event shape does not fit the field, ignored"
            );
            return Ok(());
        }

        tracing::debug!(%field, "field changed");
        if self.errors.remove(field).is_some() {
            tracing::debug!(%field, "error cleared");
        }
        Ok(())
    }

    /// Run validation for the current mode without storing the result.
    pub fn validate(&self) -> FormErrors {
        validate::validate(self.mode, &self.values)
    }

    /// The form is valid when no errors are stored.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validate, store the errors, and report whether submission may proceed.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.errors = self.validate();
        tracing::debug!(
            mode = %self.mode,
            errors = self.errors.len(),
            fields = ?self.errors.fields(),
            "validation finished"
        );
        if self.errors.is_empty() {
            SubmitOutcome::Accepted
        } else {
            SubmitOutcome::Blocked(self.errors.len())
        }
    }
}
