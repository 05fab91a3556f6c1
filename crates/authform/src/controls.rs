//! One control per field, and the plumbing that binds each control to its
//! slot in [`FormState`].

use authform_core::{Command, Component, Props, Subscription};
use authform_widgets::checkbox::{self, Checkbox};
use authform_widgets::checkbox_group::{self, CheckboxGroup};
use authform_widgets::radio_group::{self, RadioGroup};
use authform_widgets::select::{self, SearchableSelect};
use authform_widgets::text_area::{self, TextArea};
use authform_widgets::text_input::{self, EchoMode, TextInput};
use authform_widgets::toggle::{self, Toggle};
use authform_widgets::Label;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::form::{Field, FormMode, FormState, FormValues};
use crate::options::{GENDER_OPTIONS, INTEREST_OPTIONS, MARKETING_OPTIONS, ROLE_OPTIONS};
use crate::screen::Msg;

const SELECTS: [Field; 2] = [Field::Role, Field::MarketingPreferences];

/// A message addressed to one field's control.
#[derive(Debug, Clone)]
pub enum FieldMsg {
    Text(Field, text_input::Message),
    Bio(text_area::Message),
    AcceptTerms(checkbox::Message),
    RememberMe(toggle::Message),
    Gender(radio_group::Message),
    Interests(checkbox_group::Message),
    Select(Field, select::Message),
}

impl FieldMsg {
    /// Wrap a key press for the control bound to `field`.
    pub fn key(field: Field, key: KeyEvent) -> Self {
        match field {
            Field::Email | Field::Password | Field::ConfirmPassword | Field::Name => {
                FieldMsg::Text(field, text_input::Message::KeyPress(key))
            }
            Field::Bio => FieldMsg::Bio(text_area::Message::KeyPress(key)),
            Field::AcceptTerms => FieldMsg::AcceptTerms(checkbox::Message::KeyPress(key)),
            Field::RememberMe => FieldMsg::RememberMe(toggle::Message::KeyPress(key)),
            Field::Gender => FieldMsg::Gender(radio_group::Message::KeyPress(key)),
            Field::Interests => FieldMsg::Interests(checkbox_group::Message::KeyPress(key)),
            Field::Role | Field::MarketingPreferences => {
                FieldMsg::Select(field, select::Message::KeyPress(key))
            }
        }
    }

    /// Wrap pasted text, for controls that accept it.
    pub fn paste(field: Field, text: String) -> Option<Self> {
        match field {
            Field::Email | Field::Password | Field::ConfirmPassword | Field::Name => {
                Some(FieldMsg::Text(field, text_input::Message::Paste(text)))
            }
            Field::Bio => Some(FieldMsg::Bio(text_area::Message::Paste(text))),
            _ => None,
        }
    }
}

pub struct Controls {
    email: TextInput,
    password: TextInput,
    confirm_password: TextInput,
    name: TextInput,
    gender: RadioGroup,
    role: SearchableSelect,
    interests: CheckboxGroup,
    marketing: SearchableSelect,
    bio: TextArea,
    accept_terms: Checkbox,
    remember_me: Toggle,
}

impl Controls {
    pub fn new(bio_max_length: usize) -> Self {
        Self {
            email: TextInput::new(Field::Email.as_str())
                .with_label(Label::new("Email").required(true))
                .with_placeholder("you@example.com"),
            password: TextInput::new(Field::Password.as_str())
                .with_label(Label::new("Password").required(true))
                .with_placeholder("Your password")
                .with_echo_mode(EchoMode::Password('•')),
            confirm_password: TextInput::new(Field::ConfirmPassword.as_str())
                .with_label(Label::new("Confirm password").required(true))
                .with_placeholder("Repeat your password")
                .with_echo_mode(EchoMode::Password('•')),
            name: TextInput::new(Field::Name.as_str())
                .with_label(Label::new("Full name").required(true))
                .with_placeholder("Jane Doe"),
            gender: RadioGroup::new(Field::Gender.as_str(), &GENDER_OPTIONS)
                .with_label(Label::new("Gender").required(true)),
            role: SearchableSelect::new(Field::Role.as_str(), &ROLE_OPTIONS)
                .with_label(Label::new("Role"))
                .with_placeholder("Select a role"),
            interests: CheckboxGroup::new(Field::Interests.as_str(), &INTEREST_OPTIONS)
                .with_label(Label::new("Interests")),
            marketing: SearchableSelect::new(
                Field::MarketingPreferences.as_str(),
                &MARKETING_OPTIONS,
            )
            .with_label(Label::new("Marketing preferences"))
            .with_placeholder("Select a preference")
            .with_search(false),
            bio: TextArea::new(Field::Bio.as_str(), bio_max_length)
                .with_label(Label::new("Bio"))
                .with_placeholder("Tell us about yourself"),
            accept_terms: Checkbox::new(Field::AcceptTerms.as_str())
                .with_label(Label::new("I accept the terms and conditions").required(true)),
            remember_me: Toggle::new(Field::RememberMe.as_str())
                .with_label(Label::new("Remember me")),
        }
    }

    pub fn set_focus(&mut self, field: Field, focused: bool) {
        macro_rules! apply {
            ($control:expr) => {
                if focused {
                    $control.focus()
                } else {
                    $control.blur()
                }
            };
        }
        match field {
            Field::Email => apply!(self.email),
            Field::Password => apply!(self.password),
            Field::ConfirmPassword => apply!(self.confirm_password),
            Field::Name => apply!(self.name),
            Field::Gender => apply!(self.gender),
            Field::Role => apply!(self.role),
            Field::Interests => apply!(self.interests),
            Field::MarketingPreferences => apply!(self.marketing),
            Field::Bio => apply!(self.bio),
            Field::AcceptTerms => apply!(self.accept_terms),
            Field::RememberMe => apply!(self.remember_me),
        }
    }

    pub fn select(&self, field: Field) -> Option<&SearchableSelect> {
        match field {
            Field::Role => Some(&self.role),
            Field::MarketingPreferences => Some(&self.marketing),
            _ => None,
        }
    }

    fn select_mut(&mut self, field: Field) -> Option<&mut SearchableSelect> {
        match field {
            Field::Role => Some(&mut self.role),
            Field::MarketingPreferences => Some(&mut self.marketing),
            _ => None,
        }
    }

    fn text_input_mut(&mut self, field: Field) -> Option<&mut TextInput> {
        match field {
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::ConfirmPassword => Some(&mut self.confirm_password),
            Field::Name => Some(&mut self.name),
            _ => None,
        }
    }

    pub fn bio(&self) -> &TextArea {
        &self.bio
    }

    /// The select whose popover is open, if any.
    pub fn open_select(&self) -> Option<Field> {
        SELECTS
            .into_iter()
            .find(|f| self.select(*f).is_some_and(SearchableSelect::is_open))
    }

    /// Whether Up/Down on this field should move focus instead of being
    /// handled by the control.
    pub fn is_single_line(&self, field: Field) -> bool {
        match field {
            Field::Gender | Field::Interests | Field::Bio => false,
            Field::Role | Field::MarketingPreferences => {
                !self.select(field).is_some_and(SearchableSelect::is_open)
            }
            _ => true,
        }
    }

    /// Route a message to its control, lifting the control's change event
    /// into [`Msg::Change`] and everything else back into [`Msg::Field`].
    pub fn update(&mut self, msg: FieldMsg, values: &FormValues) -> Command<Msg> {
        match msg {
            FieldMsg::Text(field, m) => {
                let (Some(input), Some(value)) = (self.text_input_mut(field), values.text(field))
                else {
                    return Command::none();
                };
                input.update(m, value).map(move |m| match m {
                    text_input::Message::Changed(ev) => Msg::Change(ev),
                    other => Msg::Field(FieldMsg::Text(field, other)),
                })
            }
            FieldMsg::Bio(m) => self.bio.update(m, &values.bio).map(|m| match m {
                text_area::Message::Changed(ev) => Msg::Change(ev),
                other => Msg::Field(FieldMsg::Bio(other)),
            }),
            FieldMsg::AcceptTerms(m) => {
                self.accept_terms
                    .update(m, &values.accept_terms)
                    .map(|m| match m {
                        checkbox::Message::Changed(ev) => Msg::Change(ev),
                        other => Msg::Field(FieldMsg::AcceptTerms(other)),
                    })
            }
            FieldMsg::RememberMe(m) => {
                self.remember_me
                    .update(m, &values.remember_me)
                    .map(|m| match m {
                        toggle::Message::Changed(ev) => Msg::Change(ev),
                        other => Msg::Field(FieldMsg::RememberMe(other)),
                    })
            }
            FieldMsg::Gender(m) => self.gender.update(m, &values.gender).map(|m| match m {
                radio_group::Message::Changed(ev) => Msg::Change(ev),
                other => Msg::Field(FieldMsg::Gender(other)),
            }),
            FieldMsg::Interests(m) => {
                self.interests
                    .update(m, &values.interests)
                    .map(|m| match m {
                        checkbox_group::Message::Changed(ev) => Msg::Change(ev),
                        other => Msg::Field(FieldMsg::Interests(other)),
                    })
            }
            FieldMsg::Select(field, m) => {
                let (Some(select), Some(value)) = (self.select_mut(field), values.text(field))
                else {
                    return Command::none();
                };
                select.update(m, value).map(move |m| match m {
                    select::Message::Changed(ev) => Msg::Change(ev),
                    other => Msg::Field(FieldMsg::Select(field, other)),
                })
            }
        }
    }

    pub fn height(&self, field: Field, form: &FormState) -> u16 {
        let error = form.errors.get(field);
        let v = &form.values;
        match field {
            Field::Email => self.email.height(Props::new(v.email.as_str()).with_error(error)),
            Field::Password => self
                .password
                .height(Props::new(v.password.as_str()).with_error(error)),
            Field::ConfirmPassword => self
                .confirm_password
                .height(Props::new(v.confirm_password.as_str()).with_error(error)),
            Field::Name => self.name.height(Props::new(v.name.as_str()).with_error(error)),
            Field::Gender => self.gender.height(Props::new(v.gender.as_str()).with_error(error)),
            Field::Role => self.role.height(Props::new(v.role.as_str()).with_error(error)),
            Field::Interests => self
                .interests
                .height(Props::new(v.interests.as_slice()).with_error(error)),
            Field::MarketingPreferences => self
                .marketing
                .height(Props::new(v.marketing_preferences.as_str()).with_error(error)),
            Field::Bio => self.bio.height(Props::new(v.bio.as_str()).with_error(error)),
            Field::AcceptTerms => self
                .accept_terms
                .height(Props::new(&v.accept_terms).with_error(error)),
            Field::RememberMe => self
                .remember_me
                .height(Props::new(&v.remember_me).with_error(error)),
        }
    }

    pub fn view(&self, field: Field, frame: &mut Frame, area: Rect, form: &FormState) {
        let error = form.errors.get(field);
        let v = &form.values;
        match field {
            Field::Email => {
                self.email
                    .view(frame, area, Props::new(v.email.as_str()).with_error(error))
            }
            Field::Password => {
                self.password
                    .view(frame, area, Props::new(v.password.as_str()).with_error(error))
            }
            Field::ConfirmPassword => self.confirm_password.view(
                frame,
                area,
                Props::new(v.confirm_password.as_str()).with_error(error),
            ),
            Field::Name => self
                .name
                .view(frame, area, Props::new(v.name.as_str()).with_error(error)),
            Field::Gender => {
                self.gender
                    .view(frame, area, Props::new(v.gender.as_str()).with_error(error))
            }
            Field::Role => self
                .role
                .view(frame, area, Props::new(v.role.as_str()).with_error(error)),
            Field::Interests => self.interests.view(
                frame,
                area,
                Props::new(v.interests.as_slice()).with_error(error),
            ),
            Field::MarketingPreferences => self.marketing.view(
                frame,
                area,
                Props::new(v.marketing_preferences.as_str()).with_error(error),
            ),
            Field::Bio => self
                .bio
                .view(frame, area, Props::new(v.bio.as_str()).with_error(error)),
            Field::AcceptTerms => {
                self.accept_terms
                    .view(frame, area, Props::new(&v.accept_terms).with_error(error))
            }
            Field::RememberMe => {
                self.remember_me
                    .view(frame, area, Props::new(&v.remember_me).with_error(error))
            }
        }
    }

    /// Pointer listeners for the selects visible in `mode`.
    pub fn subscriptions(&self, mode: FormMode) -> Vec<Subscription<Msg>> {
        SELECTS
            .into_iter()
            .filter(|field| mode.fields().contains(field))
            .filter_map(|field| self.select(field).map(|select| (field, select)))
            .flat_map(|(field, select)| {
                select
                    .subscriptions()
                    .into_iter()
                    .map(move |sub| sub.map(move |m| Msg::Field(FieldMsg::Select(field, m))))
            })
            .collect()
    }
}
