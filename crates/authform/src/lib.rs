//! **authform**: a sign-in, registration and password-reset form for the
//! terminal.
//!
//! The form is one [`AuthScreen`](screen::AuthScreen) model driven by the
//! `authform-core` runtime. Its state lives in a plain
//! [`FormState`](form::FormState); controls from `authform-widgets` are bound
//! to it through normalized change events and never hold values themselves.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`form`] | Modes, fields, values, errors and their reducers |
//! | [`validate`] | Submit-time validation rules |
//! | [`options`] | Static option lists for the choice controls |
//! | [`controls`] | One control per field, bound to the form state |
//! | [`screen`] | The top-level model: layout, focus and submission |
//! | [`submit`] | The submission boundary |
//! | [`config`], [`cli`], [`logging`] | Startup plumbing for the binary |

pub mod cli;
pub mod config;
pub mod controls;
pub mod form;
pub mod logging;
pub mod options;
pub mod screen;
pub mod submit;
pub mod validate;

pub use form::{Field, FormErrors, FormMode, FormState, FormValues};
pub use screen::{AuthScreen, ScreenFlags};
pub use submit::{LogSubmitHandler, SubmitHandler};
