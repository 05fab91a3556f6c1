//! Core runtime for the **authform** terminal form.
//!
//! `authform-core` provides the traits, types, and runtime the form is built
//! on. The design follows the [Elm Architecture]: the screen is a pure
//! **init -> update -> view** cycle, and every control is a *controlled*
//! [`Component`] that is handed its value by the parent instead of owning it.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level screen trait (init / update / view) |
//! | [`Component`] | Controlled control rendering into a [`ratatui::layout::Rect`] |
//! | [`Props`] | Bound value plus error message handed to a component |
//! | [`Command`] | Side effect returned from `update` |
//! | [`Subscription`] | Input listener with identity-based lifecycle |
//! | [`InputEvent`] | Normalized key / pointer / paste / resize input |
//! | [`Program`] | Wires a [`Model`] to a real terminal |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit tests |
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::{Component, Props};
pub use event::InputEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{input_events, pointer_down, Subscription, SubscriptionId};

/// Run a model with the given options until it quits.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
