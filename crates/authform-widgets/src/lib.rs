//! Form controls for **authform**.
//!
//! Every control implements [`authform_core::Component`] as a *controlled*
//! component: the parent hands it the bound value and error through
//! [`authform_core::Props`], and the control reports edits as a
//! [`ChangeEvent`](change::ChangeEvent) instead of storing them.
//!
//! # Controls
//!
//! | Module | Bound value | Emits |
//! |--------|-------------|-------|
//! | [`text_input`] | `str` | `Text` |
//! | [`text_area`] | `str` | `Text` |
//! | [`checkbox`] | `bool` | `Bool` |
//! | [`toggle`] | `bool` | `Bool` |
//! | [`radio_group`] | `str` | `Text` |
//! | [`checkbox_group`] | `[String]` | `Multi` |
//! | [`select`] | `str` | `Text` |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`form`] | Submit gesture gate and submit button |
//! | [`focus`] | [`FocusRing`](focus::FocusRing) for cycling focus across slots |
//! | [`chrome`] | Labels, focus borders and error lines |
//! | [`option`] | [`SelectOption`](option::SelectOption) value/label pairs |

pub mod change;
pub mod checkbox;
pub mod checkbox_group;
pub mod chrome;
pub mod focus;
pub mod form;
pub mod option;
pub mod radio_group;
pub mod runeutil;
pub mod select;
pub mod text_area;
pub mod text_input;
pub mod toggle;

pub use change::ChangeEvent;
pub use chrome::Label;
pub use option::SelectOption;
