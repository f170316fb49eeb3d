//! Domain entities for the auto-resize widget.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What lives here?
//!
//! - **`size`** – The grid-aligned [`size::Size`] the remote session is asked
//!   to adopt, and the quantization rule that produces it.
//! - **`outcome`** – The tagged result of one resize attempt.
//! - **`status`** – The catalogue of transient status texts shown to the user.
//! - **`toggle`** – The two visual states ("on" / "off") of the toggle control.
//!
//! Code in outer layers (the widget's application and infrastructure layers)
//! depends on the domain, but the domain never depends on them.

pub mod outcome;
pub mod size;
pub mod status;
pub mod toggle;
