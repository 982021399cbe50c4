//! camctl: webcam control panel.
//!
//! Lists V4L2-style devices, reads their integer controls and turns each one into
//! a toggle, a choice group or a slider bound live to the device. The library is
//! toolkit-independent: front ends render [`Widget`]s and feed user input back as
//! [`Change`]s, which [`ControlBinding`]s write through an [`Apply`] target.

pub mod backends;
pub mod binding;
pub mod config;
pub mod control;
pub mod device;
pub mod error;
pub mod event;
pub mod layout;
pub mod logger;
pub mod manager;
pub mod snapshot;
pub mod widget;

#[cfg(feature = "gui")]
#[cfg_attr(docsrs, doc(cfg(feature = "gui")))]
pub mod gui;

pub use binding::*;
pub use control::*;
pub use device::*;
pub use error::{Error, Result};
pub use event::*;
pub use layout::*;
pub use manager::*;
pub use snapshot::*;
pub use widget::*;
