//! Desktop control panel built on iced's Elm Architecture (feature `gui`).
//!
//! One tab per device, one widget per control. The widget state shown is the
//! library's [`Widget`](crate::widget::Widget); every user change goes through
//! [`Manager::dispatch`](crate::manager::Manager::dispatch) on the UI thread.

pub mod app;
pub mod message;
pub mod widgets;
