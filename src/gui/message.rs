//! Messages produced by the control panel window.

use crate::control::ControlId;
use crate::event::Change;

#[derive(Debug, Clone)]
pub enum Message {
    /// Switch to the tab of another device
    TabSelected(usize),
    /// The user changed a control's widget
    Changed {
        tab: usize,
        control: ControlId,
        change: Change,
    },
    /// Hide the last error
    DismissError,
}
