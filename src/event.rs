//! Widget change events.
//!
//! A [`Change`] is the native payload a host toolkit hands to a widget's change
//! handler. Each widget shape has exactly one payload shape:
//!
//! - **Toggle:** the new checked state.
//! - **Choice:** the label of the newly selected option (a decimal integer).
//! - **Slider:** the new floating-point position. Hosts may report positions
//!   outside `[min, max]`; the sync handler rounds and clamps.
//!
//! Scripted front ends build changes from text with [`Change::parse`].

use std::fmt;

use crate::widget::WidgetKind;

/// Payload of a user change.
#[derive(Clone, Debug, PartialEq)]
pub enum Change {
    Toggled(bool),
    Selected(String),
    Slid(f64),
}

impl Change {
    /// Widget shape this payload belongs to.
    pub fn kind(&self) -> WidgetKind {
        match self {
            Change::Toggled(_) => WidgetKind::Toggle,
            Change::Selected(_) => WidgetKind::Choice,
            Change::Slid(_) => WidgetKind::Slider,
        }
    }

    /// Interpret `text` as a change for a widget of shape `kind`.
    ///
    /// Toggles accept `on/off`, `true/false`, `yes/no` and `1/0`; choices take the
    /// text as the option label; sliders take any float.
    pub fn parse(kind: WidgetKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            WidgetKind::Toggle => match text.to_ascii_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => Some(Change::Toggled(true)),
                "off" | "false" | "no" | "0" => Some(Change::Toggled(false)),
                _ => None,
            },
            WidgetKind::Choice => Some(Change::Selected(text.to_string())),
            WidgetKind::Slider => text.parse().ok().map(Change::Slid),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Toggled(on) => write!(f, "toggled {}", if *on { "on" } else { "off" }),
            Change::Selected(option) => write!(f, "selected {option}"),
            Change::Slid(position) => write!(f, "slid to {position}"),
        }
    }
}
