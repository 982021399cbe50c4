//! Widget-to-device sync.
//!
//! A [`ControlBinding`] ties one [`Control`] to the [`Widget`] showing it. The host
//! toolkit calls [`ControlBinding::handle`] synchronously whenever the user changes
//! the widget; the handler converts the payload to a device value, writes it
//! through an [`Apply`] target and refreshes what the widget shows.
//!
//! Nothing is read back from the device after the widget was built.
//!
//! # Failure semantics
//! - A payload that does not fit the widget is rejected before any write and the
//!   widget is left untouched.
//! - A failed write is logged and returned, but the widget keeps the state the
//!   user gave it. There is no rollback to the last value known to be good.

use tracing::{debug, warn};

use crate::control::Control;
use crate::device::{Apply, Device};
use crate::error::{Error, Result};
use crate::event::Change;
use crate::widget::{Widget, WidgetKind};

/// Where a binding is in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingState {
    /// Value loaded and displayed; waiting for input.
    #[default]
    Initialized,
    /// A change handler is running.
    Interacting,
}

/// One control bound to one widget.
#[derive(Debug, Clone)]
pub struct ControlBinding {
    control: Control,
    widget: Widget,
    state: BindingState,
}

impl ControlBinding {
    /// Bind `control` to a freshly built widget showing `current`.
    pub fn new(control: Control, current: i64) -> Self {
        let widget = Widget::build(&control, current);
        Self {
            control,
            widget,
            state: BindingState::Initialized,
        }
    }

    /// Read the control from `device` and bind it. Fails if the read fails.
    pub fn load(control: &Control, device: &dyn Device) -> Result<Self> {
        let widget = Widget::load(control, device)?;
        Ok(Self {
            control: control.clone(),
            widget,
            state: BindingState::Initialized,
        })
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn state(&self) -> BindingState {
        self.state
    }

    /// Static label shown before the widget: the control name, except for
    /// toggles which carry the name themselves.
    pub fn caption(&self) -> Option<&str> {
        match self.widget.kind() {
            WidgetKind::Toggle => None,
            WidgetKind::Choice | WidgetKind::Slider => Some(self.control.name()),
        }
    }

    /// Handle a user change: convert, write through `target`, update the widget.
    ///
    /// Returns the integer value that was sent.
    pub fn handle<A: Apply + ?Sized>(&mut self, change: Change, target: &mut A) -> Result<i64> {
        self.state = BindingState::Interacting;
        let result = self.sync(change, target);
        self.state = BindingState::Initialized;
        result
    }

    fn sync<A: Apply + ?Sized>(&mut self, change: Change, target: &mut A) -> Result<i64> {
        let value = device_value(&self.control, &self.widget, &change)?;
        debug!(control = self.control.name(), %change, value, "widget changed");

        // The widget shows what the user did regardless of the write outcome.
        match (&mut self.widget, change) {
            (Widget::Toggle { checked, .. }, Change::Toggled(on)) => *checked = on,
            (Widget::Choice { selected, .. }, Change::Selected(option)) => *selected = option,
            (
                Widget::Slider {
                    position,
                    value_label,
                    ..
                },
                Change::Slid(pos),
            ) => {
                *position = pos;
                *value_label = value.to_string();
            }
            // `device_value` already rejected mismatched payloads.
            _ => {}
        }

        if let Err(err) = target.apply(&self.control, value) {
            warn!(control = self.control.name(), value, error = %err, "control write failed");
            return Err(err);
        }
        Ok(value)
    }
}

/// Convert a change payload into the integer to send to the device.
///
/// - toggle: checked → maximum, unchecked → minimum
/// - choice: the option label parsed as an integer; must be one of the options
/// - slider: rounded to nearest, then clamped to `[minimum, maximum]`
pub fn device_value(control: &Control, widget: &Widget, change: &Change) -> Result<i64> {
    let invalid = |reason: String| Error::InvalidChange {
        name: control.name().to_string(),
        reason,
    };

    match (widget, change) {
        (Widget::Toggle { .. }, Change::Toggled(on)) => Ok(if *on {
            control.maximum()
        } else {
            control.minimum()
        }),
        (Widget::Choice { options, .. }, Change::Selected(option)) => {
            if !options.iter().any(|o| o == option) {
                return Err(invalid(format!("`{option}` is not one of {options:?}")));
            }
            option
                .parse()
                .map_err(|_| invalid(format!("`{option}` is not an integer")))
        }
        (Widget::Slider { .. }, Change::Slid(position)) => slider_value(control, *position)
            .ok_or_else(|| invalid(format!("slider position {position} is not finite"))),
        (widget, change) => Err(invalid(format!(
            "{:?} payload sent to a {:?} widget",
            change.kind(),
            widget.kind()
        ))),
    }
}

/// Round a slider position to the nearest integer and clamp it to the control's
/// range. `None` for NaN and infinities.
pub fn slider_value(control: &Control, position: f64) -> Option<i64> {
    if !position.is_finite() {
        return None;
    }
    // `as` saturates at the i64 bounds, so the clamp happens in integer space.
    Some(control.clamp(position.round() as i64))
}
