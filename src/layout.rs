//! Per-device layout: every control of a device bound to a widget.

use tracing::debug;

use crate::binding::ControlBinding;
use crate::control::ControlId;
use crate::device::{Apply, Device};
use crate::error::{Error, Result};
use crate::event::Change;

/// Bindings for all controls of one device, in control id order.
#[derive(Debug, Clone)]
pub struct DeviceLayout {
    device_name: String,
    path: String,
    bindings: Vec<ControlBinding>,
}

impl DeviceLayout {
    /// Read every control of `device` and bind it.
    ///
    /// All or nothing: if any read fails the whole layout fails and nothing is
    /// returned.
    pub fn build(device: &dyn Device) -> Result<Self> {
        let bindings = device
            .controls()
            .iter()
            .map(|control| ControlBinding::load(control, device))
            .collect::<Result<Vec<_>>>()?;

        debug!(device = device.name(), bindings = bindings.len(), "built layout");
        Ok(Self {
            device_name: device.name().to_string(),
            path: device.path().to_string(),
            bindings,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bindings(&self) -> &[ControlBinding] {
        &self.bindings
    }

    pub fn binding(&self, id: ControlId) -> Option<&ControlBinding> {
        self.bindings.iter().find(|b| b.control().id() == id)
    }

    /// Find a binding by control name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&ControlBinding> {
        self.bindings
            .iter()
            .find(|b| b.control().name().eq_ignore_ascii_case(name))
    }

    /// Route a change to the binding for `id`.
    pub fn handle<A: Apply + ?Sized>(
        &mut self,
        id: ControlId,
        change: Change,
        target: &mut A,
    ) -> Result<i64> {
        let binding = self
            .bindings
            .iter_mut()
            .find(|b| b.control().id() == id)
            .ok_or_else(|| Error::UnknownControl(id.to_string()))?;
        binding.handle(change, target)
    }
}
