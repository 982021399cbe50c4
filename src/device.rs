//! Device registry and device handle traits.
//!
//! Backends (see [`backends`](crate::backends)) implement [`Registry`] to list and
//! open devices and [`Device`] for an open handle. Everything above this layer
//! (widget building, sync, the manager, front ends) only talks to these traits.
//!
//! All calls are synchronous and are expected to run on the UI thread.

use std::collections::BTreeMap;

use crate::control::{Control, ControlId, ControlSet};
use crate::error::{Error, Result};

/// An open device handle.
pub trait Device {
    /// Human-readable device name (e.g. the V4L2 card name).
    fn name(&self) -> &str;

    /// Path the device was opened from. Stable for the session.
    fn path(&self) -> &str;

    /// Controls reported at open time.
    fn controls(&self) -> &ControlSet;

    /// Read the current value of a control.
    fn get(&self, id: ControlId) -> Result<i64>;

    /// Write a control value.
    fn set(&mut self, id: ControlId, value: i64) -> Result<()>;

    /// Release the handle. Dropping the box does the same; this exists so
    /// callers can log an explicit close.
    fn close(self: Box<Self>) {}
}

/// Lists and opens devices.
pub trait Registry {
    /// Available devices as `path → display name`.
    fn list(&self) -> Result<BTreeMap<String, String>>;

    /// Open the device at `path`.
    fn open(&self, path: &str) -> Result<Box<dyn Device>>;
}

/// Synchronous "write this value to this control" capability.
///
/// Sync handlers write through this instead of a concrete device so headless and
/// scripted front ends can reuse them. Every [`Device`] is an `Apply`.
pub trait Apply {
    fn apply(&mut self, control: &Control, value: i64) -> Result<()>;
}

impl<D: Device + ?Sized> Apply for D {
    fn apply(&mut self, control: &Control, value: i64) -> Result<()> {
        self.set(control.id(), value)
    }
}

/// Resolve a device argument that may be either a registry path or a display
/// name (case-insensitive). Paths win over names.
pub fn resolve_path(registry: &dyn Registry, wanted: &str) -> Result<String> {
    let devices = registry.list()?;
    if devices.contains_key(wanted) {
        return Ok(wanted.to_string());
    }
    devices
        .into_iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(wanted))
        .map(|(path, _)| path)
        .ok_or_else(|| Error::UnknownDevice(wanted.to_string()))
}
