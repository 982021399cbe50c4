use tracing::info;

use crate::control::ControlId;
use crate::device::{self, Device, Registry};
use crate::error::{Error, Result};
use crate::event::Change;
use crate::layout::DeviceLayout;
use crate::snapshot::Snapshot;

/// An open device and the layout built from it.
pub struct Tab {
    device: Box<dyn Device>,
    layout: DeviceLayout,
}

impl Tab {
    fn open(registry: &dyn Registry, path: &str) -> Result<Self> {
        let device = registry.open(path)?;
        let layout = DeviceLayout::build(device.as_ref())?;
        info!(path, device = device.name(), controls = layout.bindings().len(), "device ready");
        Ok(Self { device, layout })
    }

    pub fn layout(&self) -> &DeviceLayout {
        &self.layout
    }
}

/// Owns every open device of a panel and routes widget changes to them.
///
/// Opening is all or nothing: a device that cannot be listed, opened or laid out
/// aborts the whole panel. Devices opened before the failure are dropped.
#[derive(Default)]
pub struct Manager {
    tabs: Vec<Tab>,
}

impl Manager {
    /// Open every device the registry lists, ordered by path.
    pub fn open(registry: &dyn Registry) -> Result<Self> {
        let paths = registry.list()?;
        info!(devices = paths.len(), "opening devices");

        let tabs = paths
            .keys()
            .map(|path| Tab::open(registry, path))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tabs })
    }

    /// Open a single device given by path or display name.
    pub fn open_one(registry: &dyn Registry, device: &str) -> Result<Self> {
        let path = device::resolve_path(registry, device)?;
        Ok(Self {
            tabs: vec![Tab::open(registry, &path)?],
        })
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn layout(&self, tab: usize) -> Option<&DeviceLayout> {
        self.tabs.get(tab).map(Tab::layout)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Apply a widget change on `tab` to that tab's device.
    pub fn dispatch(&mut self, tab: usize, id: ControlId, change: Change) -> Result<i64> {
        let Tab { device, layout } = self
            .tabs
            .get_mut(tab)
            .ok_or_else(|| Error::UnknownDevice(format!("tab {tab}")))?;
        layout.handle(id, change, &mut **device)
    }

    /// Snapshots of every tab, in tab order.
    pub fn snapshot(&self) -> Vec<Snapshot> {
        self.tabs.iter().map(|t| Snapshot::from(&t.layout)).collect()
    }

    /// Close every device.
    pub fn close(self) {
        for tab in self.tabs {
            info!(path = tab.layout.path(), "closing device");
            tab.device.close();
        }
    }
}
