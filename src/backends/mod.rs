//! Device backends for `camctl`.
//!
//! Implementations of [`Registry`](crate::device::Registry) and
//! [`Device`](crate::device::Device).
//!
//! # Feature flags
//! - **`v4l2`**: real Video4Linux2 hardware through the `v4l` crate.
//!
//! The fixture backend is always available and is what development builds use.

use tracing::info;

use crate::config::Settings;
use crate::device::Registry;
use crate::error::Result;

pub mod fixture;

#[cfg(feature = "v4l2")]
#[cfg_attr(docsrs, doc(cfg(feature = "v4l2")))]
pub mod v4l2;

/// Pick the registry the settings ask for.
///
/// Fixtures come from the settings' table when one is configured, otherwise the
/// built-in table. Hardware is only available with the `v4l2` feature.
pub fn probe_registry(settings: &Settings) -> Result<Box<dyn Registry>> {
    if settings.use_fixtures {
        let table = settings.fixtures.clone().unwrap_or_else(fixture::FixtureTable::builtin);
        info!(devices = table.devices.len(), "using fixture devices");
        return Ok(Box::new(fixture::FixtureRegistry::new(table)));
    }

    #[cfg(feature = "v4l2")]
    let registry: Result<Box<dyn Registry>> = {
        info!("using v4l2 hardware");
        Ok(Box::new(v4l2::V4l2Registry::new()))
    };

    #[cfg(not(feature = "v4l2"))]
    let registry: Result<Box<dyn Registry>> =
        Err(crate::error::Error::BackendUnavailable("v4l2"));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::fixture::{FixtureDeviceSpec, FixtureTable};

    #[test]
    fn fixtures_default_to_builtin_table() {
        let settings = Settings {
            use_fixtures: true,
            ..Settings::default()
        };
        let registry = probe_registry(&settings).unwrap();
        assert_eq!(registry.list().unwrap().len(), 2);
    }

    #[test]
    fn configured_fixture_table_wins() {
        let settings = Settings {
            use_fixtures: true,
            fixtures: Some(FixtureTable {
                devices: vec![FixtureDeviceSpec {
                    name: "Bench Cam".into(),
                    controls: vec![],
                }],
            }),
            ..Settings::default()
        };
        let registry = probe_registry(&settings).unwrap();
        let list = registry.list().unwrap();
        assert_eq!(list.values().collect::<Vec<_>>(), vec!["Bench Cam"]);
    }

    #[cfg(not(feature = "v4l2"))]
    #[test]
    fn hardware_without_feature_is_unavailable() {
        let settings = Settings {
            use_fixtures: false,
            ..Settings::default()
        };
        assert!(matches!(
            probe_registry(&settings),
            Err(crate::error::Error::BackendUnavailable("v4l2"))
        ));
    }
}
