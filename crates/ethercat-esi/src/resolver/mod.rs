// crates/ethercat-esi/src/resolver/mod.rs

//! Handles the business logic of resolving the public device types from the
//! deserialized ESI model.

use crate::error::EsiError;
use crate::model::EtherCatInfo;
use crate::model::common::preferred_text;
use crate::types;
use alloc::string::ToString;
use log::debug;

// --- Sub-modules ---

mod device;

/// Resolves the final `EsiFile` from the raw deserialized container.
pub(crate) fn resolve_data(container: EtherCatInfo) -> Result<types::EsiFile, EsiError> {
    let vendor_id = container.vendor.id.trim();
    if vendor_id.is_empty() {
        return Err(EsiError::MissingElement {
            element: "Vendor/Id",
        });
    }

    let vendor = types::Vendor {
        id: vendor_id.to_string(),
        name: preferred_text(&container.vendor.name)
            .unwrap_or_default()
            .to_string(),
    };

    let devices = container
        .descriptions
        .devices
        .device
        .iter()
        .map(device::resolve_device)
        .collect::<Result<_, _>>()?;

    let file = types::EsiFile { vendor, devices };
    debug!(
        "Resolved vendor {} with {} devices (ESI version {})",
        file.vendor.id,
        file.devices.len(),
        container.version.as_deref().unwrap_or("unknown")
    );
    Ok(file)
}
