// crates/ethercat-esi/src/resolver/device.rs

use crate::error::EsiError;
use crate::model;
use crate::model::common::preferred_text;
use crate::types;
use alloc::string::{String, ToString};
use log::debug;

/// Maps a `model::Device` into a `types::Device`.
pub(super) fn resolve_device(model: &model::Device) -> Result<types::Device, EsiError> {
    let product_code = model
        .device_type
        .product_code
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or(EsiError::MissingAttribute {
            element: "Type",
            attribute: "ProductCode",
        })?
        .to_string();

    let type_name = model.device_type.value.trim().to_string();
    // Fall back to the order code when the device carries no <Name>
    let name = preferred_text(&model.name)
        .map(ToString::to_string)
        .unwrap_or_else(|| type_name.clone());

    if model.rx_pdo.len() > 1 || model.tx_pdo.len() > 1 {
        debug!(
            "Device {} lists {} RxPdo and {} TxPdo elements, using the first of each",
            name,
            model.rx_pdo.len(),
            model.tx_pdo.len()
        );
    }

    Ok(types::Device {
        product_code,
        type_name,
        name,
        sync_managers: model.sm.iter().map(resolve_sync_manager).collect(),
        fmmus: model
            .fmmu
            .iter()
            .map(|f| types::FmmuDesc {
                usage: f.value.trim().to_string(),
            })
            .collect(),
        rx_pdo: model.rx_pdo.first().map(resolve_pdo),
        tx_pdo: model.tx_pdo.first().map(resolve_pdo),
    })
}

fn resolve_sync_manager(sm: &model::Sm) -> types::SyncManagerDesc {
    types::SyncManagerDesc {
        direction: sm.value.trim().to_string(),
        start_address: trimmed(sm.start_address.as_ref()),
        control_byte: trimmed(sm.control_byte.as_ref()),
        default_size: trimmed(sm.default_size.as_ref()),
        enable: trimmed(sm.enable.as_ref()),
    }
}

fn resolve_pdo(pdo: &model::Pdo) -> types::Pdo {
    types::Pdo {
        index: pdo.index.trim().to_string(),
        name: preferred_text(&pdo.name).unwrap_or_default().to_string(),
        entries: pdo
            .entry
            .iter()
            .map(|e| types::PdoEntry {
                index: e.index.trim().to_string(),
                sub_index: trimmed(e.sub_index.as_ref()),
                name: preferred_text(&e.name).unwrap_or_default().to_string(),
                data_type: trimmed(e.data_type.as_ref()),
            })
            .collect(),
    }
}

/// Trims an optional attribute, treating blank values as absent.
fn trimmed(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
