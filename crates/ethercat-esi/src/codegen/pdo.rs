// crates/ethercat-esi/src/codegen/pdo.rs

use super::{StWriter, StructBuffer};
use crate::error::EsiError;
use crate::literal::{TypeSizes, normalize_number, parse_number, type_prefix};
use crate::types::{Device, Pdo, PdoEntry};
use alloc::format;
use alloc::string::String;
use log::debug;

/// Which of the device's PDOs a struct is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdoKind {
    Rx,
    Tx,
}

impl PdoKind {
    pub fn suffix(self) -> &'static str {
        match self {
            PdoKind::Rx => "RxPdo",
            PdoKind::Tx => "TxPdo",
        }
    }

    fn select(self, device: &Device) -> Option<&Pdo> {
        match self {
            PdoKind::Rx => device.rx_pdo.as_ref(),
            PdoKind::Tx => device.tx_pdo.as_ref(),
        }
    }
}

/// Replaces spaces and hyphens with underscores.
pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// `<sanitized device name>_<RxPdo|TxPdo>`
pub fn struct_name(device_name: &str, kind: PdoKind) -> String {
    format!("{}_{}", sanitize_identifier(device_name), kind.suffix())
}

/// Appends the struct declaration for one of the device's PDOs to `structs`
/// and returns the struct's size in bytes, or `None` if the device has no
/// such PDO.
pub fn build_pdo_struct(
    device: &Device,
    kind: PdoKind,
    sizes: &impl TypeSizes,
    structs: &mut StructBuffer,
) -> Result<Option<usize>, EsiError> {
    let Some(pdo) = kind.select(device) else {
        return Ok(None);
    };

    let mut decl = StWriter::default();
    let mut total = 0usize;

    decl.line(0, format_args!("{{attribute 'pack_mode' := '1'}}"))?;
    decl.line(0, format_args!("TYPE {} :", struct_name(&device.name, kind)))?;
    decl.line(0, format_args!("STRUCT"))?;
    for entry in &pdo.entries {
        let Some(data_type) = entry.data_type.as_deref() else {
            debug!(
                "{} {}: padding entry {} skipped",
                device.name,
                kind.suffix(),
                entry.index
            );
            continue;
        };
        decl.line(
            1,
            format_args!(
                "{}{} : {}; // {}",
                type_prefix(data_type)?,
                entry.name.replace(' ', ""),
                data_type,
                entry_address(entry)
            ),
        )?;
        total = total
            .checked_add(sizes.byte_size(data_type)?)
            .ok_or_else(|| EsiError::SizeOverflow(struct_name(&device.name, kind)))?;
    }
    decl.line(0, format_args!("END_STRUCT"))?;
    decl.line(0, format_args!("END_TYPE"))?;

    structs.append(&decl.into_string());
    Ok(Some(total))
}

/// `Index[:SubIndex]`, leaving out a zero or missing SubIndex.
fn entry_address(entry: &PdoEntry) -> String {
    let index = normalize_number(&entry.index);
    match entry.sub_index.as_deref().map(str::trim) {
        Some(sub) if !sub.is_empty() && parse_number(sub) != Some(0) => {
            format!("{}:{}", index, normalize_number(sub))
        }
        _ => index,
    }
}
