// crates/ethercat-esi/src/codegen/sync_manager.rs

use super::{CodegenOptions, STATEMENT_LEVEL, StWriter};
use crate::error::EsiError;
use crate::literal::{ST_TRUE, SyncManagerType, normalize_bool, normalize_number};
use crate::types::{Device, SyncManagerDesc};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::debug;

/// Byte sizes of the device's PDO structs, used when an `<Sm>` has no
/// `DefaultSize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdoSizes {
    pub rx: Option<usize>,
    pub tx: Option<usize>,
}

/// A sync manager with every value already in target literal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncManager {
    pub sm_type: SyncManagerType,
    pub start_address: String,
    pub length: String,
    pub control_byte: String,
    pub enable: &'static str,
}

impl SyncManager {
    fn resolve(device: &Device, desc: &SyncManagerDesc, pdo_sizes: PdoSizes) -> Result<Self, EsiError> {
        let start_address = desc.start_address.as_deref().ok_or(EsiError::MissingAttribute {
            element: "Sm",
            attribute: "StartAddress",
        })?;
        let control_byte = desc.control_byte.as_deref().ok_or(EsiError::MissingAttribute {
            element: "Sm",
            attribute: "ControlByte",
        })?;
        let sm_type = SyncManagerType::from_keyword(&desc.direction)?;

        let (length, enable) = match desc.default_size.as_deref() {
            Some(size) => {
                let enable = match desc.enable.as_deref() {
                    Some(flag) => normalize_bool(flag)?,
                    None => ST_TRUE,
                };
                (normalize_number(size), enable)
            }
            None => {
                let inferred = match sm_type {
                    SyncManagerType::Outputs => pdo_sizes.tx,
                    SyncManagerType::Inputs => pdo_sizes.rx,
                    SyncManagerType::MBoxIn | SyncManagerType::MBoxOut => None,
                };
                let size = inferred.ok_or_else(|| EsiError::NoDefaultSizeForSyncManager {
                    device: device.name.clone(),
                    direction: desc.direction.clone(),
                })?;
                debug!("{}: {} size {} taken from PDO struct", device.name, desc.direction, size);
                (size.to_string(), ST_TRUE)
            }
        };

        Ok(Self {
            sm_type,
            start_address: normalize_number(start_address),
            length,
            control_byte: normalize_number(control_byte),
            enable,
        })
    }
}

/// The sync managers of one device, in document order and by direction.
#[derive(Debug, Clone, Default)]
pub struct SyncManagerTable {
    entries: Vec<SyncManager>,
    by_type: BTreeMap<SyncManagerType, usize>,
}

impl SyncManagerTable {
    pub fn build(device: &Device, pdo_sizes: PdoSizes) -> Result<Self, EsiError> {
        let mut table = Self::default();
        for desc in &device.sync_managers {
            let sm = SyncManager::resolve(device, desc, pdo_sizes)?;
            // A repeated direction keeps every statement; lookups see the last one.
            table.by_type.insert(sm.sm_type, table.entries.len());
            table.entries.push(sm);
        }
        Ok(table)
    }

    /// Looks up a sync manager by its direction keyword.
    pub fn get(&self, keyword: &str) -> Option<&SyncManager> {
        let sm_type = SyncManagerType::from_keyword(keyword).ok()?;
        self.by_type.get(&sm_type).map(|&i| &self.entries[i])
    }

    /// One `AddSyncManager` statement per sync manager.
    pub(crate) fn emit(&self, out: &mut StWriter, options: &CodegenOptions) -> Result<(), EsiError> {
        for sm in &self.entries {
            out.line(
                STATEMENT_LEVEL,
                format_args!(
                    "{}^.AddSyncManager(wStartAddress := {}, wLength := {}, usiMode := {}, xEnable := {}, usiType := {});",
                    options.slave_pointer,
                    sm.start_address,
                    sm.length,
                    sm.control_byte,
                    sm.enable,
                    sm.sm_type.code()
                ),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sm(direction: &str, start: &str, control: &str, size: Option<&str>, enable: Option<&str>) -> SyncManagerDesc {
        SyncManagerDesc {
            direction: direction.to_string(),
            start_address: Some(start.to_string()),
            control_byte: Some(control.to_string()),
            default_size: size.map(ToString::to_string),
            enable: enable.map(ToString::to_string),
            ..Default::default()
        }
    }

    fn device(sync_managers: Vec<SyncManagerDesc>) -> Device {
        Device {
            name: "EL2004".to_string(),
            sync_managers,
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_size_and_enable() {
        let dev = device(vec![sm("Outputs", "#x1000", "#x26", Some("#x10"), Some("1"))]);
        let table = SyncManagerTable::build(&dev, PdoSizes::default()).unwrap();
        let outputs = table.get("Outputs").unwrap();
        assert_eq!(outputs.start_address, "16#1000");
        assert_eq!(outputs.length, "16#10");
        assert_eq!(outputs.control_byte, "16#26");
        assert_eq!(outputs.enable, "TRUE");
        assert_eq!(outputs.sm_type.code(), 1);
    }

    #[test]
    fn test_absent_enable_defaults_to_true() {
        let dev = device(vec![sm("MBoxOut", "#x1800", "#x26", Some("128"), None)]);
        let table = SyncManagerTable::build(&dev, PdoSizes::default()).unwrap();
        assert_eq!(table.get("MBoxOut").unwrap().enable, "TRUE");
        assert_eq!(table.get("MBoxOut").unwrap().length, "128");
    }

    #[test]
    fn test_size_inferred_from_pdo_structs() {
        let dev = device(vec![
            sm("Outputs", "#xF00", "#x44", None, None),
            sm("Inputs", "#x1000", "#x20", None, None),
        ]);
        let sizes = PdoSizes { rx: Some(3), tx: Some(5) };
        let table = SyncManagerTable::build(&dev, sizes).unwrap();
        assert_eq!(table.get("Outputs").unwrap().length, "5");
        assert_eq!(table.get("Inputs").unwrap().length, "3");
        assert_eq!(table.get("Inputs").unwrap().enable, "TRUE");
    }

    #[test]
    fn test_missing_size_without_pdo() {
        let dev = device(vec![sm("Outputs", "#xF00", "#x44", None, None)]);
        let err = SyncManagerTable::build(&dev, PdoSizes { rx: Some(2), tx: None }).unwrap_err();
        assert!(matches!(
            err,
            EsiError::NoDefaultSizeForSyncManager { ref device, ref direction }
                if device == "EL2004" && direction == "Outputs"
        ));
    }

    #[test]
    fn test_missing_start_address() {
        let mut desc = sm("Outputs", "#xF00", "#x44", Some("1"), None);
        desc.start_address = None;
        let err = SyncManagerTable::build(&device(vec![desc]), PdoSizes::default()).unwrap_err();
        assert!(matches!(
            err,
            EsiError::MissingAttribute { element: "Sm", attribute: "StartAddress" }
        ));
    }

    #[test]
    fn test_bad_keyword_and_bool() {
        let dev = device(vec![sm("Mailbox", "#x1000", "#x26", Some("1"), None)]);
        assert!(matches!(
            SyncManagerTable::build(&dev, PdoSizes::default()),
            Err(EsiError::UnknownSyncManagerType(_))
        ));

        let dev = device(vec![sm("Outputs", "#x1000", "#x26", Some("1"), Some("yes"))]);
        assert!(matches!(
            SyncManagerTable::build(&dev, PdoSizes::default()),
            Err(EsiError::InvalidBooleanLiteral(_))
        ));
    }

    #[test]
    fn test_emit_statements_in_document_order() {
        let dev = device(vec![
            sm("MBoxOut", "#x1800", "#x26", Some("#x80"), Some("1")),
            sm("MBoxIn", "#x1880", "#x22", Some("#x80"), Some("0")),
        ]);
        let table = SyncManagerTable::build(&dev, PdoSizes::default()).unwrap();
        let mut out = StWriter::default();
        table.emit(&mut out, &CodegenOptions::default()).unwrap();
        assert_eq!(
            out.into_string(),
            "\t\t\t\tpSlave^.AddSyncManager(wStartAddress := 16#1800, wLength := 16#80, usiMode := 16#26, xEnable := TRUE, usiType := 3);\n\
             \t\t\t\tpSlave^.AddSyncManager(wStartAddress := 16#1880, wLength := 16#80, usiMode := 16#22, xEnable := FALSE, usiType := 2);\n"
        );
    }
}
