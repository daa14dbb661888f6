// crates/ethercat-esi/src/codegen/fmmu.rs

use super::{CodegenOptions, STATEMENT_LEVEL, StWriter, SyncManagerTable};
use crate::error::EsiError;
use crate::literal::SyncManagerType;
use crate::types::Device;

/// FMMU usage that maps the mailbox state bit instead of a sync manager.
const MBOX_STATE: &str = "MBoxState";

/// Emits the `AddFMMU` statements for every `<Fmmu>` of the device.
pub(crate) fn emit_fmmus(
    out: &mut StWriter,
    device: &Device,
    table: &SyncManagerTable,
    options: &CodegenOptions,
) -> Result<(), EsiError> {
    let slave = options.slave_pointer.as_str();
    for fmmu in &device.fmmus {
        if fmmu.usage == MBOX_STATE {
            out.line(
                STATEMENT_LEVEL,
                format_args!("{}^.AddFMMU(0, 1, 0, 0, 16#80D, 0, 1, 1);", slave),
            )?;
            out.line(STATEMENT_LEVEL, format_args!("{}^.AlignFMMU();", slave))?;
            continue;
        }

        let sm = table
            .get(&fmmu.usage)
            .ok_or_else(|| EsiError::UnknownSyncManagerReference {
                device: device.name.clone(),
                direction: fmmu.usage.clone(),
            })?;
        // 1 = read (inputs), 2 = write
        let access = if sm.sm_type == SyncManagerType::Inputs { 1 } else { 2 };
        out.line(
            STATEMENT_LEVEL,
            format_args!(
                "{}^.AddFMMU(dwGlobalStartAddress := 0, wLength := {}, usiStartBit := 0, usiEndBit := 7, wPhysStartAddress := {}, usiPhysStartBit := 0, usiAccess := {}, dwFlags := 1);",
                slave, sm.length, sm.start_address, access
            ),
        )?;
    }
    Ok(())
}
