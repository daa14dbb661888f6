// crates/ethercat-esi/src/codegen/mod.rs

//! Generates IEC 61131-3 Structured Text that registers the sync managers and
//! FMMUs of every device in an ESI file with an EtherCAT master.
//!
//! The output is a `CASE` on the vendor ID holding a `CASE` on the product
//! code, one branch per `<Device>`. PDO struct declarations are collected
//! while the branches are written and appended once after the dispatch.

mod fmmu;
mod pdo;
mod sync_manager;

pub use pdo::{PdoKind, build_pdo_struct, sanitize_identifier, struct_name};
pub use sync_manager::{PdoSizes, SyncManager, SyncManagerTable};

use crate::error::EsiError;
use crate::literal::{StandardTypeSizes, TypeSizes, normalize_number};
use crate::parser::load_esi_from_str;
use crate::types::{Device, EsiFile};
use alloc::string::{String, ToString};
use core::fmt::{self, Write};
use log::{debug, info};

/// Indentation depth of each part of the dispatch block.
const VENDOR_LEVEL: usize = 1;
const PRODUCT_CASE_LEVEL: usize = 2;
const PRODUCT_LEVEL: usize = 3;
pub(crate) const STATEMENT_LEVEL: usize = 4;

/// Names on the target side that the generated code refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Pointer to the slave function block (`pSlave^.AddSyncManager(...)`).
    pub slave_pointer: String,
    /// Expression holding the vendor ID read from the slave EEPROM.
    pub vendor_selector: String,
    /// Expression holding the product code read from the slave EEPROM.
    pub product_selector: String,
    /// Variable set to `TRUE` once a device branch has run.
    pub recognized_flag: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            slave_pointer: "pSlave".to_string(),
            vendor_selector: "readeeprom.dwVendorID".to_string(),
            product_selector: "readeeprom.dwProductID".to_string(),
            recognized_flag: "xDeviceRecognized".to_string(),
        }
    }
}

/// Line-oriented writer for Structured Text with tab indentation.
#[derive(Debug, Default)]
pub(crate) struct StWriter {
    buf: String,
}

impl StWriter {
    pub(crate) fn line(&mut self, level: usize, args: fmt::Arguments<'_>) -> Result<(), EsiError> {
        for _ in 0..level {
            self.buf.push('\t');
        }
        self.buf.write_fmt(args)?;
        self.buf.push('\n');
        Ok(())
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

/// Append-only collection of struct declarations, in device order.
#[derive(Debug, Default)]
pub struct StructBuffer {
    text: String,
    count: usize,
}

impl StructBuffer {
    pub fn append(&mut self, declaration: &str) {
        if self.count > 0 {
            self.text.push('\n');
        }
        self.text.push_str(declaration);
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Drives code generation for a whole ESI file.
#[derive(Debug, Clone, Default)]
pub struct SlaveCodeGenerator<S = StandardTypeSizes> {
    options: CodegenOptions,
    sizes: S,
}

impl SlaveCodeGenerator<StandardTypeSizes> {
    pub fn new(options: CodegenOptions) -> Self {
        Self {
            options,
            sizes: StandardTypeSizes,
        }
    }
}

impl<S: TypeSizes> SlaveCodeGenerator<S> {
    /// Replaces the table used to size PDO struct members.
    pub fn with_type_sizes<T: TypeSizes>(self, sizes: T) -> SlaveCodeGenerator<T> {
        SlaveCodeGenerator {
            options: self.options,
            sizes,
        }
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Generates the dispatch block followed by every PDO struct declaration.
    pub fn generate(&self, file: &EsiFile) -> Result<String, EsiError> {
        let opts = &self.options;
        let mut out = StWriter::default();
        let mut structs = StructBuffer::default();

        out.line(0, format_args!("CASE {} OF", opts.vendor_selector))?;
        out.line(
            VENDOR_LEVEL,
            format_args!(
                "{}: // {}",
                normalize_number(&file.vendor.id),
                file.vendor.name
            ),
        )?;
        out.line(
            PRODUCT_CASE_LEVEL,
            format_args!("CASE {} OF", opts.product_selector),
        )?;

        for device in &file.devices {
            self.generate_device(&mut out, &mut structs, device)?;
        }

        out.line(PRODUCT_CASE_LEVEL, format_args!("END_CASE"))?;
        out.line(0, format_args!("END_CASE"))?;

        if !structs.is_empty() {
            out.blank();
            out.push_str(structs.as_str());
        }

        info!(
            "Generated {} device cases and {} PDO structs",
            file.devices.len(),
            structs.len()
        );
        Ok(out.into_string())
    }

    fn generate_device(
        &self,
        out: &mut StWriter,
        structs: &mut StructBuffer,
        device: &Device,
    ) -> Result<(), EsiError> {
        out.line(
            PRODUCT_LEVEL,
            format_args!("{}: // {}", normalize_number(&device.product_code), device.name),
        )?;

        // Struct sizes must exist before the sync managers that infer from them.
        let pdo_sizes = PdoSizes {
            rx: build_pdo_struct(device, PdoKind::Rx, &self.sizes, structs)?,
            tx: build_pdo_struct(device, PdoKind::Tx, &self.sizes, structs)?,
        };
        debug!("Device {}: PDO sizes {:?}", device.name, pdo_sizes);

        let table = SyncManagerTable::build(device, pdo_sizes)?;
        table.emit(out, &self.options)?;
        fmmu::emit_fmmus(out, device, &table, &self.options)?;

        out.line(
            STATEMENT_LEVEL,
            format_args!("{} := TRUE;", self.options.recognized_flag),
        )
    }
}

/// Parses an ESI document and generates its slave initialization code.
///
/// # Errors
/// Returns an `EsiError` if the document cannot be read, or any device uses
/// an unknown sync manager keyword, boolean literal, or PDO data type, or
/// has an FMMU or sync manager that cannot be resolved.
pub fn generate_slave_code(xml_content: &str, options: &CodegenOptions) -> Result<String, EsiError> {
    let file = load_esi_from_str(xml_content)?;
    SlaveCodeGenerator::new(options.clone()).generate(&file)
}
