// crates/ethercat-esi/src/types.rs

//! Public, ergonomic data structures for the devices of a parsed ESI file.
//!
//! Values are kept as the literal text found in the file (`#x1000`, `128`);
//! normalization into target literals happens during code generation.

use alloc::string::String;
use alloc::vec::Vec;

// --- Root ESI Structure ---

/// Represents the device part of a parsed ESI file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EsiFile {
    /// Information from the `<Vendor>` block.
    pub vendor: Vendor,

    /// Every `<Device>` in document order.
    pub devices: Vec<Device>,
}

/// Represents the `<Vendor>` block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Vendor {
    /// `<Id>`, hex (`#x…`) or decimal text.
    pub id: String,
    /// `<Name>` (English if available)
    pub name: String,
}

/// Represents one `<Device>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Device {
    /// `Type@ProductCode`
    pub product_code: String,
    /// Text of `<Type>`, the order code (e.g. "EL1008").
    pub type_name: String,
    /// `<Name>` (English if available)
    pub name: String,
    /// All `<Sm>` elements in document order.
    pub sync_managers: Vec<SyncManagerDesc>,
    /// All `<Fmmu>` elements in document order.
    pub fmmus: Vec<FmmuDesc>,
    /// The first `<RxPdo>`, if any.
    pub rx_pdo: Option<Pdo>,
    /// The first `<TxPdo>`, if any.
    pub tx_pdo: Option<Pdo>,
}

/// Represents an `<Sm>` element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncManagerDesc {
    /// Text content: Inputs, Outputs, MBoxIn or MBoxOut.
    pub direction: String,
    pub start_address: Option<String>,
    pub control_byte: Option<String>,
    pub default_size: Option<String>,
    pub enable: Option<String>,
}

/// Represents an `<Fmmu>` element.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FmmuDesc {
    /// Text content: a sync manager direction or `MBoxState`.
    pub usage: String,
}

/// Represents an `<RxPdo>` or `<TxPdo>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pdo {
    pub index: String,
    pub name: String,
    pub entries: Vec<PdoEntry>,
}

/// Represents one `<Entry>` of a PDO.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PdoEntry {
    pub index: String,
    pub sub_index: Option<String>,
    pub name: String,
    /// `None` for padding entries.
    pub data_type: Option<String>,
}
