// crates/ethercat-esi/src/model/device.rs

//! Contains model structs related to `<Device>`.

use super::common::LocalizedTexts;
use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

/// Represents one `<Device>` inside `<Devices>`.
#[derive(Debug, Deserialize, Default)]
pub struct Device {
    #[serde(rename = "Type")]
    pub device_type: DeviceType,

    #[serde(rename = "Name", default)]
    pub name: LocalizedTexts,

    /// FMMU usage, one per FMMU of the ESC (e.g. "Outputs", "MBoxState").
    #[serde(rename = "Fmmu", default)]
    pub fmmu: Vec<Fmmu>,

    #[serde(rename = "Sm", default)]
    pub sm: Vec<Sm>,

    #[serde(rename = "RxPdo", default)]
    pub rx_pdo: Vec<Pdo>,

    #[serde(rename = "TxPdo", default)]
    pub tx_pdo: Vec<Pdo>,
}

/// Represents `<Type ProductCode="#x...">EL1008</Type>`.
#[derive(Debug, Deserialize, Default)]
pub struct DeviceType {
    #[serde(rename = "@ProductCode", default)]
    pub product_code: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Represents `<Fmmu>Outputs</Fmmu>`.
#[derive(Debug, Deserialize, Default)]
pub struct Fmmu {
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Represents `<Sm StartAddress=".." ControlByte=".." ...>MBoxOut</Sm>`.
#[derive(Debug, Deserialize, Default)]
pub struct Sm {
    #[serde(rename = "@DefaultSize", default)]
    pub default_size: Option<String>,

    #[serde(rename = "@StartAddress", default)]
    pub start_address: Option<String>,

    #[serde(rename = "@ControlByte", default)]
    pub control_byte: Option<String>,

    #[serde(rename = "@Enable", default)]
    pub enable: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Represents `<RxPdo>` or `<TxPdo>`.
#[derive(Debug, Deserialize, Default)]
pub struct Pdo {
    #[serde(rename = "Index", default)]
    pub index: String,

    #[serde(rename = "Name", default)]
    pub name: LocalizedTexts,

    #[serde(rename = "Entry", default)]
    pub entry: Vec<Entry>,
}

/// Represents one `<Entry>` of a PDO.
#[derive(Debug, Deserialize, Default)]
pub struct Entry {
    #[serde(rename = "Index", default)]
    pub index: String,

    #[serde(rename = "SubIndex", default)]
    pub sub_index: Option<String>,

    #[serde(rename = "Name", default)]
    pub name: LocalizedTexts,

    /// Absent on padding entries.
    #[serde(rename = "DataType", default)]
    pub data_type: Option<String>,
}
