// crates/ethercat-esi/src/model/mod.rs

//! Internal `serde` data structures that map directly to the ESI XML schema.
//!
//! Only the parts of `EtherCATInfo` needed to generate slave initialization
//! code are modelled. Everything else in the file is skipped by the
//! deserializer. These structs are parsed via `quick-xml` and are not
//! intended for direct public use.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use alloc::vec::Vec;
use serde::Deserialize;

pub mod common;
pub mod device;
pub mod vendor;

// Re-export key components for internal use
pub use device::{Device, Pdo, Sm};
pub use vendor::Vendor;

/// The root element of an ESI file.
///
/// Represents the `<EtherCATInfo>` element defined in `EtherCATInfo.xsd`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename = "EtherCATInfo")]
pub struct EtherCatInfo {
    #[serde(rename = "@Version", default)]
    pub version: Option<alloc::string::String>,

    #[serde(rename = "Vendor")]
    pub vendor: Vendor,

    #[serde(rename = "Descriptions")]
    pub descriptions: Descriptions,
}

/// Represents `<Descriptions>`; groups and modules are not needed.
#[derive(Debug, Deserialize, Default)]
pub struct Descriptions {
    #[serde(rename = "Devices", default)]
    pub devices: Devices,
}

/// Represents `<Devices>`.
#[derive(Debug, Deserialize, Default)]
pub struct Devices {
    #[serde(rename = "Device", default)]
    pub device: Vec<Device>,
}
