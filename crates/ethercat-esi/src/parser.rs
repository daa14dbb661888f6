// crates/ethercat-esi/src/parser.rs

use crate::error::EsiError;
use crate::model;
use crate::resolver;
use crate::types::EsiFile;

/// Parses an ESI (EtherCAT Slave Information) string slice and extracts the
/// vendor and every device description.
///
/// # Arguments
/// * `xml_content` - A string slice containing the full ESI XML file.
///
/// # Errors
/// Returns an `EsiError` if the XML cannot be deserialized or the vendor ID
/// or a device product code is missing.
pub fn load_esi_from_str(xml_content: &str) -> Result<EsiFile, EsiError> {
    // 1. Deserialize the raw XML string into our internal model.
    let container: model::EtherCatInfo = quick_xml::de::from_str(xml_content)?;

    // 2. Resolve the model into the public types.
    resolver::resolve_data(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESI: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<EtherCATInfo Version="1.6">
  <Vendor>
    <Id>#x00000002</Id>
    <Name LcId="1031">Hersteller</Name>
    <Name LcId="1033">Maker</Name>
  </Vendor>
  <Descriptions>
    <Groups><Group><Type>Terminals</Type><Name>Terminals</Name></Group></Groups>
    <Devices>
      <Device Physics="YY">
        <Type ProductCode="#x07d83052" RevisionNo="#x00100000">EL2008</Type>
        <Name LcId="1033"><![CDATA[EL2008 8Ch. Dig. Output]]></Name>
        <GroupType>Terminals</GroupType>
        <Fmmu>Outputs</Fmmu>
        <Sm StartAddress="#x0f00" ControlByte="#x44" Enable="1">Outputs</Sm>
        <RxPdo Fixed="1" Sm="0">
          <Index>#x1600</Index>
          <Name>Channel 1</Name>
          <Entry>
            <Index>#x7000</Index>
            <SubIndex>1</SubIndex>
            <BitLen>1</BitLen>
            <Name>Output</Name>
            <DataType>BOOL</DataType>
          </Entry>
        </RxPdo>
        <RxPdo Fixed="1" Sm="0"><Index>#x1601</Index><Name>Channel 2</Name></RxPdo>
      </Device>
      <Device>
        <Type ProductCode="#x03ec3052">EK1100</Type>
      </Device>
    </Devices>
  </Descriptions>
</EtherCATInfo>"##;

    #[test]
    fn test_load_vendor_and_devices() {
        let file = load_esi_from_str(ESI).unwrap();
        assert_eq!(file.vendor.id, "#x00000002");
        assert_eq!(file.vendor.name, "Maker");
        assert_eq!(file.devices.len(), 2);

        let el2008 = &file.devices[0];
        assert_eq!(el2008.product_code, "#x07d83052");
        assert_eq!(el2008.type_name, "EL2008");
        assert_eq!(el2008.name, "EL2008 8Ch. Dig. Output");
        assert_eq!(el2008.fmmus.len(), 1);
        assert_eq!(el2008.fmmus[0].usage, "Outputs");

        let sm = &el2008.sync_managers[0];
        assert_eq!(sm.direction, "Outputs");
        assert_eq!(sm.start_address.as_deref(), Some("#x0f00"));
        assert_eq!(sm.default_size, None);
        assert_eq!(sm.enable.as_deref(), Some("1"));

        let rx = el2008.rx_pdo.as_ref().unwrap();
        assert_eq!(rx.index, "#x1600");
        assert_eq!(rx.entries.len(), 1);
        assert_eq!(rx.entries[0].data_type.as_deref(), Some("BOOL"));
        assert!(el2008.tx_pdo.is_none());

        // Without a <Name> the order code is used
        assert_eq!(file.devices[1].name, "EK1100");
        assert!(file.devices[1].sync_managers.is_empty());
    }

    #[test]
    fn test_missing_product_code_is_rejected() {
        let xml = ESI.replace(r##"ProductCode="#x03ec3052""##, "");
        assert!(matches!(
            load_esi_from_str(&xml),
            Err(EsiError::MissingAttribute {
                element: "Type",
                attribute: "ProductCode"
            })
        ));
    }

    #[test]
    fn test_missing_vendor_id_is_rejected() {
        let xml = ESI.replace("<Id>#x00000002</Id>", "");
        assert!(matches!(
            load_esi_from_str(&xml),
            Err(EsiError::MissingElement {
                element: "Vendor/Id"
            })
        ));
    }
}
