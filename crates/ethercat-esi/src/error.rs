// crates/ethercat-esi/src/error.rs

use alloc::fmt;
use alloc::string::String;
use quick_xml::errors::serialize::DeError;
use quick_xml::Error as XmlError;

/// Errors that can occur while reading an ESI file or generating output from it.
#[derive(Debug)]
pub enum EsiError {
    /// An error from the underlying `quick-xml` deserializer (device model).
    XmlParsing(DeError),

    /// An error from the underlying `quick-xml` pull reader (element tree).
    XmlReading(XmlError),

    /// An error occurred during string formatting of generated output.
    FmtError(fmt::Error),

    /// A required XML element was missing (e.g., the `Name` of a DataType).
    MissingElement { element: &'static str },

    /// A required attribute was missing on a sync manager (e.g., @StartAddress).
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// A sync manager's text was not one of Inputs, Outputs, MBoxIn or MBoxOut.
    UnknownSyncManagerType(String),

    /// A boolean attribute was neither "1" nor "0".
    InvalidBooleanLiteral(String),

    /// A PDO entry data type has no entry in the prefix or size table.
    UnknownDataType(String),

    /// An Object's `DTxxxx` type names a DataType that the file does not define.
    UnknownCustomDataType { index: String, data_type: String },

    /// An FMMU refers to a sync manager direction the device does not declare.
    UnknownSyncManagerReference { device: String, direction: String },

    /// A sync manager has no `DefaultSize` and no PDO to infer one from.
    NoDefaultSizeForSyncManager { device: String, direction: String },

    /// A data type or PDO struct is too large to size in `usize` bytes.
    SizeOverflow(String),
}

impl From<DeError> for EsiError {
    fn from(e: DeError) -> Self {
        EsiError::XmlParsing(e)
    }
}

impl From<XmlError> for EsiError {
    fn from(e: XmlError) -> Self {
        EsiError::XmlReading(e)
    }
}

impl From<fmt::Error> for EsiError {
    fn from(e: fmt::Error) -> Self {
        EsiError::FmtError(e)
    }
}

impl fmt::Display for EsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsiError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            EsiError::XmlReading(e) => write!(f, "XML reading error: {}", e),
            EsiError::FmtError(e) => write!(f, "Formatting error: {}", e),
            EsiError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            EsiError::MissingAttribute { element, attribute } => {
                write!(f, "Missing required attribute {} on <{}>", attribute, element)
            }
            EsiError::UnknownSyncManagerType(text) => {
                write!(f, "Unknown sync manager type: {:?}", text)
            }
            EsiError::InvalidBooleanLiteral(text) => {
                write!(f, "Unrecognized boolean value: {:?}", text)
            }
            EsiError::UnknownDataType(name) => write!(f, "Unknown data type: {:?}", name),
            EsiError::UnknownCustomDataType { index, data_type } => write!(
                f,
                "Object {} references DataType {} which is not defined",
                index, data_type
            ),
            EsiError::UnknownSyncManagerReference { device, direction } => write!(
                f,
                "FMMU of device {:?} references sync manager {:?} which is not defined",
                device, direction
            ),
            EsiError::NoDefaultSizeForSyncManager { device, direction } => write!(
                f,
                "Sync manager {:?} of device {:?} has no DefaultSize and no PDO to infer it from",
                direction, device
            ),
            EsiError::SizeOverflow(what) => write!(f, "Size of {} overflows", what),
        }
    }
}

impl core::error::Error for EsiError {}
