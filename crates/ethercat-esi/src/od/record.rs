// crates/ethercat-esi/src/od/record.rs

//! Flattening of `<Object>`, `<SubItem>` and `<DataType>` elements into
//! field/value records, and the registry of every field name seen so far.

use crate::xml::Element;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::warn;

/// Columns that always lead the table, in this order.
pub const CORE_FIELDS: [&str; 11] = [
    "Index",
    "SubIdx",
    "Name",
    "Type",
    "BitSize",
    "BitOffs",
    "DefaultValue",
    "MinValue",
    "MaxValue",
    "Access",
    "Comment",
];

/// Ordered, append-only set of field names in first-seen order.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    order: Vec<String>,
    seen: BTreeSet<String>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRegistry {
    /// Creates a registry pre-populated with [`CORE_FIELDS`].
    pub fn new() -> Self {
        let mut registry = Self {
            order: Vec::new(),
            seen: BTreeSet::new(),
        };
        for field in CORE_FIELDS {
            registry.register(field);
        }
        registry
    }

    /// Adds `name` if it has not been seen. Returns `true` when it was new.
    pub fn register(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    /// Field names in first-seen order.
    pub fn fields(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One flattened row: field name -> text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectRecord {
    fields: BTreeMap<String, String>,
}

impl ObjectRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// `Index` of the record, empty if absent.
    pub fn index(&self) -> &str {
        self.get("Index").unwrap_or_default()
    }

    /// `SubIdx` of the record, empty if absent.
    pub fn sub_index(&self) -> &str {
        self.get("SubIdx").unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.get("Name")
    }

    pub fn data_type(&self) -> Option<&str> {
        self.get("Type")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends to `Comment`, separating repeated comments with a space.
    fn append_comment(&mut self, text: &str) {
        match self.fields.get_mut("Comment") {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => self.set("Comment", text),
        }
    }
}

/// How a child element of a record contributes fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChildKind {
    /// `<Properties>` holding `<Property><Name/><Value/></Property>` items.
    Properties,
    /// `<Info>` or `<Flags>`: each grandchild is a field.
    Grouped,
    /// `<Comment>`: concatenated across repeats.
    Comment,
    /// A bare `<Property>` directly under the record.
    Property,
    /// Anything else: the tag itself is the field.
    Plain,
}

impl ChildKind {
    pub(crate) fn of(tag: &str) -> Self {
        match tag {
            "Properties" => Self::Properties,
            "Info" | "Flags" => Self::Grouped,
            "Comment" => Self::Comment,
            "Property" => Self::Property,
            _ => Self::Plain,
        }
    }
}

/// Builds a record from every child of `element`, registering new fields.
pub fn build_record(element: &Element, registry: &mut FieldRegistry) -> ObjectRecord {
    let mut record = ObjectRecord::default();
    for child in &element.children {
        apply_child(&mut record, child, registry);
    }
    record
}

/// Merges the fields contributed by a single child element into `record`.
pub(crate) fn apply_child(record: &mut ObjectRecord, child: &Element, registry: &mut FieldRegistry) {
    match ChildKind::of(&child.tag) {
        ChildKind::Properties => {
            for prop in &child.children {
                if prop.tag == "Property" {
                    apply_property(record, prop, registry);
                } else {
                    warn!("Properties node contains {}, skipping", prop.tag);
                }
            }
        }
        ChildKind::Grouped => {
            for sub in &child.children {
                registry.register(&sub.tag);
                record.set(&sub.tag, &sub.text);
            }
        }
        ChildKind::Comment => record.append_comment(&child.text),
        ChildKind::Property => apply_property(record, child, registry),
        ChildKind::Plain => {
            registry.register(&child.tag);
            record.set(&child.tag, &child.text);
        }
    }
}

fn apply_property(record: &mut ObjectRecord, prop: &Element, registry: &mut FieldRegistry) {
    let Some(name) = prop.child_text("Name") else {
        warn!("Property without Name, skipping");
        return;
    };
    let value = prop.child_text("Value").unwrap_or_default();
    registry.register(name);
    record.set(name, value);
}
