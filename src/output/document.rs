// src/output/document.rs
//! The tree handed to renderers.

use crate::analytics::{FieldValue, Record};
use indexmap::IndexMap;
use serde::Serialize;

/// One value in a document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Value(FieldValue),
    List(Vec<String>),
    Section(Document),
}

/// An ordered mapping of display keys to nodes.
pub type Document = IndexMap<String, Node>;

impl From<FieldValue> for Node {
    fn from(value: FieldValue) -> Self {
        Node::Value(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Value(FieldValue::from(value))
    }
}

impl From<&Record> for Node {
    fn from(record: &Record) -> Self {
        Node::Section(record_document(record))
    }
}

/// A record as a flat document, keys in declared order.
pub fn record_document(record: &Record) -> Document {
    record
        .iter()
        .map(|(key, value)| (key.to_string(), Node::Value(value.clone())))
        .collect()
}

/// A titled section listing records under the value of `key_field`.
///
/// A record whose key is empty, or already taken by an earlier record, is
/// listed under its 1-based row number instead (`#3`, or `alice #3`).
pub fn keyed_section<'r>(
    title: &str,
    records: impl IntoIterator<Item = &'r Record>,
    key_field: &str,
) -> Document {
    let mut entries = Document::new();
    for (row, record) in records.into_iter().enumerate() {
        let mut key = record.text(key_field);
        if key.is_empty() {
            key = format!("#{}", row + 1);
        } else if entries.contains_key(&key) {
            key = format!("{} #{}", key, row + 1);
        }
        entries.insert(key, Node::from(record));
    }
    single(title, Node::Section(entries))
}


/// A document holding one entry.
pub fn single(key: &str, node: impl Into<Node>) -> Document {
    let mut document = Document::new();
    document.insert(key.to_string(), node.into());
    document
}
