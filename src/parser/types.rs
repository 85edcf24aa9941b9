//! Common types for parsed documents.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::value::PropertyValue;

/// One entity record: the properties collected under a `====<id>====` marker.
///
/// Keys are unique and iterate in the order they were first written.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block id from the marker line (0 for lines before any marker)
    pub id: u64,

    /// 1-based line of the marker that opened this block (0 if implicit)
    pub line: usize,

    properties: Vec<(String, PropertyValue)>,
}

impl Block {
    pub fn new(id: u64, line: usize) -> Self {
        Self {
            id,
            line,
            properties: Vec::new(),
        }
    }

    /// Set a property. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        let key = key.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The entity class, when present as text.
    pub fn classname(&self) -> Option<&str> {
        self.get("classname").and_then(|v| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.properties.clear();
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// All blocks of a `.vents` file, in the order their ids first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    blocks: Vec<Block>,
    index: HashMap<u64, usize>,
}

impl ParsedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u64) -> Option<&Block> {
        self.index.get(&id).map(|&i| &self.blocks[i])
    }

    /// Get the block for `id`, creating it at the end if it has not been seen.
    pub fn entry(&mut self, id: u64, line: usize) -> &mut Block {
        let i = match self.index.get(&id) {
            Some(&i) => i,
            None => {
                self.blocks.push(Block::new(id, line));
                self.index.insert(id, self.blocks.len() - 1);
                self.blocks.len() - 1
            }
        };
        &mut self.blocks[i]
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.blocks.iter().map(|b| b.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParsedDocument {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl Serialize for ParsedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.blocks.len()))?;
        for block in &self.blocks {
            map.serialize_entry(&block.id, block)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_insert_keeps_first_position() {
        let mut block = Block::new(1, 1);
        block.insert("classname", PropertyValue::Text("a".to_string()));
        block.insert("priority", PropertyValue::Integer(0));
        block.insert("classname", PropertyValue::Text("b".to_string()));

        assert_eq!(block.len(), 2);
        assert_eq!(block.keys().collect::<Vec<_>>(), vec!["classname", "priority"]);
        assert_eq!(block.classname(), Some("b"));
    }

    #[test]
    fn test_document_entry_reuses_existing_block() {
        let mut doc = ParsedDocument::new();
        doc.entry(5, 1).insert("a", PropertyValue::Integer(1));
        doc.entry(2, 3).insert("b", PropertyValue::Integer(2));
        doc.entry(5, 9).insert("c", PropertyValue::Integer(3));

        assert_eq!(doc.ids().collect::<Vec<_>>(), vec![5, 2]);
        let block = doc.get(5).unwrap();
        assert_eq!(block.len(), 2);
        assert_eq!(block.line, 1);
    }

    #[test]
    fn test_document_serializes_in_id_order() {
        let mut doc = ParsedDocument::new();
        doc.entry(9, 1).insert("enabled", PropertyValue::Boolean(true));
        doc.entry(3, 3)
            .insert("origin", PropertyValue::FloatTuple(vec![1.0, 2.0]));

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"9":{"enabled":true},"3":{"origin":[1.0,2.0]}}"#);
    }
}
