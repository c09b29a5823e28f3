//! Record builder: one flat mapping into one validated record

use super::field::{coerce, FieldType, FieldValue};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Index;

/// Declared fields of a record shape
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [(&'static str, FieldType)],
}

impl Schema {
    pub const fn new(fields: &'static [(&'static str, FieldType)]) -> Self {
        Self { fields }
    }

    /// Look up a field by its lower-case name
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, field_type)| *field_type)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

/// Physical disk shape: `name`, `size`
pub const DISK_SCHEMA: Schema =
    Schema::new(&[("name", FieldType::String), ("size", FieldType::Integer)]);

/// Windows partition shape: disk shape plus `diskindex`
pub const PARTITION_SCHEMA: Schema = Schema::new(&[
    ("diskindex", FieldType::Integer),
    ("name", FieldType::String),
    ("size", FieldType::Integer),
]);

/// Ordered mapping of coerced fields, in source key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(FieldValue::as_str)
    }

    pub fn size(&self) -> Option<u64> {
        self.get("size").and_then(FieldValue::as_u64)
    }

    pub fn disk_index(&self) -> Option<u64> {
        self.get("diskindex").and_then(FieldValue::as_u64)
    }

    fn insert(&mut self, key: String, value: FieldValue) {
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    fn require<'a, T>(
        &'a self,
        key: &str,
        read: impl Fn(&'a FieldValue) -> Option<T>,
    ) -> Result<T> {
        self.get(key)
            .and_then(read)
            .ok_or_else(|| Error::Validation(format!("Missing field {}!", key)))
    }
}

impl Index<&str> for Record {
    type Output = FieldValue;

    fn index(&self, key: &str) -> &FieldValue {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no field named {}", key),
        }
    }
}

/// Builds a [`Record`] from a flat JSON object, validating keys against a schema
#[derive(Debug, Clone, Copy)]
pub struct Serializer {
    schema: Schema,
}

impl Serializer {
    pub const fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn to_representation(&self, data: &Value) -> Result<Record> {
        let object = data.as_object().ok_or_else(Error::invalid_type)?;

        let mut record = Record::default();
        for (key, raw) in object {
            let field = key.to_lowercase();
            let field_type = self
                .schema
                .field_type(&field)
                .ok_or_else(|| Error::Validation(format!("Does not exist field {}!", field)))?;
            let value = coerce(&field, raw, field_type)?;
            record.insert(field, value);
        }
        Ok(record)
    }
}

/// A typed record shape that can be built from a validated [`Record`]
pub trait FromRecord: Sized {
    const SCHEMA: Schema;

    fn from_record(record: &Record) -> Result<Self>;
}

/// Validate one raw object and convert it into a typed record
pub fn build<T: FromRecord>(data: &Value) -> Result<T> {
    let record = Serializer::new(T::SCHEMA).to_representation(data)?;
    T::from_record(&record)
}

/// A disk or partition with its size in bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskRecord {
    pub name: String,
    pub size: u64,
}

impl FromRecord for DiskRecord {
    const SCHEMA: Schema = DISK_SCHEMA;

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.require("name", FieldValue::as_str)?.to_string(),
            size: record.require("size", FieldValue::as_u64)?,
        })
    }
}

/// Windows partition: a disk record tagged with its owning disk index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRecord {
    pub name: String,
    pub size: u64,
    pub disk_index: u64,
}

impl FromRecord for PartitionRecord {
    const SCHEMA: Schema = PARTITION_SCHEMA;

    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            name: record.require("name", FieldValue::as_str)?.to_string(),
            size: record.require("size", FieldValue::as_u64)?,
            disk_index: record.require("diskindex", FieldValue::as_u64)?,
        })
    }
}

impl From<PartitionRecord> for DiskRecord {
    fn from(partition: PartitionRecord) -> Self {
        Self {
            name: partition.name,
            size: partition.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializer() {
        let disk = json!({"name": "sdb", "size": "16013942784"});
        let record = Serializer::new(DISK_SCHEMA).to_representation(&disk).unwrap();

        assert_eq!(record.name(), Some("sdb"));
        assert_eq!(record.size(), Some(16013942784));
        assert_eq!(record["size"], FieldValue::Int(16013942784));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "size"]);
    }

    #[test]
    fn test_fields_keep_input_order() {
        let disk = json!({"Size": "1", "Name": "x"});
        let record = Serializer::new(DISK_SCHEMA).to_representation(&disk).unwrap();

        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["size", "name"]);
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![
                ("size", &FieldValue::Int(1)),
                ("name", &FieldValue::Str("x".into()))
            ]
        );
    }

    #[test]
    fn test_colliding_keys_last_wins() {
        let disk = json!({"Name": "a", "name": "b", "size": "1"});
        let record = Serializer::new(DISK_SCHEMA).to_representation(&disk).unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "size"]);
        assert_eq!(record.name(), Some("b"));
    }

    #[test]
    fn test_schema_fields() {
        assert_eq!(
            DISK_SCHEMA.field_names().collect::<Vec<_>>(),
            vec!["name", "size"]
        );
        assert_eq!(PARTITION_SCHEMA.field_type("diskindex"), Some(FieldType::Integer));
        assert_eq!(PARTITION_SCHEMA.field_type("DiskIndex"), None);
    }

    #[test]
    fn test_keys_are_lowercased() {
        let row = json!({"DiskIndex": "1", "Name": "Disk #1. Partition #0", "Size": "104857600"});
        let record = Serializer::new(PARTITION_SCHEMA)
            .to_representation(&row)
            .unwrap();

        assert_eq!(record.disk_index(), Some(1));
        assert_eq!(record.name(), Some("Disk #1. Partition #0"));
        assert!(record.get("Name").is_none());
    }

    #[test]
    fn test_undeclared_field_rejected() {
        let serializer = Serializer::new(DISK_SCHEMA);
        for data in [
            json!({"type": "disk"}),
            json!({"name": "sda", "size": "1", "type": "disk"}),
            json!({"mountpoint": null, "name": "sda"}),
        ] {
            match serializer.to_representation(&data) {
                Err(Error::Validation(msg)) => assert!(msg.starts_with("Does not exist field")),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_partition_field_unknown_to_disk() {
        let row = json!({"diskindex": "0", "name": "C", "size": "1"});
        assert!(build::<DiskRecord>(&row).is_err());
        assert!(build::<PartitionRecord>(&row).is_ok());
    }

    #[test]
    fn test_not_a_mapping() {
        let err = Serializer::new(DISK_SCHEMA)
            .to_representation(&json!(["sda", 1]))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_missing_declared_field() {
        let partial = json!({"name": "sda"});
        let record = Serializer::new(DISK_SCHEMA)
            .to_representation(&partial)
            .unwrap();
        assert_eq!(record.len(), 1);
        assert!(matches!(
            DiskRecord::from_record(&record),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_build_typed_record() {
        let disk: DiskRecord = build(&json!({"NAME": "nvme0n1", "SIZE": 512110190592u64})).unwrap();
        assert_eq!(
            disk,
            DiskRecord {
                name: "nvme0n1".into(),
                size: 512110190592
            }
        );
    }
}
