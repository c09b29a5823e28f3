//! List builder: a sequence of flat mappings into records

use super::record::{FromRecord, Record, Schema, Serializer};
use crate::error::{Error, Result};
use serde_json::Value;

/// Applies a [`Serializer`] across every element of a JSON array
#[derive(Debug, Clone, Copy)]
pub struct ListSerializer {
    child: Serializer,
}

impl ListSerializer {
    pub const fn new(schema: Schema) -> Self {
        Self {
            child: Serializer::new(schema),
        }
    }

    pub fn to_representation(&self, data: &Value) -> Result<Vec<Record>> {
        data.as_array()
            .ok_or_else(Error::invalid_type)?
            .iter()
            .map(|item| self.child.to_representation(item))
            .collect()
    }
}

/// Validate a JSON array and convert every element into a typed record
pub fn build_list<T: FromRecord>(data: &Value) -> Result<Vec<T>> {
    ListSerializer::new(T::SCHEMA)
        .to_representation(data)?
        .iter()
        .map(T::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::record::{DiskRecord, DISK_SCHEMA};
    use serde_json::json;

    #[test]
    fn test_list_serializer() {
        let disks = json!([
            {"name": "sda", "size": "1000204886016"},
            {"name": "sdb", "size": "16013942784"}
        ]);
        let records = ListSerializer::new(DISK_SCHEMA)
            .to_representation(&disks)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), Some("sda"));
        assert_eq!(records[1].size(), Some(16013942784));
    }

    #[test]
    fn test_not_a_list() {
        for data in [json!({"name": "sda", "size": "1"}), json!("sda"), json!(null)] {
            let err = build_list::<DiskRecord>(&data).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
    }

    #[test]
    fn test_bad_item_aborts_list() {
        let disks = json!([
            {"name": "sda", "size": "1"},
            {"name": "sdb", "size": "1", "rm": false}
        ]);
        assert!(build_list::<DiskRecord>(&disks).is_err());
    }

    #[test]
    fn test_empty_list() {
        let disks: Vec<DiskRecord> = build_list(&json!([])).unwrap();
        assert!(disks.is_empty());
    }
}
