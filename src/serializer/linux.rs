//! `lsblk -J` output pipelines

use super::list::build_list;
use super::record::DiskRecord;
use super::DiskGroup;
use crate::error::{Error, Result};
use serde_json::Value;

/// Physical disks from a `{"blockdevices": [...]}` document
pub struct LinuxPhysical;

impl LinuxPhysical {
    pub fn parse(text: &str) -> Result<Vec<DiskRecord>> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document(&document)
    }

    pub fn from_document(document: &Value) -> Result<Vec<DiskRecord>> {
        build_list(block_devices(document)?)
    }
}

/// Partitions grouped per physical disk, taken from each entry's `children`
pub struct LinuxLogical;

impl LinuxLogical {
    pub fn parse(text: &str) -> Result<Vec<DiskGroup>> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document(&document)
    }

    pub fn from_document(document: &Value) -> Result<Vec<DiskGroup>> {
        block_devices(document)?
            .as_array()
            .ok_or_else(Error::invalid_type)?
            .iter()
            .map(|device| {
                let device = device.as_object().ok_or_else(Error::invalid_type)?;
                match device.get("children") {
                    Some(children) => build_list(children),
                    // whole-disk filesystem or empty disk
                    None => Ok(Vec::new()),
                }
            })
            .collect()
    }
}

pub(crate) fn block_devices(document: &Value) -> Result<&Value> {
    document
        .get("blockdevices")
        .ok_or_else(|| Error::Validation("Missing field blockdevices!".to_string()))
}
