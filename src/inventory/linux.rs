//! Linux disk inventory via `lsblk -J`

use super::{device_index, DiskInventory, Platform};
use crate::command::CommandRunner;
use crate::error::{Error, Result};
use crate::serializer::{DiskRecord, LinuxLogical, LinuxPhysical};
use log::debug;
use serde_json::Value;

/// Device type lsblk reports for whole disks
const DISK_TYPE: &str = "disk";

/// Linux disk inventory
pub struct LinuxInventory {
    runner: Box<dyn CommandRunner>,
    lsblk: String,
}

impl LinuxInventory {
    pub fn new(runner: Box<dyn CommandRunner>, lsblk: &str) -> Self {
        Self {
            runner,
            lsblk: lsblk.to_string(),
        }
    }

    /// Run lsblk and keep only whole disks, ready for the pipeline
    fn block_devices(&self, args: &[&str]) -> Result<Value> {
        let output = self.runner.run(&self.lsblk, args)?;
        let mut document: Value = serde_json::from_str(&output)?;
        prune_block_devices(&mut document, DISK_TYPE)?;
        Ok(document)
    }
}

impl DiskInventory for LinuxInventory {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn physical_disks(&self) -> Result<Vec<DiskRecord>> {
        let document = self.block_devices(&["-b", "-J", "-d", "-o", "NAME,SIZE,TYPE"])?;
        LinuxPhysical::from_document(&document)
    }

    fn logical_disks(&self, device_number: usize) -> Result<Vec<DiskRecord>> {
        let index = device_index(device_number)?;
        let document = self.block_devices(&["-b", "-J", "-o", "NAME,SIZE,TYPE"])?;
        let groups = LinuxLogical::from_document(&document)?;
        debug!("lsblk listed {} disks", groups.len());

        groups
            .into_iter()
            .nth(index)
            .ok_or(Error::DiskNotFound(device_number))
    }
}

/// Keep top-level entries whose `type` is `device_type` and reduce every entry
/// and direct child to its `name` and `size`.
///
/// Optical drives, loop devices and the like are dropped; nested holders
/// (LVM, dm-crypt) below a partition are not partitions of the disk.
pub fn prune_block_devices(document: &mut Value, device_type: &str) -> Result<()> {
    let devices = document
        .get_mut("blockdevices")
        .ok_or_else(|| Error::Validation("Missing field blockdevices!".to_string()))?
        .as_array_mut()
        .ok_or_else(Error::invalid_type)?;

    devices.retain(|device| device.get("type").and_then(Value::as_str) == Some(device_type));

    for device in devices.iter_mut() {
        let Some(device) = device.as_object_mut() else {
            continue;
        };
        device.remove("type");

        if let Some(children) = device.get_mut("children").and_then(Value::as_array_mut) {
            for child in children.iter_mut().filter_map(Value::as_object_mut) {
                child.remove("type");
                child.remove("children");
            }
        }
    }

    Ok(())
}
