//! Windows disk inventory via `wmic`
//!
//! Physical drives come from `Win32_DiskDrive`, partitions from
//! `Win32_DiskPartition`, both rendered as CSV by wmic.

use super::{device_index, DiskInventory, Platform};
use crate::command::CommandRunner;
use crate::error::{Error, Result};
use crate::serializer::{DiskRecord, WindowsLogical, WindowsPhysical};
use log::debug;

/// Windows disk inventory
pub struct WindowsInventory {
    runner: Box<dyn CommandRunner>,
    wmic: String,
}

impl WindowsInventory {
    pub fn new(runner: Box<dyn CommandRunner>, wmic: &str) -> Self {
        Self {
            runner,
            wmic: wmic.to_string(),
        }
    }

    fn query(&self, class: &str, properties: &str) -> Result<String> {
        self.runner.run(
            &self.wmic,
            &[class, "get", properties, "/translate:nocomma", "/format:csv"],
        )
    }
}

impl DiskInventory for WindowsInventory {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn physical_disks(&self) -> Result<Vec<DiskRecord>> {
        WindowsPhysical::parse(&self.query("diskdrive", "Name,Size")?)
    }

    fn logical_disks(&self, device_number: usize) -> Result<Vec<DiskRecord>> {
        let index = device_index(device_number)?;

        let disk_count = self.physical_disks()?.len();
        if index >= disk_count {
            return Err(Error::DiskNotFound(device_number));
        }

        let partitions = WindowsLogical::parse(&self.query("partition", "DiskIndex,Name,Size")?)?;
        debug!(
            "wmic listed {} partitions across {} disks",
            partitions.len(),
            disk_count
        );

        Ok(partitions
            .into_iter()
            .filter(|partition| partition.disk_index == index as u64)
            .map(DiskRecord::from)
            .collect())
    }
}
