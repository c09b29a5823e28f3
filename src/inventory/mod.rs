//! Disk inventory facade
//!
//! A [`DiskInventory`] runs the platform listing command and hands its output
//! to the matching pipeline in [`crate::serializer`].
//!
//! Platform support:
//! - Linux: `lsblk` JSON output
//! - Windows: `wmic` CSV output

pub mod linux;
pub mod windows;

pub use linux::LinuxInventory;
pub use windows::WindowsInventory;

use crate::command::CommandRunner;
use crate::config::CommandConfig;
use crate::error::{Error, Result};
use crate::serializer::DiskRecord;
use std::fmt;

/// Common interface of the platform strategies
pub trait DiskInventory {
    /// Platform this strategy lists disks for
    fn platform(&self) -> Platform;

    /// All physical disks with their total size in bytes
    fn physical_disks(&self) -> Result<Vec<DiskRecord>>;

    /// Partitions of the `device_number`-th (1-based) physical disk
    ///
    /// Fails with [`Error::DiskNotFound`] when the number is 0 or larger than
    /// the physical disk count.
    fn logical_disks(&self, device_number: usize) -> Result<Vec<DiskRecord>>;
}

/// Operating system family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    Other(String),
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS` style, or `win32`)
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "windows" | "win32" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Linux => f.write_str("linux"),
            Platform::Windows => f.write_str("windows"),
            Platform::Other(os) => f.write_str(os),
        }
    }
}

/// Select the inventory strategy for `platform`
pub fn select_inventory(
    platform: &Platform,
    runner: Box<dyn CommandRunner>,
    commands: &CommandConfig,
) -> Result<Box<dyn DiskInventory>> {
    match platform {
        Platform::Linux => Ok(Box::new(LinuxInventory::new(runner, &commands.lsblk))),
        Platform::Windows => Ok(Box::new(WindowsInventory::new(runner, &commands.wmic))),
        Platform::Other(os) => Err(Error::UnsupportedPlatform(os.clone())),
    }
}

/// Convert a 1-based device number into a list index
pub(crate) fn device_index(device_number: usize) -> Result<usize> {
    device_number
        .checked_sub(1)
        .ok_or(Error::DiskNotFound(device_number))
}
