//! # idisk
//!
//! Physical and logical disk inventory for Linux and Windows.
//!
//! The crate normalizes two structurally different platform listings into
//! one record shape:
//!
//! - **Linux**: `lsblk -b -J` JSON, with partitions nested under `children`
//! - **Windows**: `wmic ... /format:csv` CSV, with partitions linked to their
//!   disk through `DiskIndex`
//!
//! ## Quick Start
//!
//! ```no_run
//! use idisk::{select_inventory, Config, Measure, Platform, SystemCommandRunner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let inventory = select_inventory(
//!     &Platform::current(),
//!     Box::new(SystemCommandRunner),
//!     &config.commands,
//! )?;
//!
//! for (idx, disk) in inventory.physical_disks()?.iter().enumerate() {
//!     println!("{} {} {}", idx + 1, disk.name, Measure::G.format(disk.size));
//!     for part in inventory.logical_disks(idx + 1)? {
//!         println!("    {} {}", part.name, Measure::G.format(part.size));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing captured output
//!
//! The pipelines in [`serializer`] work on text, so output captured elsewhere
//! can be parsed directly:
//!
//! ```
//! use idisk::serializer::LinuxPhysical;
//!
//! let disks = LinuxPhysical::parse(
//!     r#"{"blockdevices": [{"name": "sda", "size": "1000204886016"}]}"#,
//! ).unwrap();
//! assert_eq!(disks[0].size, 1000204886016);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod inventory;
pub mod printer;
pub mod serializer;

pub use command::{CommandRunner, SystemCommandRunner};
pub use config::{CommandConfig, Config, GeneralConfig};
pub use error::{Error, Result};
pub use inventory::{select_inventory, DiskInventory, LinuxInventory, Platform, WindowsInventory};
pub use printer::{bytes_to_str, display, Measure, OutputFormat, Printer};
pub use serializer::{DiskGroup, DiskRecord, PartitionRecord, Record};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
