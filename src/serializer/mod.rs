//! Normalization pipeline
//!
//! Turns raw platform command output into validated, typed disk records:
//! - `lsblk -J` JSON on Linux
//! - `wmic /format:csv` CSV on Windows
//!
//! Every row goes through the same record builder, which lower-cases keys,
//! rejects fields the target shape does not declare, and coerces values to
//! the declared type.

pub mod field;
pub mod linux;
pub mod list;
pub mod record;
pub mod windows;

pub use field::{coerce, FieldType, FieldValue};
pub use linux::{LinuxLogical, LinuxPhysical};
pub use list::{build_list, ListSerializer};
pub use record::{
    build, DiskRecord, FromRecord, PartitionRecord, Record, Schema, Serializer, DISK_SCHEMA,
    PARTITION_SCHEMA,
};
pub use windows::{WindowsLogical, WindowsPhysical};

/// All partitions of one physical disk, in listing order
pub type DiskGroup = Vec<DiskRecord>;
