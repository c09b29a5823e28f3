//! Tabular rendering of disk listings

use crate::error::{Error, Result};
use crate::inventory::DiskInventory;
use crate::serializer::DiskRecord;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Byte-multiple unit used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    B,
    K,
    M,
    G,
    T,
}

impl Measure {
    pub fn multiplier(&self) -> u64 {
        match self {
            Measure::B => 1,
            Measure::K => 1024,
            Measure::M => 1024 * 1024,
            Measure::G => 1024 * 1024 * 1024,
            Measure::T => 1024 * 1024 * 1024 * 1024,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Measure::B => "B",
            Measure::K => "K",
            Measure::M => "M",
            Measure::G => "G",
            Measure::T => "T",
        }
    }

    /// Render `bytes` in this unit, rounded to one decimal place
    pub fn format(&self, bytes: u64) -> String {
        let number = bytes as f64 / self.multiplier() as f64;
        format!("{:.1}{}", number, self.symbol())
    }
}

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "B" => Ok(Measure::B),
            "K" => Ok(Measure::K),
            "M" => Ok(Measure::M),
            "G" => Ok(Measure::G),
            "T" => Ok(Measure::T),
            other => Err(Error::Measure(format!(
                "Conversion in format {} is not possible!",
                other
            ))),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Convert a byte count to a string in the unit named by `measure`
pub fn bytes_to_str(bytes: u64, measure: &str) -> Result<String> {
    Ok(measure.parse::<Measure>()?.format(bytes))
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!("Unknown output format {}", other))),
        }
    }
}

#[derive(Serialize)]
struct DiskRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    name: &'a str,
    size: u64,
    display: String,
}

/// Writes disk tables to any `Write` sink
pub struct Printer<W: Write> {
    out: W,
    measure: Measure,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, measure: Measure, format: OutputFormat) -> Self {
        Self {
            out,
            measure,
            format,
        }
    }

    /// Device, size and 1-based index of every physical disk
    pub fn show_physical_disks(&mut self, disks: &[DiskRecord]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{:<10} {:>10} {:>5}", "Device", "Size", "#")?;
                for (idx, disk) in disks.iter().enumerate() {
                    writeln!(
                        self.out,
                        "{:<10} {:>10} {:>5}",
                        disk.name,
                        self.measure.format(disk.size),
                        idx + 1
                    )?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let rows: Vec<DiskRow> = disks
                    .iter()
                    .enumerate()
                    .map(|(idx, disk)| self.row(Some(idx + 1), disk))
                    .collect();
                self.write_json(&rows)
            }
        }
    }

    /// Device and size of every partition
    pub fn show_logical_disks(&mut self, disks: &[DiskRecord]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{:<10} {:>10}", "Device", "Total")?;
                for disk in disks {
                    writeln!(
                        self.out,
                        "{:<10} {:>10}",
                        disk.name,
                        self.measure.format(disk.size)
                    )?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                let rows: Vec<DiskRow> = disks.iter().map(|disk| self.row(None, disk)).collect();
                self.write_json(&rows)
            }
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn row<'a>(&self, index: Option<usize>, disk: &'a DiskRecord) -> DiskRow<'a> {
        DiskRow {
            index,
            name: &disk.name,
            size: disk.size,
            display: self.measure.format(disk.size),
        }
    }

    fn write_json(&mut self, rows: &[DiskRow]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, rows)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Print the physical disk table, or the partitions of `device_number` when given
pub fn display<W: Write>(
    inventory: &dyn DiskInventory,
    printer: &mut Printer<W>,
    device_number: Option<usize>,
) -> Result<()> {
    match device_number {
        Some(number) => printer.show_logical_disks(&inventory.logical_disks(number)?),
        None => printer.show_physical_disks(&inventory.physical_disks()?),
    }
}
