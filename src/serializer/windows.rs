//! `wmic ... /format:csv` output pipelines

use super::list::build_list;
use super::record::{DiskRecord, PartitionRecord};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Column wmic prepends with the host name
const NODE_COLUMN: &str = "Node";

/// Physical disks from `wmic diskdrive get Name,Size`
pub struct WindowsPhysical;

impl WindowsPhysical {
    pub fn parse(text: &str) -> Result<Vec<DiskRecord>> {
        build_list(&csv_rows(text)?)
    }
}

/// Partitions from `wmic partition get DiskIndex,Name,Size`
pub struct WindowsLogical;

impl WindowsLogical {
    pub fn parse(text: &str) -> Result<Vec<PartitionRecord>> {
        build_list(&csv_rows(text)?)
    }
}

/// Read header + data rows into a JSON array of string-valued objects,
/// without the `Node` column.
///
/// wmic separates rows with `\r\r\n` and starts with a blank line; blank
/// lines are skipped. `/translate:nocomma` keeps commas out of values, so
/// cells are never quoted.
pub(crate) fn csv_rows(text: &str) -> Result<Value> {
    let mut lines = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let header: Vec<&str> = match lines.next() {
        Some(line) => line.split(',').map(str::trim).collect(),
        None => return Ok(Value::Array(Vec::new())),
    };

    let mut rows = Vec::new();
    for (number, line) in lines.enumerate() {
        let cells: Vec<&str> = line.split(',').collect();
        if cells.len() != header.len() {
            return Err(Error::Validation(format!(
                "Row {} has {} columns, header has {}",
                number + 1,
                cells.len(),
                header.len()
            )));
        }

        let mut row = Map::new();
        for (column, cell) in header.iter().zip(cells) {
            if *column == NODE_COLUMN {
                continue;
            }
            row.insert(column.to_string(), Value::String(cell.to_string()));
        }
        rows.push(Value::Object(row));
    }

    Ok(Value::Array(rows))
}
