//! External command execution
//!
//! Inventory strategies never spawn processes directly; they go through a
//! [`CommandRunner`] so that canned output can be substituted in tests.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::process::Command;

/// Runs an external program and returns its decoded stdout
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        debug!("Running {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed(format!("Failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = decode_console_output(&output.stderr);
            warn!("{} exited with {}", program, output.status);
            return Err(Error::CommandFailed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = decode_console_output(&output.stdout);
        debug!("{} produced {} bytes", program, stdout.len());
        Ok(stdout)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        (**self).run(program, args)
    }
}

/// Decode console output bytes.
///
/// UTF-16LE when a BOM is present (wmic redirected to a pipe on some
/// Windows builds), the OEM code page on Windows, UTF-8 elsewhere.
pub fn decode_console_output(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFFu8, 0xFE][..]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    decode_code_page(bytes)
}

#[cfg(windows)]
fn decode_code_page(bytes: &[u8]) -> String {
    use windows::Win32::Globalization::{GetOEMCP, MultiByteToWideChar, MULTI_BYTE_TO_WIDE_CHAR_FLAGS};

    if bytes.is_empty() {
        return String::new();
    }

    unsafe {
        let code_page = GetOEMCP();
        let len = MultiByteToWideChar(code_page, MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0), bytes, None);
        if len <= 0 {
            warn!("Code page {} conversion failed, falling back to UTF-8", code_page);
            return String::from_utf8_lossy(bytes).into_owned();
        }

        let mut wide = vec![0u16; len as usize];
        let written = MultiByteToWideChar(
            code_page,
            MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0),
            bytes,
            Some(&mut wide),
        );
        String::from_utf16_lossy(&wide[..written.max(0) as usize])
    }
}

#[cfg(not(windows))]
fn decode_code_page(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Returns canned stdout keyed by the full command line
    #[derive(Default)]
    pub(crate) struct FakeRunner {
        outputs: HashMap<String, String>,
        pub(crate) calls: RefCell<Vec<String>>,
    }

    impl FakeRunner {
        pub(crate) fn with(mut self, command_line: &str, stdout: &str) -> Self {
            self.outputs
                .insert(command_line.to_string(), stdout.to_string());
            self
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String> {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.borrow_mut().push(line.clone());
            self.outputs
                .get(&line)
                .cloned()
                .ok_or_else(|| Error::CommandFailed(format!("unexpected command: {}", line)))
        }
    }

    #[test]
    fn test_decode_utf16_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Node,Name".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_console_output(&bytes), "Node,Name");
    }

    #[test]
    fn test_decode_plain_ascii() {
        assert_eq!(decode_console_output(b"sda 1024"), "sda 1024");
    }

    #[test]
    fn test_fake_runner_records_calls() {
        let runner = FakeRunner::default().with("lsblk -J", "{}");
        assert_eq!(runner.run("lsblk", &["-J"]).unwrap(), "{}");
        assert!(runner.run("wmic", &[]).is_err());
        assert_eq!(runner.calls.borrow().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_failure() {
        let err = SystemCommandRunner
            .run("idisk-command-that-does-not-exist", &[])
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed(_)));
    }
}
