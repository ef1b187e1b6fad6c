//! Export-bridge adapter
//!
//! The legacy wallet is converted into a swap file by an externally supplied
//! native tool. This module only locates and invokes it: given a wallet path
//! and passphrase the tool answers with a status string, where the empty
//! string means success and a `wallet.swp` was produced next to the input.
//!
//! The transport (subprocess, passphrase over stdin) is an implementation
//! detail; the status-string contract is the interface.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{SwapError, SwapResult};

/// Handle to a located wallet-conversion tool
#[derive(Debug, Clone)]
pub struct ExportBridge {
    library: PathBuf,
}

impl ExportBridge {
    /// Probe the candidate directories for the conversion library.
    ///
    /// Directories are tried in a fixed order: the working directory, the
    /// executable's directory, `/usr/local/lib`, `/usr/lib`.
    pub fn locate() -> SwapResult<Self> {
        for dir in Self::candidate_dirs() {
            for name in Self::library_names() {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    debug!(library = %candidate.display(), "found swap export library");
                    return Ok(Self { library: candidate });
                }
                debug!(candidate = %candidate.display(), "no swap export library here");
            }
        }
        Err(SwapError::invalid_path("swap export library not found"))
    }

    /// Use an explicitly provided library path
    pub fn with_library(library: impl Into<PathBuf>) -> SwapResult<Self> {
        let library = library.into();
        if !library.is_file() {
            return Err(SwapError::invalid_path(format!(
                "swap export library not found at {}",
                library.display()
            )));
        }
        Ok(Self { library })
    }

    /// Path of the located library
    pub fn library(&self) -> &Path {
        &self.library
    }

    /// Convert a legacy wallet into a swap file.
    ///
    /// Returns the tool's status string: empty means success, anything else
    /// is the error message reported by the tool.
    pub fn export_swap_file(&self, wallet_path: &Path, passphrase: &str) -> SwapResult<String> {
        let mut child = Command::new(&self.library)
            .arg(wallet_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                SwapError::invalid_path(format!(
                    "cannot invoke swap export library {}: {err}",
                    self.library.display()
                ))
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(passphrase.as_bytes())
                .and_then(|_| stdin.write_all(b"\n"))
                .map_err(|err| {
                    SwapError::invalid_path(format!("cannot hand passphrase to export tool: {err}"))
                })?;
        }

        let output = child.wait_with_output().map_err(|err| {
            SwapError::invalid_path(format!("swap export tool did not finish: {err}"))
        })?;

        let status = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if status.is_empty() && !output.status.success() {
            // Tool died without reporting through the protocol
            return Ok(String::from_utf8_lossy(&output.stderr).trim().to_string());
        }
        Ok(status)
    }

    fn candidate_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(4);
        if let Ok(cwd) = std::env::current_dir() {
            dirs.push(cwd);
        }
        if let Ok(exe) = std::env::current_exe() {
            if let Some(parent) = exe.parent() {
                dirs.push(parent.to_path_buf());
            }
        }
        dirs.push(PathBuf::from("/usr/local/lib"));
        dirs.push(PathBuf::from("/usr/lib"));
        dirs
    }

    fn library_names() -> &'static [&'static str] {
        if cfg!(target_os = "macos") {
            &["libznnswap.dylib"]
        } else if cfg!(target_os = "windows") {
            &["znnswap.dll"]
        } else {
            &["libznnswap.so"]
        }
    }
}
