//! Source-to-bytecode compilation.
//!
//! The sandwich contract is written in Huff and compiled out of process by `huffc`. Availability
//! is checked before compiling so that a missing toolchain aborts a deployment before any nonce
//! is read or any transaction is built.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use alloy_primitives::{hex, Bytes};
use tracing::debug;

use crate::{Error, Result};

/// Turns a contract source file into deployable bytecode.
pub trait BytecodeCompiler {
    /// Returns [`Error::CompilerUnavailable`] if the compiler cannot be invoked.
    fn ensure_available(&self) -> Result<()>;

    /// Compiles `source` and returns the raw bytecode.
    fn compile(&self, source: &Path) -> Result<Bytes>;
}

/// The `huffc` command line compiler.
#[derive(Debug, Clone)]
pub struct Huffc {
    program: PathBuf,
}

impl Default for Huffc {
    fn default() -> Self {
        Self::new("huffc")
    }
}

impl Huffc {
    /// Uses the given executable instead of `huffc` from `PATH`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl BytecodeCompiler for Huffc {
    fn ensure_available(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(Error::CompilerUnavailable(format!(
                "`{}` is not installed or not executable",
                self.program.display()
            ))),
        }
    }

    fn compile(&self, source: &Path) -> Result<Bytes> {
        let output = Command::new(&self.program)
            .arg("--bytecode")
            .arg(source)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::CompilerUnavailable(format!("{}: {e}", self.program.display())))?;

        if !output.status.success() {
            return Err(Error::Compile {
                path: source.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let bytecode = hex::decode(stdout.trim()).map_err(|e| Error::Compile {
            path: source.to_path_buf(),
            reason: format!("compiler printed invalid hex: {e}"),
        })?;
        debug!(source = %source.display(), len = bytecode.len(), "Compiled bytecode");

        Ok(bytecode.into())
    }
}
