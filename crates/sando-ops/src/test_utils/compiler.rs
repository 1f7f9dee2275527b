use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use alloy_primitives::Bytes;

use crate::{BytecodeCompiler, Error, Result};

/// A compiler that returns fixed bytecode without running anything.
#[derive(Debug)]
pub struct StaticCompiler {
    available: bool,
    bytecode: Bytes,
    compiled: Mutex<Vec<PathBuf>>,
}

impl StaticCompiler {
    /// A compiler that always produces `bytecode`.
    pub fn new(bytecode: impl Into<Bytes>) -> Self {
        Self { available: true, bytecode: bytecode.into(), compiled: Mutex::default() }
    }

    /// A compiler that reports itself as missing.
    pub fn unavailable() -> Self {
        Self { available: false, ..Self::new(Bytes::new()) }
    }

    /// Paths handed to [`BytecodeCompiler::compile`], in call order.
    pub fn compiled(&self) -> Vec<PathBuf> {
        self.compiled.lock().unwrap().clone()
    }
}

impl BytecodeCompiler for StaticCompiler {
    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::CompilerUnavailable("static compiler disabled".to_string()))
        }
    }

    fn compile(&self, source: &Path) -> Result<Bytes> {
        self.ensure_available()?;
        self.compiled.lock().unwrap().push(source.to_path_buf());
        Ok(self.bytecode.clone())
    }
}
