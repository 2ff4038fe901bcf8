use std::fmt;

use crate::ffi::{CPU_TYPE_X86, CPU_TYPE_X86_64};

/// Architectures an EFI fat binary may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    X86,
    X64,
}

impl Architecture {
    /// Map a descriptor's `cpu_type`. Anything else is unsupported.
    pub fn from_cpu_type(cpu_type: u32) -> Option<Self> {
        match cpu_type {
            CPU_TYPE_X86 => Some(Architecture::X86),
            CPU_TYPE_X86_64 => Some(Architecture::X64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "X86",
            Architecture::X64 => "X64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
