//! On-disk records of the Apple EFI fat binary container.
//!
//! ```text
//! [0x00] magic       (u32 LE, 0x0ef1fab9)
//! [0x04] num_archs   (u32 LE)
//! [0x08] arch[0]     (20 bytes)
//! ...
//! ```
//!
//! Every integer is little-endian regardless of host.

pub const EFI_FAT_MAGIC: u32 = 0x0ef1_fab9;

pub const CPU_ARCH_ABI64: u32 = 0x0100_0000;
pub const CPU_TYPE_X86: u32 = 7;
pub const CPU_TYPE_X86_64: u32 = CPU_TYPE_X86 | CPU_ARCH_ABI64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EfiFatHeader {
    pub magic: u32,
    pub num_archs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EfiFatArch {
    pub cpu_type: u32,
    pub cpu_subtype: u32,
    pub offset: u32,
    pub size: u32,
    pub align: u32,
}

impl EfiFatArch {
    pub const SIZE: usize = 20;

    pub fn from_le_bytes(buf: &[u8; Self::SIZE]) -> Self {
        let field = |i: usize| {
            u32::from_le_bytes([buf[i * 4], buf[i * 4 + 1], buf[i * 4 + 2], buf[i * 4 + 3]])
        };
        Self {
            cpu_type: field(0),
            cpu_subtype: field(1),
            offset: field(2),
            size: field(3),
            align: field(4),
        }
    }
}
