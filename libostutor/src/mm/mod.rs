//! Memory Management — учебная модель / teaching model
//!
//! Слои / Layers:
//!   layout — AddressLayout: ширины полей адреса / address field widths
//!   addr   — AddressCodec: разбор и сборка адреса / decompose + recompose
//!   fmt    — двоичный и hex вывод / binary and hex rendering
//!   pmm    — выдача физических фреймов / physical frame allocator
//!   vmm    — двухуровневые page tables / two-level page tables

pub mod addr;
pub mod fmt;
pub mod layout;
pub mod pmm;
pub mod vmm;

use core::fmt as cfmt;

pub use addr::{decompose, recompose, DecomposedAddress};
pub use layout::{AddressLayout, ARCH_BITS, DIR_ENTRIES, PAGE_SIZE, WORD_SIZE};
pub use pmm::FrameAllocator;
pub use vmm::{PageDirectory, PageFlags, PageTableEntry, PageTableImpl};

/// Физический адрес / Physical address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PhysAddr(pub u32);

/// Виртуальный адрес / Virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(pub u32);

impl PhysAddr {
    pub const fn new(addr: u32) -> Self { Self(addr) }
    pub const fn as_u32(self) -> u32   { self.0 }
}

impl VirtAddr {
    pub const fn new(addr: u32) -> Self { Self(addr) }
    pub const fn as_u32(self) -> u32   { self.0 }

    /// Разобрать адрес по раскладке / Split the address with a layout.
    pub fn fields(self, layout: &AddressLayout) -> DecomposedAddress {
        decompose(self.0, layout)
    }
}

impl cfmt::Display for PhysAddr {
    fn fmt(&self, f: &mut cfmt::Formatter<'_>) -> cfmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl cfmt::Display for VirtAddr {
    fn fmt(&self, f: &mut cfmt::Formatter<'_>) -> cfmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
