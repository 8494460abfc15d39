//! Address layout — compile-time configuration of the virtual address split
//!
//! По умолчанию / Default (x86 32-bit, no PAE):
//!   | dir index (10) | table index (10) | offset (12) |

use crate::{Error, Result};

pub const ARCH_BITS: u32 = 32;
pub const DIR_ENTRIES: u32 = 1024;
pub const PAGE_SIZE: u32 = 4096;

/// Размер машинного слова в байтах / Machine word size in bytes.
/// Physical addresses are dumped as this many bytes.
pub const WORD_SIZE: usize = 4;

/// Младшие биты записи page table под флаги / Low entry bits reserved for flags
pub const METADATA_BITS: u32 = 4;

const _: () = assert!(WORD_SIZE == core::mem::size_of::<u32>());

/// Как делится виртуальный адрес / How a virtual address is split.
///
/// The three derived widths always sum to `total_bits`; `new` refuses
/// anything that would break that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressLayout {
    total_bits: u32,
    page_size: u32,
    dir_entries: u32,
}

impl AddressLayout {
    pub const DEFAULT: Self = Self {
        total_bits: ARCH_BITS,
        page_size: PAGE_SIZE,
        dir_entries: DIR_ENTRIES,
    };

    pub fn new(total_bits: u32, page_size: u32, dir_entries: u32) -> Result<Self> {
        if total_bits == 0 || total_bits > ARCH_BITS {
            return Err(Error::InvalidLayout("total bits must be in 1..=32"));
        }
        if !page_size.is_power_of_two() {
            return Err(Error::InvalidLayout("page size must be a power of two"));
        }
        if !dir_entries.is_power_of_two() {
            return Err(Error::InvalidLayout("directory entries must be a power of two"));
        }
        let layout = Self { total_bits, page_size, dir_entries };
        if layout.offset_bits() + layout.table_index_bits() > total_bits {
            return Err(Error::InvalidLayout("offset and table index exceed total bits"));
        }
        Ok(layout)
    }

    pub const fn total_bits(&self) -> u32 { self.total_bits }
    pub const fn page_size(&self) -> u32 { self.page_size }
    pub const fn dir_entries(&self) -> u32 { self.dir_entries }

    /// log2(page_size)
    pub const fn offset_bits(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    /// log2(dir_entries)
    pub const fn table_index_bits(&self) -> u32 {
        self.dir_entries.trailing_zeros()
    }

    pub const fn dir_index_bits(&self) -> u32 {
        self.total_bits - self.offset_bits() - self.table_index_bits()
    }
}

impl Default for AddressLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_widths() {
        let l = AddressLayout::DEFAULT;
        assert_eq!((l.dir_index_bits(), l.table_index_bits(), l.offset_bits()), (10, 10, 12));
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(AddressLayout::new(32, 4000, 1024).is_err());
        assert!(AddressLayout::new(32, 4096, 1000).is_err());
        assert!(AddressLayout::new(32, 0, 1024).is_err());
    }

    #[test]
    fn rejects_overwide_fields() {
        assert!(AddressLayout::new(16, 4096, 1024).is_err());
        assert!(AddressLayout::new(33, 4096, 1024).is_err());
        assert_eq!(AddressLayout::new(22, 4096, 1024).map(|l| l.dir_index_bits()), Ok(0));
    }
}
