//! Physical Memory Manager — выдача фреймов / frame allocator
//!
//! Управляет непрерывным диапазоном фреймов: [base, base + count * page_size).
//! Manages a contiguous range of frames: [base, base + count * page_size).
//!
//! Свободные фреймы переиспользуются первыми (младший), потом растёт bump-указатель.
//! Freed frames are reused first (lowest), then the bump pointer grows.

use std::collections::BTreeSet;

use log::trace;

use super::layout::AddressLayout;
use super::PhysAddr;
use crate::{Error, Result};

pub struct FrameAllocator {
    base: u32,
    page_size: u32,
    count: u32,
    /// Сколько фреймов уже выдано bump-указателем / frames handed out by bump
    next: u32,
    free: BTreeSet<u32>,
}

impl FrameAllocator {
    pub fn new(base: PhysAddr, count: u32, layout: &AddressLayout) -> Result<Self> {
        let page_size = layout.page_size();
        if base.as_u32() & (page_size - 1) != 0 {
            return Err(Error::InvalidArg("frame range base is not page-aligned"));
        }
        let end = base.as_u32() as u64 + count as u64 * page_size as u64;
        if end > 1u64 << layout.total_bits() {
            return Err(Error::InvalidArg("frame range exceeds the address space"));
        }
        Ok(Self { base: base.as_u32(), page_size, count, next: 0, free: BTreeSet::new() })
    }

    pub fn alloc(&mut self) -> Result<PhysAddr> {
        let frame = match self.free.pop_first() {
            Some(f) => f,
            None if self.next < self.count => {
                let f = self.base + self.next * self.page_size;
                self.next += 1;
                f
            }
            None => return Err(Error::NoMemory),
        };
        trace!("[pmm] alloc frame {:#010x}", frame);
        Ok(PhysAddr::new(frame))
    }

    /// Вернуть фрейм / Give a frame back.
    ///
    /// Fails with `InvalidFrame` for frames outside the range, misaligned,
    /// never handed out, or already free.
    pub fn free(&mut self, frame: PhysAddr) -> Result<()> {
        let f = frame.as_u32();
        let owned = f >= self.base
            && (f - self.base) % self.page_size == 0
            && (f - self.base) / self.page_size < self.next;
        if !owned || !self.free.insert(f) {
            return Err(Error::InvalidFrame(f));
        }
        trace!("[pmm] free frame {:#010x}", f);
        Ok(())
    }

    pub fn free_count(&self) -> u32 {
        self.count - self.next + self.free.len() as u32
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn capacity(&self) -> u32 {
        self.count
    }
}
