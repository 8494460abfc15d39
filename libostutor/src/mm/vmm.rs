//! Virtual Memory Manager — двухуровневые page tables
//! Virtual Memory Manager — two-level page tables
//!
//! Структура: page directory → page table → физический фрейм
//! Structure: page directory → page table → physical frame
//!
//! Каталог и таблицы живут в обычной управляемой памяти; запись ссылается
//! на следующий уровень по базе фрейма, а не по сырому указателю.
//! Directory and tables live in ordinary managed memory; an entry refers to
//! the next level by frame base, never by a raw pointer.

use std::collections::BTreeMap;

use bitflags::bitflags;
use log::{debug, trace};

use super::addr::{mask, DecomposedAddress};
use super::layout::{AddressLayout, METADATA_BITS};
use super::pmm::FrameAllocator;
use super::{PhysAddr, VirtAddr};
use crate::{Error, Level, Result};

/// Биты базы фрейма в записи / Frame base bits of an entry
pub const FRAME_NUMBER_MASK: u32 = !((1u32 << METADATA_BITS) - 1);
/// Биты флагов в записи / Flag bits of an entry
pub const METADATA_MASK: u32 = (1u32 << METADATA_BITS) - 1;

/// Самый широкий уровень, который держим массивом / widest level kept as an array
const MAX_LEVEL_BITS: u32 = 16;

bitflags! {
    /// Флаги страницы / Page flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PageFlags: u32 {
        const PRESENT   = 1 << 0;
        const WRITABLE  = 1 << 1;
        const USER      = 1 << 2;
        const ACCESSED  = 1 << 3;
    }
}

/// Запись каталога или таблицы / Directory or table entry.
///
/// `| frame base (28) | flags (4) |`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct PageTableEntry(u32);

impl PageTableEntry {
    pub const EMPTY: Self = Self(0);

    pub fn new(frame: PhysAddr, flags: PageFlags) -> Self {
        Self((frame.as_u32() & FRAME_NUMBER_MASK) | (flags.bits() & METADATA_MASK))
    }

    pub const fn raw(self) -> u32 { self.0 }

    pub fn frame(self) -> PhysAddr {
        PhysAddr::new(self.0 & FRAME_NUMBER_MASK)
    }

    pub fn flags(self) -> PageFlags {
        PageFlags::from_bits_truncate(self.0 & METADATA_MASK)
    }

    pub fn is_present(self) -> bool {
        self.flags().contains(PageFlags::PRESENT)
    }
}

/// Трейт для page tables / Trait for page table implementations.
pub trait PageTableImpl {
    fn map(&mut self, virt: VirtAddr, phys: PhysAddr, flags: PageFlags) -> Result<()>;
    /// Returns the frame the page was mapped to.
    fn unmap(&mut self, virt: VirtAddr) -> Result<PhysAddr>;
    fn translate(&self, virt: VirtAddr) -> Result<PhysAddr>;
}

struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    fn new(len: usize) -> Self {
        Self { entries: vec![PageTableEntry::EMPTY; len] }
    }

    fn is_empty(&self) -> bool {
        !self.entries.iter().any(|e| e.is_present())
    }
}

/// Адресное пространство / Address space.
///
/// Owns its directory, every page table the directory references (keyed by
/// the table's frame base) and the allocator those table frames come from.
pub struct PageDirectory {
    layout: AddressLayout,
    entries: Vec<PageTableEntry>,
    tables: BTreeMap<u32, PageTable>,
    table_frames: FrameAllocator,
}

impl PageDirectory {
    pub fn new(layout: AddressLayout, table_frames: FrameAllocator) -> Result<Self> {
        if layout.offset_bits() < METADATA_BITS {
            return Err(Error::InvalidLayout("page size too small to hold entry flags"));
        }
        if table_frames.page_size() != layout.page_size() {
            return Err(Error::InvalidLayout("table frame size differs from the page size"));
        }
        if layout.dir_index_bits() > MAX_LEVEL_BITS || layout.table_index_bits() > MAX_LEVEL_BITS {
            return Err(Error::InvalidLayout("page-table level wider than 16 bits"));
        }
        let len = 1usize << layout.dir_index_bits();
        debug!("[vmm] new directory: {} entries, {} per table", len, 1usize << layout.table_index_bits());
        Ok(Self {
            layout,
            entries: vec![PageTableEntry::EMPTY; len],
            tables: BTreeMap::new(),
            table_frames,
        })
    }

    pub fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    /// Пройти оба уровня / Walk both levels and return (PDE, PTE).
    pub fn lookup_entries(&self, virt: VirtAddr) -> Result<(PageTableEntry, PageTableEntry)> {
        let fields = self.layout.decompose(virt.as_u32());
        let pde = self.directory_entry(virt, &fields)?;
        let table = self.tables.get(&pde.frame().as_u32()).ok_or(Error::NotMapped {
            addr: virt.as_u32(),
            level: Level::Directory,
            index: fields.dir_index(),
        })?;
        let pte = table.entries[fields.table_index() as usize];
        if !pte.is_present() {
            return Err(Error::NotMapped {
                addr: virt.as_u32(),
                level: Level::Table,
                index: fields.table_index(),
            });
        }
        Ok((pde, pte))
    }

    /// Сколько страниц отображено / Number of mapped pages.
    pub fn mapped_pages(&self) -> usize {
        self.tables
            .values()
            .map(|t| t.entries.iter().filter(|e| e.is_present()).count())
            .sum()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn directory_entry(&self, virt: VirtAddr, fields: &DecomposedAddress) -> Result<PageTableEntry> {
        let pde = self.entries[fields.dir_index() as usize];
        if !pde.is_present() {
            return Err(Error::NotMapped {
                addr: virt.as_u32(),
                level: Level::Directory,
                index: fields.dir_index(),
            });
        }
        Ok(pde)
    }

    fn table_len(&self) -> usize {
        1usize << self.layout.table_index_bits()
    }
}

impl PageTableImpl for PageDirectory {
    fn map(&mut self, virt: VirtAddr, phys: PhysAddr, flags: PageFlags) -> Result<()> {
        if phys.as_u32() & mask(self.layout.offset_bits()) != 0 {
            return Err(Error::InvalidArg("frame is not page-aligned"));
        }
        let fields = self.layout.decompose(virt.as_u32());
        let dir = fields.dir_index() as usize;

        if !self.entries[dir].is_present() {
            let len = self.table_len();
            let frame = self.table_frames.alloc()?;
            self.tables.insert(frame.as_u32(), PageTable::new(len));
            self.entries[dir] =
                PageTableEntry::new(frame, PageFlags::PRESENT | PageFlags::WRITABLE | PageFlags::USER);
            debug!("[vmm] dir[{}] -> table at {}", dir, frame);
        }

        let table_base = self.entries[dir].frame().as_u32();
        let table = self.tables.get_mut(&table_base).ok_or(Error::NotMapped {
            addr: virt.as_u32(),
            level: Level::Directory,
            index: fields.dir_index(),
        })?;
        let slot = &mut table.entries[fields.table_index() as usize];
        if slot.is_present() {
            return Err(Error::AlreadyMapped { addr: virt.as_u32() });
        }
        *slot = PageTableEntry::new(phys, flags | PageFlags::PRESENT);
        trace!("[vmm] map {} -> {} ({:?})", virt, phys, flags);
        Ok(())
    }

    /// Пустая таблица возвращается аллокатору / An emptied table is freed.
    fn unmap(&mut self, virt: VirtAddr) -> Result<PhysAddr> {
        let (pde, pte) = self.lookup_entries(virt)?;
        let fields = self.layout.decompose(virt.as_u32());
        let table_base = pde.frame().as_u32();

        let emptied = match self.tables.get_mut(&table_base) {
            Some(table) => {
                table.entries[fields.table_index() as usize] = PageTableEntry::EMPTY;
                table.is_empty()
            }
            None => false,
        };
        if emptied {
            self.tables.remove(&table_base);
            self.entries[fields.dir_index() as usize] = PageTableEntry::EMPTY;
            self.table_frames.free(pde.frame())?;
            debug!("[vmm] dir[{}] released table at {}", fields.dir_index(), pde.frame());
        }
        trace!("[vmm] unmap {} (was {})", virt, pte.frame());
        Ok(pte.frame())
    }

    fn translate(&self, virt: VirtAddr) -> Result<PhysAddr> {
        let (_, pte) = self.lookup_entries(virt)?;
        let offset = virt.as_u32() & mask(self.layout.offset_bits());
        let phys = PhysAddr::new(pte.frame().as_u32() | offset);
        trace!("[vmm] translate {} -> {}", virt, phys);
        Ok(phys)
    }
}
