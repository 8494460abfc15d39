//! address_translate — разбор адреса и обход page tables
//! address_translate — address decomposition and a page-table walk

use libostutor::{
    drivers::Console,
    kprintln,
    mm::{fmt, AddressLayout, FrameAllocator, PageDirectory, PageFlags, PageTableImpl, PhysAddr, VirtAddr},
    Result,
};
use log::info;

const VIRTUAL_ADDRESS: u32 = 0x0012_3456;
/// Не отображён / Left unmapped on purpose
const STRAY_ADDRESS: u32 = 0x8040_2000;

const TABLE_FRAMES_BASE: u32 = 0x0010_0000;
const TABLE_FRAMES: u32 = 64;
const DATA_FRAMES_BASE: u32 = 0x0040_0000;
const DATA_FRAMES: u32 = 256;

fn main() -> Result<()> {
    log_init::init();
    let console = Console::stdout();
    let layout = AddressLayout::DEFAULT;

    // 1. Раскладка адреса / Address layout
    console.print(&fmt::format_widths(&layout));

    // 2. Разбор виртуального адреса / Virtual address decomposition
    let virt = VirtAddr::new(VIRTUAL_ADDRESS);
    let fields = virt.fields(&layout);
    kprintln!(console);
    console.print(&fmt::format(&fields, &layout));

    // 3. Адресное пространство / Address space
    let table_frames = FrameAllocator::new(PhysAddr::new(TABLE_FRAMES_BASE), TABLE_FRAMES, &layout)?;
    let mut data_frames = FrameAllocator::new(PhysAddr::new(DATA_FRAMES_BASE), DATA_FRAMES, &layout)?;
    let mut space = PageDirectory::new(layout, table_frames)?;

    let frame = data_frames.alloc()?;
    space.map(virt, frame, PageFlags::WRITABLE | PageFlags::USER)?;
    info!("[mm] mapped {} -> frame {}", virt, frame);

    // 4. Трансляция / Translation
    kprintln!(console, "\nTranslating Virtual Address to Physical:");
    let (pde, pte) = space.lookup_entries(virt)?;
    kprintln!(console, "PDE[{}] = {:#010x}  PTE[{}] = {:#010x}",
        fields.dir_index(), pde.raw(), fields.table_index(), pte.raw());
    let phys = space.translate(virt)?;
    kprintln!(console, "\nBinary Representation of Physical Address:\n{}", phys.to_binary());
    kprintln!(console, "\nHexadecimal Representation of Physical Address:\n{}", phys.to_hex());

    // 5. Неотображённый адрес — ошибка, не падение
    //    Unmapped address — an error value, not a crash
    match space.translate(VirtAddr::new(STRAY_ADDRESS)) {
        Ok(p)  => kprintln!(console, "\n{:#010x} -> {}", STRAY_ADDRESS, p),
        Err(e) => kprintln!(console, "\n{}", e),
    }

    console.flush();
    Ok(())
}
