use aok::{OK, Void};
use libostutor::mm::{decompose, fmt, recompose, AddressLayout, DecomposedAddress, VirtAddr};
use log::info;
use proptest::prelude::*;

#[static_init::constructor(0)]
extern "C" fn _log_init() {
    log_init::init();
}

const L: AddressLayout = AddressLayout::DEFAULT;

#[test]
fn test_default_widths() -> Void {
    assert_eq!(L.offset_bits(), 12);
    assert_eq!(L.table_index_bits(), 10);
    assert_eq!(L.dir_index_bits(), 10);
    assert_eq!(L.dir_index_bits() + L.table_index_bits() + L.offset_bits(), 32);
    OK
}

#[test]
fn test_decompose_0x123456() -> Void {
    let f = decompose(0x123456, &L);
    info!("> 0x123456 -> {:?}", f);
    assert_eq!(f.offset(), 0x456);
    assert_eq!(f.table_index(), 0x123);
    assert_eq!(f.dir_index(), 0);
    assert_eq!(recompose(&f, &L), 0x123456);
    OK
}

#[test]
fn test_recompose_fields() -> Void {
    let f = DecomposedAddress::new(2, 512, 100);
    assert_eq!(recompose(&f, &L), 0x801064);
    assert_eq!(L.decompose(0x801064), f);
    OK
}

#[test]
fn test_boundaries() -> Void {
    assert_eq!(decompose(0, &L), DecomposedAddress::new(0, 0, 0));
    assert_eq!(decompose(u32::MAX, &L), DecomposedAddress::new(0x3FF, 0x3FF, 0xFFF));
    assert_eq!(recompose(&DecomposedAddress::new(0x3FF, 0x3FF, 0xFFF), &L), u32::MAX);
    OK
}

#[test]
fn test_virt_addr_fields() -> Void {
    assert_eq!(VirtAddr::new(0xC000_1ABC).fields(&L), DecomposedAddress::new(0x300, 1, 0xABC));
    OK
}

#[test]
fn test_custom_layout() -> Void {
    // 8 KiB pages, 512-entry tables: 10 / 9 / 13
    let l = AddressLayout::new(32, 8192, 512)?;
    assert_eq!((l.dir_index_bits(), l.table_index_bits(), l.offset_bits()), (10, 9, 13));
    let f = l.decompose(0xDEAD_BEEF);
    assert_eq!(f.offset(), 0xDEAD_BEEF & 0x1FFF);
    assert_eq!(f.table_index(), (0xDEAD_BEEF >> 13) & 0x1FF);
    assert_eq!(f.dir_index(), 0xDEAD_BEEF >> 22);
    assert_eq!(l.recompose(&f), 0xDEAD_BEEF);
    OK
}

#[test]
fn test_format_binary_and_hex() -> Void {
    let f = decompose(0x123456, &L);
    let table = fmt::format_binary(&f, &L);
    info!("\n{}", table);
    assert!(table.contains("| 0000000000 | 0100100011  | 010001010110 |"));
    assert_eq!(fmt::format_hex(&f, &L), "0x00123456");
    assert_eq!(
        fmt::format_widths(&L),
        "DirIndex Bits: 10 bits\nTableIndex Bits: 10 bits\nOffset Bits: 12 bits\n"
    );
    OK
}

#[test]
fn test_format_idempotent() -> Void {
    let f = decompose(0xFEDC_BA98, &L);
    assert_eq!(fmt::format(&f, &L), fmt::format(&f, &L));
    OK
}

#[test]
fn test_format_pads_to_width() -> Void {
    let f = decompose(1 << 22 | 1 << 12 | 1, &L);
    let table = fmt::format_binary(&f, &L);
    assert!(table.contains("| 0000000001 | 0000000001  | 000000000001 |"));
    OK
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4096))]

    #[test]
    fn prop_round_trip(x in any::<u32>()) {
        prop_assert_eq!(recompose(&decompose(x, &L), &L), x);
    }

    #[test]
    fn prop_fields_fit_widths(x in any::<u32>()) {
        let f = decompose(x, &L);
        prop_assert!(f.dir_index() < 1 << 10);
        prop_assert!(f.table_index() < 1 << 10);
        prop_assert!(f.offset() < 1 << 12);
    }
}
