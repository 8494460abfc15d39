//! AddressCodec — разбор виртуального адреса сдвигами и масками
//! AddressCodec — virtual address split by explicit shift and mask
//!
//!   offset      = raw & mask(offset_bits)
//!   table_index = (raw >> offset_bits) & mask(table_index_bits)
//!   dir_index   = (raw >> (offset_bits + table_index_bits)) & mask(dir_index_bits)

use super::layout::AddressLayout;

/// Три поля виртуального адреса / The three fields of a virtual address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecomposedAddress {
    dir_index: u32,
    table_index: u32,
    offset: u32,
}

impl DecomposedAddress {
    pub const fn new(dir_index: u32, table_index: u32, offset: u32) -> Self {
        Self { dir_index, table_index, offset }
    }

    pub const fn dir_index(&self) -> u32 { self.dir_index }
    pub const fn table_index(&self) -> u32 { self.table_index }
    pub const fn offset(&self) -> u32 { self.offset }
}

/// Маска из `bits` младших единиц; 32 бита не переполняют сдвиг.
/// Mask of `bits` low ones; 32 does not overflow the shift.
#[inline]
pub(crate) const fn mask(bits: u32) -> u32 {
    if bits >= u32::BITS { u32::MAX } else { (1 << bits) - 1 }
}

#[inline]
const fn shr(value: u32, bits: u32) -> u32 {
    if bits >= u32::BITS { 0 } else { value >> bits }
}

#[inline]
const fn shl(value: u32, bits: u32) -> u32 {
    if bits >= u32::BITS { 0 } else { value << bits }
}

pub fn decompose(raw: u32, layout: &AddressLayout) -> DecomposedAddress {
    let offset_bits = layout.offset_bits();
    let table_bits = layout.table_index_bits();
    DecomposedAddress {
        offset: raw & mask(offset_bits),
        table_index: shr(raw, offset_bits) & mask(table_bits),
        dir_index: shr(raw, offset_bits + table_bits) & mask(layout.dir_index_bits()),
    }
}

/// Обратная сборка / Inverse of [`decompose`].
///
/// Each field is clipped to its width first, so an oversized field cannot
/// bleed into its neighbour.
pub fn recompose(fields: &DecomposedAddress, layout: &AddressLayout) -> u32 {
    let offset_bits = layout.offset_bits();
    let table_bits = layout.table_index_bits();
    shl(fields.dir_index & mask(layout.dir_index_bits()), table_bits + offset_bits)
        | shl(fields.table_index & mask(table_bits), offset_bits)
        | (fields.offset & mask(offset_bits))
}

impl AddressLayout {
    pub fn decompose(&self, raw: u32) -> DecomposedAddress {
        decompose(raw, self)
    }

    pub fn recompose(&self, fields: &DecomposedAddress) -> u32 {
        recompose(fields, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_edges() {
        assert_eq!(mask(0), 0);
        assert_eq!(mask(12), 0xFFF);
        assert_eq!(mask(32), u32::MAX);
        assert_eq!(shr(u32::MAX, 32), 0);
        assert_eq!(shl(1, 32), 0);
    }

    #[test]
    fn oversized_field_is_clipped() {
        let l = AddressLayout::DEFAULT;
        let f = DecomposedAddress::new(0, 0, 0x1FFF);
        assert_eq!(l.recompose(&f), 0xFFF);
    }

    #[test]
    fn zero_width_directory() {
        let l = AddressLayout::new(22, 4096, 1024).unwrap();
        let f = l.decompose(0xFFFF_FFFF);
        assert_eq!((f.dir_index(), f.table_index(), f.offset()), (0, 0x3FF, 0xFFF));
        assert_eq!(l.recompose(&f), 0x003F_FFFF);
    }
}
