//! Вывод адресов / Address rendering
//!
//! Every field is zero-padded to its exact bit width, so the binary table
//! doubles as a picture of the layout.

use core::fmt::Write;

use super::addr::DecomposedAddress;
use super::layout::AddressLayout;
use super::PhysAddr;

const HEADERS: [&str; 3] = ["Dir Index", "Table Index", "Offset"];

pub fn format_widths(layout: &AddressLayout) -> String {
    format!(
        "DirIndex Bits: {} bits\nTableIndex Bits: {} bits\nOffset Bits: {} bits\n",
        layout.dir_index_bits(),
        layout.table_index_bits(),
        layout.offset_bits(),
    )
}

/// Двоичная таблица / Binary table:
///
/// ```text
/// +------------+-------------+--------------+
/// | Dir Index  | Table Index | Offset       |
/// +------------+-------------+--------------+
/// | 0000000000 | 0100100011  | 010001010110 |
/// +------------+-------------+--------------+
/// ```
pub fn format_binary(fields: &DecomposedAddress, layout: &AddressLayout) -> String {
    let cells = [
        bits(fields.dir_index(), layout.dir_index_bits()),
        bits(fields.table_index(), layout.table_index_bits()),
        bits(fields.offset(), layout.offset_bits()),
    ];
    let mut widths = [0usize; 3];
    for (i, w) in widths.iter_mut().enumerate() {
        *w = HEADERS[i].len().max(cells[i].len());
    }

    let mut border = String::from("+");
    for w in widths {
        border.push_str(&"-".repeat(w + 2));
        border.push('+');
    }

    let row = |items: [&str; 3]| {
        let mut line = String::from("|");
        for (item, w) in items.iter().zip(widths) {
            let _ = write!(line, " {item:<w$} |");
        }
        line
    };

    let mut out = String::new();
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "{}", row(HEADERS));
    let _ = writeln!(out, "{border}");
    let _ = writeln!(out, "{}", row([cells[0].as_str(), cells[1].as_str(), cells[2].as_str()]));
    let _ = writeln!(out, "{border}");
    out
}

/// Собранный адрес в hex / Reconstructed address in hex, `0x%08x`.
pub fn format_hex(fields: &DecomposedAddress, layout: &AddressLayout) -> String {
    format!("0x{:08x}", layout.recompose(fields))
}

/// Полный вывод / Full rendering: binary table then hex.
pub fn format(fields: &DecomposedAddress, layout: &AddressLayout) -> String {
    let mut out = String::from("Binary Representation of Address:\n");
    out.push_str(&format_binary(fields, layout));
    out.push_str("Hexadecimal Representation of Address:\n");
    out.push_str(&format_hex(fields, layout));
    out.push('\n');
    out
}

fn bits(value: u32, width: u32) -> String {
    if width == 0 {
        return String::new();
    }
    format!("{:0w$b}", value, w = width as usize)
}

impl PhysAddr {
    /// Байты слова в памяти (little-endian) / Word bytes as stored (little-endian).
    pub fn to_bytes(self) -> [u8; super::WORD_SIZE] {
        self.0.to_le_bytes()
    }

    /// `| 01010110 00110100 00010010 00000000 |`
    pub fn to_binary(self) -> String {
        let mut out = String::from("|");
        for b in self.to_bytes() {
            let _ = write!(out, " {b:08b}");
        }
        out.push_str(" |");
        out
    }

    /// `0x56 34 12 00`
    pub fn to_hex(self) -> String {
        let parts: Vec<String> = self.to_bytes().iter().map(|b| format!("{b:02x}")).collect();
        format!("0x{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_renders_empty() {
        assert_eq!(bits(0, 0), "");
        assert_eq!(bits(5, 4), "0101");
    }

    #[test]
    fn phys_bytes() {
        let p = PhysAddr::new(0x0012_3456);
        assert_eq!(p.to_hex(), "0x56 34 12 00");
        assert_eq!(p.to_binary(), "| 01010110 00110100 00010010 00000000 |");
    }
}
