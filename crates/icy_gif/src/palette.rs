//! The fixed 6x6x6 web safe color cube and the helpers deriving GIF table
//! parameters from a palette length.

/// Number of levels per channel in the color cube.
pub const LEVELS: usize = 6;

/// Number of colors in the web safe palette.
pub const WEB_SAFE_COLORS: usize = LEVELS * LEVELS * LEVELS;

/// Largest color table the GIF format can carry.
pub const MAX_TABLE_SIZE: usize = 256;

/// Maps an 8 bit channel value to one of the 6 cube levels (nearest level, 0x33 apart).
pub static LEVEL_TABLE: [u8; 256] = build_level_table();

const fn build_level_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut v = 0;
    while v < 256 {
        table[v] = ((v + 25) / 51) as u8;
        v += 1;
    }
    table
}

/// Palette index of an 8 bit color: `36 * level(r) + 6 * level(g) + level(b)`.
#[inline]
pub fn palette_index(r: u8, g: u8, b: u8) -> u8 {
    36 * LEVEL_TABLE[r as usize] + 6 * LEVEL_TABLE[g as usize] + LEVEL_TABLE[b as usize]
}

/// The 216 entry web safe palette ordered red-major, levels 0x33 apart.
pub static WEB_SAFE_PALETTE: [[u8; 3]; WEB_SAFE_COLORS] = build_web_safe_palette();

const fn build_web_safe_palette() -> [[u8; 3]; WEB_SAFE_COLORS] {
    let mut palette = [[0u8; 3]; WEB_SAFE_COLORS];
    let mut i = 0;
    while i < WEB_SAFE_COLORS {
        let r = i / (LEVELS * LEVELS);
        let g = (i / LEVELS) % LEVELS;
        let b = i % LEVELS;
        palette[i] = [(r * 0x33) as u8, (g * 0x33) as u8, (b * 0x33) as u8];
        i += 1;
    }
    palette
}

pub fn web_safe_palette() -> &'static [[u8; 3]] {
    &WEB_SAFE_PALETTE
}

/// Smallest power of two holding `len` colors, within the 2..=256 range a GIF color table allows.
pub fn padded_palette_size(len: usize) -> usize {
    len.clamp(2, MAX_TABLE_SIZE).next_power_of_two()
}

/// Exponent stored in the low 3 bits of a packed color table field (`2^(n+1)` entries).
pub fn table_size_exponent(padded_size: usize) -> u8 {
    (padded_size.trailing_zeros() as u8).saturating_sub(1)
}

/// LZW minimum code size for a palette of `len` colors.
pub fn lit_width(len: usize) -> u8 {
    (2u8..8).find(|&w| (1usize << w) >= len).unwrap_or(8)
}
