/// Parses `#rrggbb` (or `rrggbb`) into sRGB components in [0, 1]
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim();
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(hex_to_rgb(value))
}

/// Splits a packed `0xRRGGBB` value into sRGB components in [0, 1]
pub const fn hex_to_rgb(value: u32) -> [f32; 3] {
    [
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn srgb_to_linear_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_to_linear)
}
