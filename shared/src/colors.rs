/// Hue (degrees), saturation and lightness for a fleet, picked from the
/// CRC32 of its tag. Saturation and lightness stay inside a band that
/// reads on a dark card.
pub fn tag_hsl(tag: &str) -> (f64, f64, f64) {
    let hash = crc32fast::hash(tag.as_bytes());
    let hue = f64::from(hash % 360);
    let saturation = 0.45 + f64::from((hash >> 16) & 0xff) / 255.0 * 0.40;
    let lightness = 0.45 + f64::from(hash >> 24) / 255.0 * 0.20;
    (hue, saturation, lightness)
}

pub fn fleet_color(tag: &str) -> (u8, u8, u8) {
    let (h, s, l) = tag_hsl(tag);
    hsl_to_rgb(h, s, l)
}

pub fn hex_css(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Square SVG placeholder logo as a data URL, for fleets without `logo_url`.
pub fn placeholder_logo(tag: &str) -> String {
    let (r, g, b) = fleet_color(tag);
    // `#` must be escaped inside a data URL.
    let fill = hex_css(r, g, b).replace('#', "%23");
    format!(
        "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"60\" height=\"60\"><rect width=\"60\" height=\"60\" fill=\"{fill}\"/></svg>"
    )
}

/// HSL to 8-bit RGB. `h` is in degrees, `s` and `l` in `0..=1`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod tests {
    use super::{fleet_color, hex_css, hsl_to_rgb, placeholder_logo, tag_hsl};

    #[test]
    fn primaries_and_greys_convert() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), (128, 128, 128));
        assert_eq!(hsl_to_rgb(300.0, 0.0, 1.0), (255, 255, 255));
    }

    #[test]
    fn fleet_color_is_deterministic() {
        assert_eq!(fleet_color("TIDE"), fleet_color("TIDE"));
    }

    #[test]
    fn tag_hsl_stays_in_readable_band() {
        for tag in ["TIDE", "GHOST", "A", "", "ZZZZZZ"] {
            let (h, s, l) = tag_hsl(tag);
            assert!((0.0..360.0).contains(&h), "{tag}: hue {h}");
            assert!((0.44..=0.86).contains(&s), "{tag}: saturation {s}");
            assert!((0.44..=0.66).contains(&l), "{tag}: lightness {l}");
        }
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(hex_css(88, 101, 242), "#5865f2");
        assert_eq!(hex_css(0, 10, 255), "#000aff");
    }

    #[test]
    fn placeholder_escapes_hash() {
        let url = placeholder_logo("TIDE");
        assert!(url.starts_with("data:image/svg+xml,"));
        assert!(url.contains("fill=\"%23"));
        assert!(!url.contains('#'));
    }
}
