// FILE: src/core/constants.rs

use crate::core::units::Unit;
use crate::core::values::{Dimension, Point};

// Font size keywords, as ratios of the medium size
pub const FONT_SIZE_MEDIUM_PX: f32 = 16.0;
pub const FONT_SIZE_KEYWORDS: &[(&str, f32)] = &[
    ("xx-small", 3.0 / 5.0),
    ("x-small", 3.0 / 4.0),
    ("small", 8.0 / 9.0),
    ("medium", 1.0),
    ("large", 6.0 / 5.0),
    ("x-large", 3.0 / 2.0),
    ("xx-large", 2.0),
];

pub fn font_size_ratio(keyword: &str) -> Option<f32> {
    FONT_SIZE_KEYWORDS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, ratio)| *ratio)
}

// Page sizes in portrait orientation (width, height)
const ISO_PAGE_SIZES_MM: &[(&str, f32, f32)] = &[
    ("a10", 26.0, 37.0),
    ("a9", 37.0, 52.0),
    ("a8", 52.0, 74.0),
    ("a7", 74.0, 105.0),
    ("a6", 105.0, 148.0),
    ("a5", 148.0, 210.0),
    ("a4", 210.0, 297.0),
    ("a3", 297.0, 420.0),
    ("a2", 420.0, 594.0),
    ("a1", 594.0, 841.0),
    ("a0", 841.0, 1189.0),
    ("b10", 31.0, 44.0),
    ("b9", 44.0, 62.0),
    ("b8", 62.0, 88.0),
    ("b7", 88.0, 125.0),
    ("b6", 125.0, 176.0),
    ("b5", 176.0, 250.0),
    ("b4", 250.0, 353.0),
    ("b3", 353.0, 500.0),
    ("b2", 500.0, 707.0),
    ("b1", 707.0, 1000.0),
    ("b0", 1000.0, 1414.0),
    ("c10", 28.0, 40.0),
    ("c9", 40.0, 57.0),
    ("c8", 57.0, 81.0),
    ("c7", 81.0, 114.0),
    ("c6", 114.0, 162.0),
    ("c5", 162.0, 229.0),
    ("c4", 229.0, 324.0),
    ("c3", 324.0, 458.0),
    ("c2", 458.0, 648.0),
    ("c1", 648.0, 917.0),
    ("c0", 917.0, 1297.0),
    ("jis-b10", 32.0, 45.0),
    ("jis-b9", 45.0, 64.0),
    ("jis-b8", 64.0, 91.0),
    ("jis-b7", 91.0, 128.0),
    ("jis-b6", 128.0, 182.0),
    ("jis-b5", 182.0, 257.0),
    ("jis-b4", 257.0, 364.0),
    ("jis-b3", 364.0, 515.0),
    ("jis-b2", 515.0, 728.0),
    ("jis-b1", 728.0, 1030.0),
    ("jis-b0", 1030.0, 1456.0),
];

const US_PAGE_SIZES_IN: &[(&str, f32, f32)] = &[
    ("letter", 8.5, 11.0),
    ("legal", 8.5, 14.0),
    ("ledger", 11.0, 17.0),
];

/// Portrait dimensions of a named page size.
pub fn page_size(name: &str) -> Option<Point> {
    let lookup = |table: &[(&str, f32, f32)], unit: Unit| {
        table
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, w, h)| Point(Dimension::new(w, unit), Dimension::new(h, unit)))
    };
    lookup(ISO_PAGE_SIZES_MM, Unit::Mm).or_else(|| lookup(US_PAGE_SIZES_IN, Unit::In))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes() {
        assert_eq!(
            page_size("a4"),
            Some(Point(Dimension::new(210.0, Unit::Mm), Dimension::new(297.0, Unit::Mm)))
        );
        assert_eq!(
            page_size("letter"),
            Some(Point(Dimension::new(8.5, Unit::In), Dimension::new(11.0, Unit::In)))
        );
        assert!(page_size("jis-b0").is_some());
        assert!(page_size("a11").is_none());
    }

    #[test]
    fn test_font_size_ratios() {
        assert_eq!(font_size_ratio("medium"), Some(1.0));
        assert_eq!(font_size_ratio("xx-large"), Some(2.0));
        assert_eq!(font_size_ratio("larger"), None);
    }
}
