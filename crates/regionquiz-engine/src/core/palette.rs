use serde::Serialize;

/// Colors used to draw one assigned region and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionColor {
    pub stroke: &'static str,
    /// Translucent fill drawn over the image.
    pub fill: &'static str,
    pub text: &'static str,
}

impl RegionColor {
    const fn new(stroke: &'static str, fill: &'static str, text: &'static str) -> Self {
        Self { stroke, fill, text }
    }
}

/// Fixed, ordered palette cycled through by assignment order.
pub const PALETTE: [RegionColor; 8] = [
    RegionColor::new("#2563eb", "rgba(37, 99, 235, 0.25)", "#1e3a8a"),
    RegionColor::new("#16a34a", "rgba(22, 163, 74, 0.25)", "#14532d"),
    RegionColor::new("#d97706", "rgba(217, 119, 6, 0.25)", "#78350f"),
    RegionColor::new("#9333ea", "rgba(147, 51, 234, 0.25)", "#581c87"),
    RegionColor::new("#db2777", "rgba(219, 39, 119, 0.25)", "#831843"),
    RegionColor::new("#0891b2", "rgba(8, 145, 178, 0.25)", "#164e63"),
    RegionColor::new("#dc2626", "rgba(220, 38, 38, 0.25)", "#7f1d1d"),
    RegionColor::new("#4d7c0f", "rgba(77, 124, 15, 0.25)", "#365314"),
];

/// Returns the palette entry for the `index`-th assignment (zero-based),
/// wrapping around after the last color.
#[must_use]
pub const fn color_for_index(index: usize) -> RegionColor {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(color_for_index(0), PALETTE[0]);
        assert_eq!(color_for_index(PALETTE.len()), PALETTE[0]);
        assert_eq!(color_for_index(PALETTE.len() + 3), PALETTE[3]);
    }

    #[test]
    fn test_palette_entries_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in &PALETTE[i + 1..] {
                assert_ne!(a.stroke, b.stroke);
            }
        }
    }
}
