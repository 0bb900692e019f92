pub struct Pal([u8; 64]);

impl Pal {
    pub fn new() -> Self {
        let pal = [0u8; 64];
        Pal(pal)
    }

    /// Palette used for window bitmaps: white background, black fill, one
    /// accent color marking the seam column of a merged span, and thirteen
    /// black entries rounding out the 16 slots a 4bpp image needs.
    pub fn window_default() -> Self {
        let mut pal = Pal::new();
        pal.set(0, (0xFF, 0xFF, 0xFF));
        pal.set(1, (0x00, 0x00, 0x00));
        pal.set(2, (0xFE, 0xBA, 0xD4));
        pal
    }

    pub fn get(&self, i: usize) -> (u8, u8, u8) {
        let b = self.0[4 * i + 0];
        let g = self.0[4 * i + 1];
        let r = self.0[4 * i + 2];

        (r, g, b)
    }

    // Entries are stored BGRX, the order bitmap palettes use on disk.
    pub fn set(&mut self, i: usize, rgb: (u8, u8, u8)) {
        self.0[4 * i + 0] = rgb.2;
        self.0[4 * i + 1] = rgb.1;
        self.0[4 * i + 2] = rgb.0;
        self.0[4 * i + 3] = 0;
    }

    pub fn as_slice(&self) -> &[u8; 64] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn window_palette_colors() {
        let pal = Pal::window_default();

        assert_eq!(pal.get(0), (0xFF, 0xFF, 0xFF));
        assert_eq!(pal.get(1), (0x00, 0x00, 0x00));
        assert_eq!(pal.get(2), (0xFE, 0xBA, 0xD4));
        for i in 3..16 {
            assert_eq!(pal.get(i), (0x00, 0x00, 0x00));
        }
    }

    #[test]
    fn entries_are_bgrx() {
        let mut pal = Pal::new();
        pal.set(1, (0x11, 0x22, 0x33));

        assert_eq!(&pal.as_slice()[4..8], &[0x33, 0x22, 0x11, 0x00]);
    }
}
