//! The 64x32 monochrome framebuffer.

use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// One cell per pixel, stored row-major, each either 0 or 1.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    cells: [u8; SCREEN_SIZE],
}

impl Screen {

    pub fn new() -> Screen {
        Screen { cells: [0; SCREEN_SIZE] }
    }

    pub fn clear(&mut self) {
        self.cells = [0; SCREEN_SIZE];
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[index(x, y)]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// XOR a sprite onto the screen with its top left corner at `(x, y)`.
    /// Each byte is one row, most significant bit leftmost.
    /// Coordinates wrap around both edges.
    ///
    /// Returns true if any pixel that was already set got touched.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row_offset, row) in sprite.iter().enumerate() {
            for col_offset in 0..8 {
                if row & (0x80 >> col_offset) == 0 {
                    continue;
                }
                let px = (x as usize + col_offset) % SCREEN_WIDTH;
                let py = (y as usize + row_offset) % SCREEN_HEIGHT;
                let pixel = &mut self.cells[index(px, py)];
                if *pixel == 1 {
                    collision = true;
                }
                *pixel ^= 1;
            }
        }
        collision
    }
}

fn index(x: usize, y: usize) -> usize {
    y * SCREEN_WIDTH + x
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// The display dump: one glyph per pixel and a line per row.
impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SCREEN_WIDTH) {
            for cell in row {
                write!(f, "{}", if *cell == 1 { '\u{25A0}' } else { '\u{25A1}' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Screen(\n{})", self)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn lit(screen: &Screen) -> Vec<(usize, usize)> {
        let mut pixels = Vec::new();
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                if screen.get(x, y) == 1 {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn draw_sets_pixels_msb_first() {
        let mut screen = Screen::new();
        assert!(!screen.draw(2, 3, &[0b1000_0001]));
        assert_eq!(lit(&screen), vec![(2, 3), (9, 3)]);
    }

    #[test]
    fn drawing_twice_erases_and_collides() {
        let mut screen = Screen::new();
        let sprite = [0xF0, 0x90, 0x90, 0x90, 0xF0];
        assert!(!screen.draw(10, 10, &sprite));
        assert!(screen.draw(10, 10, &sprite));
        assert_eq!(screen, Screen::new());
    }

    #[test]
    fn overlapping_unset_bits_do_not_collide() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0xF0]);
        assert!(!screen.draw(0, 0, &[0x0F]));
        assert_eq!(lit(&screen).len(), 8);
    }

    #[test]
    fn draw_wraps_around_both_edges() {
        let mut screen = Screen::new();
        screen.draw(62, 31, &[0b1110_0000, 0b1000_0000]);
        assert_eq!(lit(&screen), vec![(62, 0), (0, 31), (62, 31), (63, 31)]);
    }

    #[test]
    fn clear_zeroes_every_cell() {
        let mut screen = Screen::new();
        screen.draw(0, 0, &[0xFF; 15]);
        screen.draw(40, 20, &[0xFF; 15]);
        screen.clear();
        assert!(screen.cells().iter().all(|c| *c == 0));
    }

    #[test]
    fn display_dump_breaks_rows_every_64_cells() {
        let mut screen = Screen::new();
        screen.draw(0, 1, &[0x80]);
        let dump = screen.to_string();
        let rows: Vec<&str> = dump.lines().collect();
        assert_eq!(rows.len(), SCREEN_HEIGHT);
        assert!(rows.iter().all(|row| row.chars().count() == SCREEN_WIDTH));
        assert_eq!(rows[1].chars().next(), Some('\u{25A0}'));
        assert_eq!(rows[0].chars().next(), Some('\u{25A1}'));
    }

    proptest! {
        #[test]
        fn collision_iff_a_touched_pixel_was_set(
            first in proptest::collection::vec(any::<u8>(), 0..16),
            second in proptest::collection::vec(any::<u8>(), 0..16),
            x in any::<u8>(),
            y in any::<u8>(),
        ) {
            let mut screen = Screen::new();
            screen.draw(x, y, &first);
            let before = screen.clone();
            let collision = screen.draw(x, y, &second);
            let expected = second.iter().enumerate().any(|(row, bits)| {
                first.get(row).map_or(false, |old| old & bits != 0)
            });
            prop_assert_eq!(collision, expected);
            prop_assert!(screen.cells().iter().all(|c| *c <= 1));
            let changed = screen.cells().iter().zip(before.cells()).filter(|(a, b)| a != b).count();
            let set_bits: u32 = second.iter().map(|b| b.count_ones()).sum();
            prop_assert_eq!(changed as u32, set_bits);
        }
    }
}
