use std::io;
use std::io::Write;

use crate::grid::Grid;

/// Filled circle, U+25CF
pub const ALIVE_GLYPH: char = '●';
pub const DEAD_GLYPH: char = ' ';

/// Printed after every frame
pub const SEPARATOR: &str = "---";

/// Draws grids as text, one character per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    pub alive: char,
    pub dead: char,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            alive: ALIVE_GLYPH,
            dead: DEAD_GLYPH,
        }
    }
}

impl Renderer {
    pub fn new(alive: char, dead: char) -> Self {
        Self { alive, dead }
    }

    /// Render `grid` into a frame: one line per row, then the separator line.
    pub fn render(&self, grid: &Grid) -> String {
        // Glyphs can be up to 4 bytes, plus a newline per row
        let mut fb = String::with_capacity(grid.height() * (4 * grid.width() + 1) + 4);

        for row in grid.rows() {
            fb.extend(row.iter().map(|&alive| self.glyph(alive)));
            fb.push('\n');
        }

        fb.push_str(SEPARATOR);
        fb.push('\n');

        fb
    }

    /// Render `grid` straight into `out`.
    pub fn write_to<W: Write>(&self, out: &mut W, grid: &Grid) -> io::Result<()> {
        out.write_all(self.render(grid).as_bytes())
    }

    fn glyph(&self, alive: bool) -> char {
        if alive { self.alive } else { self.dead }
    }
}

#[cfg(test)]
mod test {
    use insta::assert_snapshot;

    use super::Renderer;
    use crate::grid::Grid;

    #[test]
    fn render_glider() {
        let grid: Grid = ".O...\n..O..\nOOO..\n.....\n".parse().unwrap();
        let frame = Renderer::new('#', '.').render(&grid);

        assert_snapshot!(frame, @r"
        .#...
        ..#..
        ###..
        .....
        ---
        ");
    }

    #[test]
    fn default_glyphs() {
        let grid = Grid::from_cells(1, 3, &[(0, 1)]).unwrap();
        let frame = Renderer::default().render(&grid);

        assert_eq!(frame, " ● \n---\n");
    }

    #[test]
    fn write_to_matches_render() {
        let grid = Grid::from_cells(2, 2, &[(1, 0)]).unwrap();
        let renderer = Renderer::new('x', '-');

        let mut out = Vec::new();
        renderer.write_to(&mut out, &grid).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "--\nx-\n---\n");
    }
}
