use itertools::{Itertools, MinMaxResult};

/// One scanline of a window table: the left and right x-coordinates of two
/// windows, `[a, b, c, d]`.
pub type WindowRow = [u8; 4];

#[derive(Debug)]
pub struct WindowTable {
    pub declared_height: u8,
    pub rows: Vec<WindowRow>,
}

#[derive(Debug)]
pub struct Geometry {
    pub min_value: u8,
    pub max_value: u8,
    pub width: usize,
}

impl Geometry {
    pub fn of(rows: &[WindowRow]) -> Geometry {
        // A located table always carries at least one row.
        let (min_value, max_value) = match rows.iter().flatten().copied().minmax() {
            MinMaxResult::MinMax(lo, hi) => (lo, hi),
            MinMaxResult::OneElement(v) => (v, v),
            MinMaxResult::NoElements => (0, 0),
        };

        Geometry {
            min_value,
            max_value,
            width: (max_value - min_value) as usize + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Filled,
}

#[derive(Debug)]
pub struct RenderedRow {
    pub cells: Vec<Cell>,
    /// Column of the shared boundary, present only when the row's two
    /// windows were merged into one span.
    pub seam: Option<usize>,
}

impl RenderedRow {
    pub fn to_line(&self, blank: char, filled: char) -> String {
        self.cells
            .iter()
            .map(|&c| if c == Cell::Filled { filled } else { blank })
            .collect()
    }
}

#[derive(Debug)]
pub struct Canvas {
    pub width: usize,
    pub rows: Vec<RenderedRow>,
}

impl Canvas {
    pub fn to_text(&self, blank: char, filled: char) -> String {
        self.rows.iter().map(|r| r.to_line(blank, filled)).join("\n")
    }
}

pub fn render(table: &WindowTable, invert: bool) -> Canvas {
    let geometry = Geometry::of(&table.rows);

    let mut ordered = table.rows.clone();
    // The source stores the bottom row first.
    if invert {
        ordered.reverse();
    }

    let rows = ordered
        .into_iter()
        .map(|row| render_row(row, &geometry))
        .collect();

    Canvas {
        width: geometry.width,
        rows,
    }
}

fn render_row(row: WindowRow, geometry: &Geometry) -> RenderedRow {
    let [a, b, c, d] = row;
    let min = geometry.min_value;

    let mut cells = vec![Cell::Blank; geometry.width];
    let mut seam = None;

    if a == b && b == c && c == d {
        // No window on this line, leave it blank.
    } else if b == c {
        // The two windows touch, paint them as one continuous span.
        fill(&mut cells, (a - min) as usize, (d - min) as usize);
        seam = Some((b - min) as usize);
    } else {
        fill(&mut cells, (a - min) as usize, (b - min) as usize);
        fill(&mut cells, (c - min) as usize, (d - min) as usize);
    }

    RenderedRow { cells, seam }
}

fn fill(cells: &mut [Cell], start: usize, end: usize) {
    for x in start..=end {
        cells[x] = Cell::Filled;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn table(rows: Vec<WindowRow>) -> WindowTable {
        WindowTable {
            declared_height: rows.len() as u8,
            rows,
        }
    }

    #[test]
    fn geometry_spans_all_coordinates() {
        let geometry = Geometry::of(&[[0x10, 0x20, 0x20, 0x30], [0x08, 0x18, 0x28, 0x38]]);

        assert_eq!(geometry.min_value, 0x08);
        assert_eq!(geometry.max_value, 0x38);
        assert_eq!(geometry.width, 0x31);
    }

    #[test]
    fn uniform_row_stays_blank() {
        let canvas = render(&table(vec![[0x80, 0x80, 0x80, 0x80], [0x7E, 0x80, 0x80, 0x82]]), false);

        assert_eq!(canvas.rows[0].to_line('.', 'X'), ".....");
        assert_eq!(canvas.rows[0].seam, None);
    }

    #[test]
    fn merged_span_covers_full_width() {
        let canvas = render(&table(vec![[0x00, 0x03, 0x03, 0x07]]), false);

        assert_eq!(canvas.rows[0].to_line('.', 'X'), "XXXXXXXX");
        assert_eq!(canvas.rows[0].seam, Some(3));
    }

    #[test]
    fn merged_span_keeps_margins() {
        // Width comes from a wider row, leaving margins on both sides.
        let canvas = render(
            &table(vec![[0x00, 0x09, 0x09, 0x09], [0x02, 0x04, 0x04, 0x07]]),
            false,
        );

        assert_eq!(canvas.rows[1].to_line('.', 'X'), "..XXXXXX..");
        assert_eq!(canvas.rows[1].seam, Some(4));
    }

    #[test]
    fn merged_span_touching_one_edge() {
        let rows = vec![[0x00, 0x02, 0x02, 0x05], [0x04, 0x07, 0x07, 0x09], [0x00, 0x00, 0x09, 0x09]];
        let canvas = render(&table(rows), false);

        assert_eq!(canvas.rows[0].to_line('.', 'X'), "XXXXXX....");
        assert_eq!(canvas.rows[1].to_line('.', 'X'), "....XXXXXX");
    }

    #[test]
    fn disjoint_spans_leave_a_gap() {
        let canvas = render(&table(vec![[0x02, 0x04, 0x07, 0x09]]), false);
        let line = canvas.rows[0].to_line('.', 'X');

        // b-a+1 filled, c-b-1 blank, d-c+1 filled.
        assert_eq!(line, "XXX..XXX");
        assert_eq!(canvas.rows[0].seam, None);
    }

    #[test]
    fn disjoint_spans_at_both_edges() {
        let canvas = render(&table(vec![[0x00, 0x00, 0x07, 0x07]]), false);

        assert_eq!(canvas.rows[0].to_line('.', 'X'), "X......X");
    }

    #[test]
    fn interior_disjoint_spans_keep_margins() {
        let rows = vec![[0x00, 0x00, 0x0B, 0x0B], [0x02, 0x04, 0x07, 0x09]];
        let canvas = render(&table(rows), false);

        assert_eq!(canvas.rows[1].to_line('.', 'X'), "..XXX..XXX..");
    }

    #[test]
    fn rows_flip_vertically_by_default() {
        let rows = vec![[0x00, 0x01, 0x01, 0x03], [0x00, 0x00, 0x03, 0x03]];

        let inverted = render(&table(rows.clone()), true);
        assert_eq!(inverted.rows[0].to_line('.', 'X'), "X..X");
        assert_eq!(inverted.rows[1].to_line('.', 'X'), "XXXX");

        let plain = render(&table(rows), false);
        assert_eq!(plain.rows[0].to_line('.', 'X'), "XXXX");
        assert_eq!(plain.rows[1].to_line('.', 'X'), "X..X");
    }

    #[test]
    fn seam_at_column_zero_is_recorded() {
        let canvas = render(&table(vec![[0x10, 0x10, 0x10, 0x15]]), false);

        assert_eq!(canvas.rows[0].seam, Some(0));
    }

    #[test]
    fn text_output_is_newline_joined_without_trailing_newline() {
        let rows = vec![[0x00, 0x03, 0x03, 0x07], [0x00, 0x00, 0x07, 0x07]];
        let canvas = render(&table(rows), false);
        let text = canvas.to_text('.', 'X');

        assert_eq!(text, "XXXXXXXX\nX......X");
        // height * (width + 1) - 1 bytes once the rows are joined.
        assert_eq!(text.len(), 2 * (8 + 1) - 1);
    }
}
