//! Ground-truth measurement: one cell per character.

use liquidtype_axes::AxisSet;

use crate::{TextMeasurer, TextStyle, normalize_text};

/// One rendered character cell.
///
/// Each cell lays out as its own box, so its width is the glyph advance
/// snapped up to a whole device pixel. The sum over a run can therefore
/// exceed the continuous-run width by up to one pixel per character, which
/// is the discrepancy the fit engine's safety pass reconciles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharCell {
    ch: char,
    width: f32,
    x: f32,
}

impl CharCell {
    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Left edge relative to the run origin.
    pub fn x(&self) -> f32 {
        self.x
    }
}

/// The per-character cell grid for one text value.
///
/// Owns the cells for the lifetime of one text value; changing the text
/// destroys and recreates them. Applying axis values fully overwrites the
/// previous style and re-measures every cell, so no stale state leaks
/// between unrelated passes.
#[derive(Debug, Clone)]
pub struct CharRun<M: TextMeasurer> {
    measurer: M,
    font_size_px: f32,
    axes: AxisSet,
    origin: (f32, f32),
    cells: Vec<CharCell>,
}

impl<M: TextMeasurer> CharRun<M> {
    pub fn new(measurer: M, text: &str, font_size_px: f32) -> Self {
        let mut run = Self {
            measurer,
            font_size_px,
            axes: AxisSet::new(),
            origin: (0.0, 0.0),
            cells: Vec::new(),
        };
        run.set_text(text);
        run
    }

    /// Destroys the current cells and rebuilds them for `text`.
    pub fn set_text(&mut self, text: &str) {
        self.cells = normalize_text(text)
            .chars()
            .map(|ch| CharCell { ch, width: 0.0, x: 0.0 })
            .collect();
        self.remeasure();
    }

    /// Applies a new axis snapshot to every cell and re-measures.
    pub fn apply_axes(&mut self, axes: &AxisSet) {
        self.axes = axes.clone();
        self.remeasure();
    }

    pub fn set_font_size(&mut self, font_size_px: f32) {
        self.font_size_px = font_size_px;
        self.remeasure();
    }

    /// Restores pristine state: no axis values applied.
    pub fn clear(&mut self) {
        self.axes = AxisSet::new();
        self.remeasure();
    }

    /// Top-left corner of the run in host coordinates, used to place cell
    /// centers in the same space as pointer input.
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    fn remeasure(&mut self) {
        let mut x = 0.0;
        let mut buf = [0u8; 4];
        for cell in &mut self.cells {
            let text = cell.ch.encode_utf8(&mut buf);
            let style = TextStyle { font_size_px: self.font_size_px, axes: &self.axes };
            // Snap each cell box up to a whole device pixel.
            cell.width = self.measurer.measure(text, style).ceil();
            cell.x = x;
            x += cell.width;
        }
    }

    /// Summed cell widths: the authoritative rendered width.
    pub fn total_width(&self) -> f32 {
        self.cells.iter().map(|cell| cell.width).sum()
    }

    /// Center of cell `index` in host coordinates, re-read after every
    /// re-measure since layout may shift.
    pub fn cell_center(&self, index: usize) -> Option<(f32, f32)> {
        self.cells.get(index).map(|cell| {
            (
                self.origin.0 + cell.x + cell.width / 2.0,
                self.origin.1 + self.font_size_px / 2.0,
            )
        })
    }

    pub fn cells(&self) -> &[CharCell] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.ch).collect()
    }

    pub fn font_size(&self) -> f32 {
        self.font_size_px
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }
}

#[cfg(test)]
mod tests {
    use liquidtype_axes::tags;

    use super::*;

    /// Fixed-width model: every character is `per_char * wdth / 100` wide,
    /// with a fractional remainder so cell snapping diverges from the
    /// continuous sum.
    #[derive(Debug, Clone)]
    struct GridMeasurer {
        per_char: f32,
    }

    impl TextMeasurer for GridMeasurer {
        fn measure(&self, text: &str, style: TextStyle<'_>) -> f32 {
            let wdth = style.axes.get(tags::WDTH).unwrap_or(100.0);
            text.chars().count() as f32 * self.per_char * wdth / 100.0
        }
    }

    fn run() -> CharRun<GridMeasurer> {
        CharRun::new(GridMeasurer { per_char: 10.4 }, "Hello World", 48.0)
    }

    #[test]
    fn one_cell_per_character() {
        let run = run();
        assert_eq!(run.len(), 11);
        assert_eq!(run.cells()[5].ch(), '\u{a0}');
    }

    #[test]
    fn cell_sum_never_undershoots_continuous_width() {
        let run = run();
        let axes = AxisSet::new();
        let continuous = run
            .measurer()
            .measure(&run.text(), TextStyle { font_size_px: 48.0, axes: &axes });
        assert!(run.total_width() >= continuous);
        // 10.4 snaps to 11 per cell.
        assert_eq!(run.total_width(), 11.0 * 11.0);
    }

    #[test]
    fn apply_axes_remeasures_cells() {
        let mut run = run();
        let wide = run.total_width();
        run.apply_axes(&AxisSet::new().with(tags::WDTH, 50.0));
        assert!(run.total_width() < wide);
        assert_eq!(run.axes().get(tags::WDTH), Some(50.0));
    }

    #[test]
    fn apply_axes_overwrites_previous_style() {
        let mut run = run();
        run.apply_axes(&AxisSet::new().with(tags::WDTH, 50.0));
        run.apply_axes(&AxisSet::new().with(tags::GRAD, 80.0));
        // The second snapshot fully replaces the first.
        assert_eq!(run.axes().get(tags::WDTH), None);
    }

    #[test]
    fn clear_restores_pristine_state() {
        let mut run = run();
        let pristine = run.total_width();
        run.apply_axes(&AxisSet::new().with(tags::WDTH, 50.0));
        run.clear();
        assert!(run.axes().is_empty());
        assert_eq!(run.total_width(), pristine);
    }

    #[test]
    fn cells_tile_left_to_right() {
        let run = run();
        let cells = run.cells();
        for pair in cells.windows(2) {
            assert_eq!(pair[1].x(), pair[0].x() + pair[0].width());
        }
    }

    #[test]
    fn centers_track_origin() {
        let mut run = run();
        let (x0, _) = run.cell_center(0).unwrap();
        run.set_origin(100.0, 20.0);
        let (x1, y1) = run.cell_center(0).unwrap();
        assert_eq!(x1, x0 + 100.0);
        assert_eq!(y1, 20.0 + 24.0);
    }

    #[test]
    fn set_text_rebuilds_cells() {
        let mut run = run();
        run.apply_axes(&AxisSet::new().with(tags::WDTH, 50.0));
        run.set_text("Hi");
        assert_eq!(run.len(), 2);
        // Axis state survives a text change; only the cells are rebuilt.
        assert_eq!(run.axes().get(tags::WDTH), Some(50.0));
    }

    #[test]
    fn empty_text_is_empty_run() {
        let run = CharRun::new(GridMeasurer { per_char: 10.0 }, "", 48.0);
        assert!(run.is_empty());
        assert_eq!(run.total_width(), 0.0);
    }
}
