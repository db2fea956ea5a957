//! Row lookup for table-style lists
//!
//! A [`TableLayout`] describes a vertically scrolling list of sections: its
//! frame origin in window coordinates, its width, how far it is scrolled,
//! and the heights of each section's header, rows and footer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionLayout {
    #[serde(default)]
    pub header_height: f64,
    pub row_heights: Vec<f64>,
    #[serde(default)]
    pub footer_height: f64,
}

impl SectionLayout {
    /// Section with `rows` rows of equal height and no header or footer.
    pub fn uniform(rows: usize, row_height: f64) -> Self {
        Self {
            header_height: 0.0,
            row_heights: vec![row_height; rows],
            footer_height: 0.0,
        }
    }

    pub fn height(&self) -> f64 {
        self.header_height + self.row_heights.iter().sum::<f64>() + self.footer_height
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableLayout {
    /// Frame origin in window coordinates.
    pub origin: Point,
    pub width: f64,
    /// Vertical scroll position of the content.
    pub content_offset_y: f64,
    pub sections: Vec<SectionLayout>,
}

impl TableLayout {
    pub fn content_height(&self) -> f64 {
        self.sections.iter().map(SectionLayout::height).sum()
    }

    /// Converts a window point into the table's content coordinates.
    pub fn convert_from_window(&self, point: Point) -> Point {
        Point {
            x: point.x - self.origin.x,
            y: point.y - self.origin.y + self.content_offset_y,
        }
    }
}

/// Row containing `point`, given in content coordinates.
///
/// Headers, footers and anything outside the table's width or content
/// height have no row.
pub fn index_path_for_point(table: &TableLayout, point: Point) -> Option<IndexPath> {
    if !(0.0..table.width).contains(&point.x) || point.y < 0.0 {
        return None;
    }

    let mut top = 0.0;
    for (section, layout) in table.sections.iter().enumerate() {
        if point.y >= top + layout.height() {
            top += layout.height();
            continue;
        }

        let mut row_top = top + layout.header_height;
        for (row, height) in layout.row_heights.iter().enumerate() {
            if (row_top..row_top + height).contains(&point.y) {
                return Some(IndexPath { section, row });
            }
            row_top += height;
        }
        return None;
    }
    None
}

/// Row of the cell holding a view whose origin is `view_origin` in window
/// coordinates.
///
/// ```
/// use helpful_extensions::table::{
///     IndexPath, Point, SectionLayout, TableLayout, index_path_for_view,
/// };
///
/// let table = TableLayout {
///     origin: Point::new(0.0, 64.0),
///     width: 320.0,
///     content_offset_y: 0.0,
///     sections: vec![SectionLayout::uniform(10, 44.0)],
/// };
/// let button_origin = Point::new(280.0, 64.0 + 44.0 * 2.0 + 10.0);
/// assert_eq!(index_path_for_view(&table, button_origin), Some(IndexPath::new(0, 2)));
/// ```
pub fn index_path_for_view(table: &TableLayout, view_origin: Point) -> Option<IndexPath> {
    index_path_for_point(table, table.convert_from_window(view_origin))
}
