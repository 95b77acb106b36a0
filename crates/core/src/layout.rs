use crate::types::{Monitor, Rect};

/// Policy for subdividing a monitor into window rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Full,
    Vertical,
    Horizontal,
    Grid,
}

impl Layout {
    /// Parse a layout name. Unknown names fall back to `Grid`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "full" => Layout::Full,
            "vertical" => Layout::Vertical,
            "horizontal" => Layout::Horizontal,
            _ => Layout::Grid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Full => "full",
            Layout::Vertical => "vertical",
            Layout::Horizontal => "horizontal",
            Layout::Grid => "grid",
        }
    }

    /// Layout picked automatically for a window count: 1 full, 2 side by side,
    /// anything else a grid.
    pub fn auto(count: usize) -> Self {
        match count {
            0 | 1 => Layout::Full,
            2 => Layout::Vertical,
            _ => Layout::Grid,
        }
    }

    /// Next layout in the cycle full -> vertical -> horizontal -> grid.
    pub fn next(self) -> Self {
        match self {
            Layout::Full => Layout::Vertical,
            Layout::Vertical => Layout::Horizontal,
            Layout::Horizontal => Layout::Grid,
            Layout::Grid => Layout::Full,
        }
    }
}

/// Compute `count` window rectangles on `monitor`.
///
/// `Full` ignores `count` and always returns the whole monitor, except for a
/// count of zero, which yields nothing for every layout. Integer-division
/// remainders are dropped, never redistributed.
pub fn calculate_layout(monitor: &Monitor, count: usize, layout: Layout) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    match layout {
        Layout::Full => vec![monitor.bounds()],
        Layout::Vertical => vertical(monitor, count),
        Layout::Horizontal => horizontal(monitor, count),
        Layout::Grid => grid(monitor, count),
    }
}

/// Smallest (cols, rows) with `cols * rows >= count`, growing cols first
/// while `cols <= rows`.
pub fn grid_dims(count: usize) -> (usize, usize) {
    let (mut cols, mut rows) = (1, 1);
    while cols * rows < count {
        if cols <= rows {
            cols += 1;
        } else {
            rows += 1;
        }
    }
    (cols, rows)
}

fn vertical(mon: &Monitor, count: usize) -> Vec<Rect> {
    let w = mon.width / count as i32;
    (0..count as i32)
        .map(|i| Rect { x: mon.x + i * w, y: mon.y, width: w, height: mon.height })
        .collect()
}

fn horizontal(mon: &Monitor, count: usize) -> Vec<Rect> {
    let h = mon.height / count as i32;
    (0..count as i32)
        .map(|i| Rect { x: mon.x, y: mon.y + i * h, width: mon.width, height: h })
        .collect()
}

fn grid(mon: &Monitor, count: usize) -> Vec<Rect> {
    let (cols, rows) = grid_dims(count);
    let cell_w = mon.width / cols as i32;
    let cell_h = mon.height / rows as i32;
    (0..count)
        .map(|i| {
            let (row, col) = ((i / cols) as i32, (i % cols) as i32);
            Rect {
                x: mon.x + col * cell_w,
                y: mon.y + row * cell_h,
                width: cell_w,
                height: cell_h,
            }
        })
        .collect()
}
