//! Backend-agnostic path construction.
//!
//! Both backends consume the same rounded command sequences so their visual
//! output matches exactly; coordinates are rounded to 2 decimal places here,
//! once, rather than at each formatting site.

/// One draw command in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// An ordered command sequence describing one road or area ring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl Path {
    /// An open polyline: move to the first point, line to the rest. Empty
    /// when fewer than 2 points are given; a line needs two endpoints.
    pub fn open(points: &[(f64, f64)]) -> Self {
        if points.len() < 2 {
            return Self::default();
        }
        Self {
            commands: Self::trace(points).collect(),
        }
    }

    /// A closed ring: as [`Path::open`] plus a final close command. Empty
    /// when fewer than 3 points are given; a polygon needs three vertices.
    pub fn closed(points: &[(f64, f64)]) -> Self {
        if points.len() < 3 {
            return Self::default();
        }
        Self {
            commands: Self::trace(points)
                .chain(std::iter::once(PathCommand::Close))
                .collect(),
        }
    }

    fn trace(points: &[(f64, f64)]) -> impl Iterator<Item = PathCommand> + '_ {
        points.iter().enumerate().map(|(i, &(x, y))| {
            if i == 0 {
                PathCommand::MoveTo(round2(x), round2(y))
            } else {
                PathCommand::LineTo(round2(x), round2(y))
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Render as an SVG `d` attribute, 2 decimal places per coordinate.
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for command in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            match command {
                PathCommand::MoveTo(x, y) => d.push_str(&format!("M {x:.2} {y:.2}")),
                PathCommand::LineTo(x, y) => d.push_str(&format!("L {x:.2} {y:.2}")),
                PathCommand::Close => d.push('Z'),
            }
        }
        d
    }
}
