//! Optional 2-opt refinement pass over an already travel-ordered sequence
//! (spec §4.6, §7). Grounded on `meerk40t/core/cutplan.py::short_travel_cutcode`'s
//! post-NN 2-opt sweep: repeatedly try reversing a contiguous run of the
//! tour and keep the reversal only if it shortens total travel.

use crate::cut::CutNode;
use crate::float_types::Real;

/// Minimum improvement (in device units) required to accept a reversal;
/// guards against churning on floating-point noise.
const MIN_IMPROVEMENT: Real = 1e-10;

/// Run up to `max_passes` full sweeps of 2-opt over `order`, reversing
/// segments in place. Returns the number of accepted improvements. A
/// sequence shorter than 4 elements is left untouched — there is no
/// non-trivial 2-opt move on it.
pub fn two_opt_refine(order: &mut [CutNode], max_passes: u32) -> u32 {
    if order.len() < 4 {
        return 0;
    }
    let mut accepted = 0;
    for _ in 0..max_passes {
        let mut improved_this_pass = false;
        let n = order.len();
        for i in 0..n - 1 {
            for j in i + 2..n {
                // Skip the wrap-around pair (open path, not a cycle).
                if i == 0 && j == n - 1 {
                    continue;
                }
                let delta = reversal_delta(order, i, j);
                if delta < -MIN_IMPROVEMENT {
                    order[i + 1..=j].reverse();
                    for node in &mut order[i + 1..=j] {
                        if node.reversible() {
                            node.reverse();
                        }
                    }
                    accepted += 1;
                    improved_this_pass = true;
                }
            }
        }
        if !improved_this_pass {
            break;
        }
    }
    accepted
}

/// Travel-length delta if the run `order[i+1..=j]` were reversed: removes
/// the two edges `(i, i+1)` and `(j, j+1)`, adds `(i, j)` and `(i+1, j+1)`.
fn reversal_delta(order: &[CutNode], i: usize, j: usize) -> Real {
    let n = order.len();
    let a_end = match order[i].end() {
        Some(p) => p,
        None => return 0.0,
    };
    let b_start = match order[i + 1].start() {
        Some(p) => p,
        None => return 0.0,
    };
    let b_end = match order[j].end() {
        Some(p) => p,
        None => return 0.0,
    };
    let old = a_end.distance(&b_start)
        + if j + 1 < n {
            let c_start = order[j + 1].start().unwrap_or(b_end);
            b_end.distance(&c_start)
        } else {
            0.0
        };
    let new = a_end.distance(&b_end)
        + if j + 1 < n {
            let c_start = order[j + 1].start().unwrap_or(b_start);
            b_start.distance(&c_start)
        } else {
            0.0
        };
    new - old
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cut::LineCut;
    use crate::geom::Point;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> CutNode {
        CutNode::Line(LineCut::new(Point::new(x0, y0), Point::new(x1, y1)))
    }

    #[test]
    fn short_orders_are_left_untouched() {
        let mut order = vec![line(0.0, 0.0, 1.0, 0.0), line(2.0, 0.0, 3.0, 0.0)];
        assert_eq!(two_opt_refine(&mut order, 50), 0);
    }

    #[test]
    fn crossing_path_gets_uncrossed() {
        // A classic crossing: visiting in order 0,2,1,3 crosses; 2-opt
        // should find the uncrossed tour is shorter and fix it.
        let mut order = vec![
            line(0.0, 0.0, 0.0, 0.0),
            line(10.0, 10.0, 10.0, 10.0),
            line(10.0, 0.0, 10.0, 0.0),
            line(0.0, 10.0, 0.0, 10.0),
        ];
        let before: Real = (0..order.len() - 1)
            .map(|i| order[i].end().unwrap().distance(&order[i + 1].start().unwrap()))
            .sum();
        two_opt_refine(&mut order, 50);
        let after: Real = (0..order.len() - 1)
            .map(|i| order[i].end().unwrap().distance(&order[i + 1].start().unwrap()))
            .sum();
        assert!(after <= before);
    }
}
