//! Zingl quadratic Bezier plotter (spec §4.2). Ported from the classic
//! Zingl-Pfeifer `plotQuadBezierSeg`/`plotQuadBezier` algorithm as carried
//! in `original_source/ZinglPlotter.py`: integer Bresenham-style stepping
//! driven by second-order error differences, valid only for a single
//! monotone segment (`plot_quad_bezier_seg`), with `plot_quad_bezier`
//! splitting an arbitrary quadratic into up to three such segments at its
//! horizontal/vertical gradient-sign changes.

use super::line::plot_line;
use super::PlotStep;

/// Plot a quadratic Bezier segment whose control point does not change the
/// sign of the gradient in either axis (a precondition the caller —
/// [`plot_quad_bezier`] — establishes by splitting at gradient changes).
pub fn plot_quad_bezier_seg(x0: i64, y0: i64, x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<PlotStep> {
    let (mut x0, mut y0) = (x0, y0);
    let (mut x2, mut y2) = (x2, y2);

    let mut sx = (x2 - x1) as f64;
    let mut sy = (y2 - y1) as f64;
    let mut xx = (x0 - x1) as f64;
    let mut yy = (y0 - y1) as f64;
    let mut cur = xx * sy - yy * sx;

    debug_assert!(xx * sx <= 0.0 && yy * sy <= 0.0, "gradient sign must not change");

    let mut buffered: Option<Vec<PlotStep>> = None;
    if sx * sx + sy * sy > xx * xx + yy * yy {
        // Begin with the shorter leg; buffer it so we can emit in path order.
        x2 = x0;
        x0 = sx as i64 + x1;
        y2 = y0;
        y0 = sy as i64 + y1;
        cur = -cur;
        buffered = Some(Vec::new());
    }

    let mut out = Vec::new();
    let push = |out: &mut Vec<PlotStep>, buffered: &mut Option<Vec<PlotStep>>, x: i64, y: i64| {
        match buffered {
            Some(buf) => buf.push((x, y, true)),
            None => out.push((x, y, true)),
        }
    };

    if cur != 0.0 {
        xx += sx;
        sx = if x0 < x2 { 1.0 } else { -1.0 };
        xx *= sx;
        yy += sy;
        sy = if y0 < y2 { 1.0 } else { -1.0 };
        yy *= sy;
        let mut xy = 2.0 * xx * yy;
        xx *= xx;
        yy *= yy;
        if cur * sx * sy < 0.0 {
            xx = -xx;
            yy = -yy;
            xy = -xy;
            cur = -cur;
        }
        let mut dx = 4.0 * sy * cur * (x1 - x0) as f64 + xx - xy;
        let mut dy = 4.0 * sx * cur * (y0 - y1) as f64 + yy - xy;
        xx += xx;
        yy += yy;
        let mut err = dx + dy + xy;
        loop {
            push(&mut out, &mut buffered, x0, y0);
            if x0 == x2 && y0 == y2 {
                if let Some(buf) = buffered.take() {
                    out.extend(buf.into_iter().rev());
                }
                return out;
            }
            let y_substep = 2.0 * err < dx;
            if 2.0 * err > dy {
                x0 += sx as i64;
                dx -= xy;
                dy += yy;
                err += dy;
            }
            if y_substep {
                y0 += sy as i64;
                dy -= xy;
                dx += xx;
                err += dx;
            }
            if !(dy < 0.0 && dx > 0.0) {
                break;
            }
        }
    }

    // Degenerate tail (or fallback when `dy<0 && dx>0` fails): finish with a
    // straight line to the endpoint, per spec §4.2.
    let tail = plot_line(x0, y0, x2, y2);
    match &mut buffered {
        Some(buf) => buf.extend(tail),
        None => out.extend(tail),
    }
    if let Some(buf) = buffered.take() {
        out.extend(buf.into_iter().rev());
    }
    out
}

/// Plot an arbitrary quadratic Bezier by splitting at horizontal/vertical
/// gradient-sign changes into up to three monotone segments, each handled
/// by [`plot_quad_bezier_seg`].
pub fn plot_quad_bezier(x0: i64, y0: i64, x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<PlotStep> {
    let (mut x0, mut y0) = (x0, y0);
    let (mut x1, mut y1) = (x1, y1);
    let (x2_orig, y2_orig) = (x2, y2);
    let mut x2 = x2;
    let mut y2 = y2;

    let mut out = Vec::new();

    let x = (x0 - x1) as f64;
    let y = (y0 - y1) as f64;
    let t = (x0 - 2 * x1 + x2) as f64;

    if t != 0.0 && x * (x2 - x1) as f64 > 0.0 {
        if y * (y2 - y1) as f64 > 0.0 {
            if ((y0 - 2 * y1 + y2) as f64 / t * x).abs() > y.abs() {
                // Swap points so the horizontal cut comes first.
                x0 = x2_orig;
                x2 = (x + x1 as f64) as i64;
                y0 = y2_orig;
                y2 = (y + y1 as f64) as i64;
            }
        }
        let tt = (x0 - x1) as f64 / t;
        let r = (1.0 - tt) * ((1.0 - tt) * y0 as f64 + 2.0 * tt * y1 as f64) + tt * tt * y2 as f64;
        let tt = (x0 * x2 - x1 * x1) as f64 * tt / (x0 - x1) as f64;
        let x_new = (tt + 0.5).floor() as i64;
        let y_new = (r + 0.5).floor() as i64;
        let r2 = (y1 - y0) as f64 * (tt - x0 as f64) / (x1 - x0) as f64 + y0 as f64;
        out.extend(plot_quad_bezier_seg(x0, y0, x_new, (r2 + 0.5).floor() as i64, x_new, y_new));
        let r3 = (y1 - y2) as f64 * (tt - x2 as f64) / (x1 - x2) as f64 + y2 as f64;
        x0 = x_new;
        x1 = x_new;
        y0 = y_new;
        y1 = (r3 + 0.5).floor() as i64;
    }

    if (y0 - y1) as f64 * (y2 - y1) as f64 > 0.0 {
        let t = (y0 - 2 * y1 + y2) as f64;
        let tt = (y0 - y1) as f64 / t;
        let r = (1.0 - tt) * ((1.0 - tt) * x0 as f64 + 2.0 * tt * x1 as f64) + tt * tt * x2 as f64;
        let tt = (y0 * y2 - y1 * y1) as f64 * tt / (y0 - y1) as f64;
        let x_new = (r + 0.5).floor() as i64;
        let y_new = (tt + 0.5).floor() as i64;
        let r2 = (x1 - x0) as f64 * (tt - y0 as f64) / (y1 - y0) as f64 + x0 as f64;
        out.extend(plot_quad_bezier_seg(x0, y0, (r2 + 0.5).floor() as i64, y_new, x_new, y_new));
        let r3 = (x1 - x2) as f64 * (tt - y2 as f64) / (y1 - y2) as f64 + x2 as f64;
        x0 = x_new;
        x1 = (r3 + 0.5).floor() as i64;
        y0 = y_new;
        y1 = y_new;
    }

    out.extend(plot_quad_bezier_seg(x0, y0, x1, y1, x2, y2));
    out
}
