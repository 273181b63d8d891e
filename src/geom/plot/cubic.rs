//! Zingl cubic Bezier plotter (spec §4.2). Ported from
//! `original_source/ZinglPlotter.py`'s `plotCubicBezierSeg`/`plotCubicBezier`:
//! fifth-degree difference stepping with self-intersection detection for a
//! single monotone arc (`plot_cubic_bezier_seg`), and a top-level
//! `plot_cubic_bezier` that locates up to four curvature sign changes
//! (horizontal/vertical inflection roots of `xb^2 - xa*xc` and its `y`
//! counterpart) and subdivides the parameter axis accordingly.
//!
//! The original's `StopIteration`-as-control-flow idiom (used to bail out
//! of the nested one-pixel sub-stepping loop) is replaced with a labeled
//! `break`, per spec §9's re-architecture note; semantics are unchanged.

use super::line::plot_line;
use super::PlotStep;

/// Plot a cubic Bezier segment constrained to a single monotone arc.
pub fn plot_cubic_bezier_seg(
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    x3: i64,
    y3: i64,
) -> Vec<PlotStep> {
    let (mut x0, mut y0) = (x0, y0);
    let (mut x3, mut y3) = (x3, y3);

    let mut sx: f64 = if x0 < x3 { 1.0 } else { -1.0 };
    let mut sy: f64 = if y0 < y3 { 1.0 } else { -1.0 };

    let xc = -((x0 + x1 - x2 - x3) as f64).abs();
    let mut xa = xc - 4.0 * sx * (x1 - x2) as f64;
    let mut xb = sx * (x0 - x1 - x2 + x3) as f64;
    let yc = -((y0 + y1 - y2 - y3) as f64).abs();
    let mut ya = yc - 4.0 * sy * (y1 - y2) as f64;
    let mut yb = sy * (y0 - y1 - y2 + y3) as f64;

    if xa == 0.0 && ya == 0.0 {
        // Degenerates to a quadratic Bezier through a synthesized midpoint.
        let mx = ((3 * x1 - x0 + 1) as f64 / 2.0).floor() as i64;
        let my = ((3 * y1 - y0 + 1) as f64 / 2.0).floor() as i64;
        return super::quad::plot_quad_bezier_seg(x0, y0, mx, my, x3, y3);
    }

    let mut len1 = ((x1 - x0) * (x1 - x0) + (y1 - y0) * (y1 - y0) + 1) as f64;
    let mut len2 = ((x2 - x3) * (x2 - x3) + (y2 - y3) * (y2 - y3) + 1) as f64;

    let mut out = Vec::new();
    let mut second_leg: Vec<PlotStep> = Vec::new();
    let mut leg = 1u32;

    loop {
        let mut ab = xa * yb - xb * ya;
        let mut ac = xa * yc - xc * ya;
        let bc = xb * yc - xc * yb;
        let mut ex = ab * (ab + ac - 3.0 * bc) + ac * ac;
        let f = if ex > 0.0 {
            1.0
        } else {
            (1.0 + 1024.0 / len1).sqrt().floor()
        };
        ab *= f;
        ac *= f;
        let bc = bc * f;
        ex *= f * f;
        let mut xy = 9.0 * (ab + ac + bc) / 8.0;
        let cb0 = 8.0 * (xa - ya);
        let mut dx = 27.0 * (8.0 * ab * (yb * yb - ya * yc) + ex * (ya + 2.0 * yb + yc)) / 64.0
            - ya * ya * (xy - ya);
        let mut dy = 27.0 * (8.0 * ab * (xb * xb - xa * xc) - ex * (xa + 2.0 * xb + xc)) / 64.0
            - xa * xa * (xy + xa);
        let mut xx = 3.0
            * (3.0 * ab * (3.0 * yb * yb - ya * ya - 2.0 * ya * yc)
                - ya * (3.0 * ac * (ya + yb) + ya * cb0))
            / 4.0;
        let mut yy = 3.0
            * (3.0 * ab * (3.0 * xb * xb - xa * xa - 2.0 * xa * xc)
                - xa * (3.0 * ac * (xa + xb) + xa * cb0))
            / 4.0;
        xy = xa * ya * (6.0 * ab + 6.0 * ac - 3.0 * bc + cb0);
        let mut ac2 = ya * ya;
        let mut cb = xa * xa;
        xy = 3.0 * (xy + 9.0 * f * (cb * yb * yc - xb * xc * ac2) - 18.0 * xb * yb * ab) / 8.0;

        if ex < 0.0 {
            dx = -dx;
            dy = -dy;
            xx = -xx;
            yy = -yy;
            xy = -xy;
            ac2 = -ac2;
            cb = -cb;
        }
        let mut ab = 6.0 * ya * ac2;
        let mut ac = -6.0 * xa * ac2;
        let mut bc = 6.0 * ya * cb;
        let mut cb = -6.0 * xa * cb;
        dx += xy;
        let mut ex = dx + dy;
        dy += xy;

        let mut pxy = 0u8;
        let mut fx = f;
        let mut fy = f;

        'one_pixel: while x0 != x3 && y0 != y3 {
            if leg == 0 {
                second_leg.push((x0, y0, true));
            } else {
                out.push((x0, y0, true));
            }
            loop {
                if pxy == 0 && (dx > xy || dy < xy) {
                    break 'one_pixel;
                }
                if pxy == 1 && (dx > 0.0 || dy < 0.0) {
                    break 'one_pixel;
                }
                let y1_test = 2.0 * ex - dy;
                if 2.0 * ex >= dx {
                    fx -= 1.0;
                    dx += xx;
                    ex += dx;
                    xy += ac;
                    dy += xy;
                    yy += bc;
                    xx += ab;
                } else if y1_test > 0.0 {
                    break 'one_pixel;
                }
                if y1_test <= 0.0 {
                    fy -= 1.0;
                    dy += yy;
                    ex += dy;
                    xy += bc;
                    dx += xy;
                    xx += ac;
                    yy += cb;
                }
                if !(fx > 0.0 && fy > 0.0) {
                    break;
                }
            }
            if 2.0 * fx <= f {
                x0 += sx as i64;
                fx += f;
            }
            if 2.0 * fy <= f {
                y0 += sy as i64;
                fy += f;
            }
            if pxy == 0 && dx < 0.0 && dy > 0.0 {
                pxy = 1;
            }
        }

        // Swap legs: work inward from the other endpoint next.
        std::mem::swap(&mut x0, &mut x3);
        sx = -sx;
        xb = -xb;
        std::mem::swap(&mut y0, &mut y3);
        sy = -sy;
        yb = -yb;
        len1 = len2;
        let _ = (ab, ac, bc, cb, ac2); // silence unused-after-swap warnings on last pass

        if leg == 0 {
            break;
        }
        leg -= 1;
    }

    out.extend(plot_line(x3, y3, x0, y0).into_iter().rev());
    out.extend(second_leg.into_iter().rev());
    out
}

/// Plot an arbitrary cubic Bezier, subdividing at up to four curvature
/// sign changes so each arc handed to [`plot_cubic_bezier_seg`] is monotone.
pub fn plot_cubic_bezier(
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    x3: i64,
    y3: i64,
) -> Vec<PlotStep> {
    let xc = (x0 + x1 - x2 - x3) as f64;
    let xa = xc - 4.0 * (x1 - x2) as f64;
    let xb = (x0 - x1 - x2 + x3) as f64;
    let xd = xb + 4.0 * (x1 + x2) as f64;
    let yc = (y0 + y1 - y2 - y3) as f64;
    let ya = yc - 4.0 * (y1 - y2) as f64;
    let yb = (y0 - y1 - y2 + y3) as f64;
    let yd = yb + 4.0 * (y1 + y2) as f64;

    let mut fx0 = x0 as f64;
    let mut fy0 = y0 as f64;

    let mut t = [0.0f64; 5];
    let mut n = 0usize;

    let t1_x = xb * xb - xa * xc;
    if xa == 0.0 {
        if xc.abs() < 2.0 * xb.abs() {
            t[n] = xc / (2.0 * xb);
            n += 1;
        }
    } else if t1_x > 0.0 {
        let t2 = t1_x.sqrt();
        let r1 = (xb - t2) / xa;
        if r1.abs() < 1.0 {
            t[n] = r1;
            n += 1;
        }
        let r2 = (xb + t2) / xa;
        if r2.abs() < 1.0 {
            t[n] = r2;
            n += 1;
        }
    }

    let t1_y = yb * yb - ya * yc;
    if ya == 0.0 {
        if yc.abs() < 2.0 * yb.abs() {
            t[n] = yc / (2.0 * yb);
            n += 1;
        }
    } else if t1_y > 0.0 {
        let t2 = t1_y.sqrt();
        let r1 = (yb - t2) / ya;
        if r1.abs() < 1.0 {
            t[n] = r1;
            n += 1;
        }
        let r2 = (yb + t2) / ya;
        if r2.abs() < 1.0 {
            t[n] = r2;
            n += 1;
        }
    }

    // Bubble-sort the (at most 4) split parameters.
    let mut i = 1;
    while i < n {
        if t[i - 1] > t[i] {
            t.swap(i - 1, i);
            i = 0;
        }
        i += 1;
    }
    let mut t1 = -1.0f64;
    t[n] = 1.0;

    let (mut x0, mut y0) = (x0, y0);
    let mut out = Vec::new();

    for i in 0..=n {
        let t2 = t[i];
        let mut fx1 =
            (t1 * (t1 * xb - 2.0 * xc) - t2 * (t1 * (t1 * xa - 2.0 * xb) + xc) + xd) / 8.0 - fx0;
        let mut fy1 =
            (t1 * (t1 * yb - 2.0 * yc) - t2 * (t1 * (t1 * ya - 2.0 * yb) + yc) + yd) / 8.0 - fy0;
        let mut fx2 =
            (t2 * (t2 * xb - 2.0 * xc) - t1 * (t2 * (t2 * xa - 2.0 * xb) + xc) + xd) / 8.0 - fx0;
        let mut fy2 =
            (t2 * (t2 * yb - 2.0 * yc) - t1 * (t2 * (t2 * ya - 2.0 * yb) + yc) + yd) / 8.0 - fy0;
        let fx3 = (t2 * (t2 * (3.0 * xb - t2 * xa) - 3.0 * xc) + xd) / 8.0;
        let mut fx0_local = fx0 - fx3;
        let fy3 = (t2 * (t2 * (3.0 * yb - t2 * ya) - 3.0 * yc) + yd) / 8.0;
        let mut fy0_local = fy0 - fy3;

        let x3 = (fx3 + 0.5).floor() as i64;
        let y3 = (fy3 + 0.5).floor() as i64;

        if fx0_local != 0.0 {
            fx0_local = (x0 as f64 - x3 as f64) / fx0_local;
            fx1 *= fx0_local;
            fx2 *= fx0_local;
        }
        if fy0_local != 0.0 {
            fy0_local = (y0 as f64 - y3 as f64) / fy0_local;
            fy1 *= fy0_local;
            fy2 *= fy0_local;
        }

        if x0 != x3 || y0 != y3 {
            out.extend(plot_cubic_bezier_seg(
                x0,
                y0,
                (x0 as f64 + fx1).round() as i64,
                (y0 as f64 + fy1).round() as i64,
                (x0 as f64 + fx2).round() as i64,
                (y0 as f64 + fy2).round() as i64,
                x3,
                y3,
            ));
        }
        x0 = x3;
        y0 = y3;
        fx0 = fx3;
        fy0 = fy3;
        t1 = t2;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = plot_cubic_bezier(0, 0, 5, 20, 15, -20, 20, 0);
        let b = plot_cubic_bezier(0, 0, 5, 20, 15, -20, 20, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn endpoints_present() {
        let steps = plot_cubic_bezier(0, 0, 5, 20, 15, -20, 20, 0);
        assert!(!steps.is_empty());
        assert_eq!(steps.first(), Some(&(0, 0, true)));
        assert_eq!(steps.last(), Some(&(20, 0, true)));
    }

    #[test]
    fn straight_cubic_matches_endpoints() {
        let steps = plot_cubic_bezier(0, 0, 3, 3, 7, 7, 10, 10);
        assert_eq!(steps.first(), Some(&(0, 0, true)));
        assert_eq!(steps.last(), Some(&(10, 10, true)));
    }
}
