//! Adaptive quadratic Bezier flattening.
//!
//! Each curve is subdivided by de Casteljau midpoint construction until
//! its control point sits close enough to the chord midpoint, then
//! replaced by straight line segments. Subdivision runs on a bounded
//! explicit stack rather than recursion; real fonts rarely need a depth
//! beyond 4, so a stack of 10 leaves generous headroom while keeping the
//! worst case bounded.

use crate::basics::{midpoint, Point};
use crate::error::Result;
use crate::outline::{Curve, Outline};

/// Flatness threshold in output-pixel units.
const FLATNESS: f64 = 0.5;

/// Maximum number of pending sub-curves per flattened curve.
const STACK_SIZE: usize = 10;

/// A curve is flat when its control point lies within `FLATNESS` of the
/// chord midpoint.
#[inline]
fn is_flat(beg: Point, ctrl: Point, end: Point) -> bool {
    let mid = midpoint(beg, end);
    let dx = ctrl.x - mid.x;
    let dy = ctrl.y - mid.y;
    dx * dx + dy * dy <= FLATNESS * FLATNESS
}

/// Split a curve at `t = 0.5` into two halves sharing the pivot point.
///
/// Appends the three construction midpoints to the outline; the halves
/// reference them by index.
fn split_curve(outline: &mut Outline, curve: Curve) -> Result<(Curve, Curve)> {
    let beg = outline.point(curve.beg);
    let ctrl = outline.point(curve.ctrl);
    let end = outline.point(curve.end);

    let ctrl0 = outline.add_point(midpoint(beg, ctrl))?;
    let ctrl1 = outline.add_point(midpoint(ctrl, end))?;
    let pivot = outline.add_point(midpoint(outline.point(ctrl0), outline.point(ctrl1)))?;

    Ok((
        Curve {
            beg: curve.beg,
            end: pivot,
            ctrl: ctrl0,
        },
        Curve {
            beg: pivot,
            end: curve.end,
            ctrl: ctrl1,
        },
    ))
}

/// Flatten one curve into line segments on the outline.
fn flatten_curve(outline: &mut Outline, curve: Curve) -> Result<()> {
    let mut stack = [curve; STACK_SIZE];
    let mut top = 1usize;
    while top > 0 {
        top -= 1;
        let curve = stack[top];
        let flat = is_flat(
            outline.point(curve.beg),
            outline.point(curve.ctrl),
            outline.point(curve.end),
        );
        if flat || top + 2 > STACK_SIZE {
            outline.add_line(curve.beg, curve.end)?;
        } else {
            let (first, second) = split_curve(outline, curve)?;
            stack[top] = first;
            stack[top + 1] = second;
            top += 2;
        }
    }
    Ok(())
}

/// Replace every curve in the outline with line segments.
pub fn tesselate(outline: &mut Outline) -> Result<()> {
    let curves = std::mem::take(&mut outline.curves);
    for curve in curves {
        flatten_curve(outline, curve)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
