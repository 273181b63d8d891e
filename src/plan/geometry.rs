//! `CutPlan::geometry()` alternate path (spec §4.4 step 4, SPEC_FULL.md §4
//! [SUPPLEMENT]). Grounded on `meerk40t/core/cutplan.py::geometry`: for
//! devices that consume naked geometry rather than cutcode, flatten every
//! cut/engrave op's cuts into one tagged stream carrying a settings index
//! per segment rather than a full `CutCode` tree.

use crate::cut::CutNode;
use crate::geom::Point;
use crate::plan::CutPlan;

/// One flattened segment: its endpoints and the index into `GeomStream`'s
/// settings table that produced it.
#[derive(Debug, Clone)]
pub struct GeomSegment {
    pub start: Point,
    pub end: Point,
    pub settings_index: usize,
}

/// The flattened output of `CutPlan::geometry()`: a tagged segment stream
/// plus the distinct settings each `settings_index` refers back to.
#[derive(Debug, Clone, Default)]
pub struct GeomStream {
    pub segments: Vec<GeomSegment>,
}

fn is_cut_or_engrave(original_op: Option<&str>) -> bool {
    matches!(original_op, Some("op cut") | Some("op engrave"))
}

/// Flatten every `op cut`/`op engrave` cutcode currently in the plan into
/// one `GeomStream`, assigning each distinct settings value its own index
/// (shared by every segment produced from the same settings).
pub fn geometry(plan: &CutPlan) -> GeomStream {
    let mut settings_index: Vec<Option<crate::settings::Settings>> = Vec::new();
    let mut segments = Vec::new();

    for code in plan.cutcodes() {
        if !is_cut_or_engrave(code.group.common.original_op.as_deref()) {
            continue;
        }
        let settings = code.group.common.settings.clone();
        let idx = match settings_index.iter().position(|s| match (s, &settings) {
            (Some(a), Some(b)) => crate::settings::settings_same_op(a, b),
            (None, None) => true,
            _ => false,
        }) {
            Some(i) => i,
            None => {
                settings_index.push(settings.clone());
                settings_index.len() - 1
            }
        };
        for node in flatten(&code.group.children) {
            if let (Some(start), Some(end)) = (node.start(), node.end()) {
                segments.push(GeomSegment { start, end, settings_index: idx });
            }
        }
    }
    GeomStream { segments }
}

fn flatten(children: &[CutNode]) -> Vec<&CutNode> {
    let mut out = Vec::new();
    for child in children {
        match child {
            CutNode::Group(g) => out.extend(g.iter_flat()),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanConfig;
    use crate::cut::{CutCode, LineCut};
    use crate::plan::PlanItem;

    #[test]
    fn only_cut_and_engrave_ops_are_flattened() {
        let mut plan = CutPlan::new("job", PlanConfig::default());
        let mut cut_code = CutCode::new(vec![CutNode::Line(LineCut::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0)))]);
        cut_code.group.common.original_op = Some("op cut".into());
        let mut raster_code = CutCode::new(vec![CutNode::Line(LineCut::new(Point::new(5.0, 5.0), Point::new(6.0, 5.0)))]);
        raster_code.group.common.original_op = Some("op raster".into());
        plan.plan.push(PlanItem::Cut(cut_code));
        plan.plan.push(PlanItem::Cut(raster_code));

        let stream = geometry(&plan);
        assert_eq!(stream.segments.len(), 1);
        assert_eq!(stream.segments[0].start, Point::new(0.0, 0.0));
    }
}
