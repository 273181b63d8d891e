//! Leaf cut primitives: line, quadratic/cubic Bezier, raw pixel list,
//! dwell, and raster. Grounded on `meerk40t/core/cutcode/{linecut,quadcut,
//! cubiccut,rawcut,setorigincut}.py`.

pub mod cubic_cut;
pub mod dwell_cut;
pub mod line_cut;
pub mod quad_cut;
pub mod raster_cut;
pub mod raw_cut;
