pub mod compositor;
pub(crate) mod raster;
pub mod surface;
