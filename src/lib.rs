pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod integrity;
pub mod model;
pub mod ownership;
pub mod pipeline;
pub mod raster;
pub mod render;

pub use config::RenderSettings;
pub use dataset::Atlas;
pub use error::{MapError, Result};
pub use pipeline::{AtlasReport, render_atlas};
pub use render::{FontFace, LabelFace, OverlayStyle, render};
