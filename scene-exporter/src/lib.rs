pub mod renderer;
pub mod viewer;
pub mod wireframe;

pub use renderer::{BoxLabel, ExportError, FrameRenderer, FrameScene};
pub use viewer::RerunRenderer;
pub use wireframe::{EdgeList, BOX_EDGES};
