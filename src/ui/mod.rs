pub mod dashboard;
pub mod render;
pub mod style;

pub use dashboard::DashboardReadout;
pub use render::{MainView, RecordingRenderer, RenderFrame, Renderer};
pub use style::{MapTheme, StyleCatalog, StyleRef, ThemeSelector};
