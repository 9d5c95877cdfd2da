pub mod app;
pub mod plot_view;
pub mod table_window;
pub mod themes;

pub use app::ClipPlotApp;
