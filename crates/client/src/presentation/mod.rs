pub mod raster;
pub mod terminal;
pub mod theme;
pub mod ui;
