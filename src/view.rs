pub mod components;
pub mod ui;

pub use ui::ui;
