pub mod browser;

pub use browser::open_url;
