pub mod message;
pub mod model;
pub mod update;

pub use message::{Command, LoadResult, Message};
pub use model::App;
pub use update::update;
