#![forbid(unsafe_code)]

mod data;
mod ids;
mod render;
mod tags;
mod types;

pub use data::*;
pub use ids::*;
pub use render::*;
pub use tags::*;
pub use types::*;
