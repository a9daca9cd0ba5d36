mod dependency;
mod item;
mod raw;
mod resolution;
mod roadmap;

pub use dependency::*;
pub use item::*;
pub use raw::*;
pub use resolution::*;
pub use roadmap::*;
