pub mod bridge;
pub mod constants;
pub mod detail;
pub mod driver;
pub mod effects;
pub mod math;
pub mod particle;
pub mod pointer;
pub mod scene;

pub use bridge::*;
pub use detail::*;
pub use driver::*;
pub use effects::*;
pub use particle::*;
pub use pointer::*;
pub use scene::*;
