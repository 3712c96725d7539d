pub mod maintenance;
pub mod status;
pub mod vehicle;

pub use maintenance::*;
pub use status::*;
pub use vehicle::*;
