pub mod category;
pub mod lead;
pub mod status;

pub use category::*;
pub use lead::*;
pub use status::*;
