mod filter;
mod normalize;
mod session;

pub use filter::*;
pub use normalize::*;
pub use session::*;
