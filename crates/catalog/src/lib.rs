mod refresh;
mod view;

pub use refresh::*;
pub use view::*;
