mod assign;
mod calendar;
mod scheduler;
mod title;

pub use assign::*;
pub use calendar::*;
pub use scheduler::*;
pub use title::*;
