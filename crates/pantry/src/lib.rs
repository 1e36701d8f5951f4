mod reconcile;
mod shopping;
mod storage;

pub use reconcile::*;
pub use shopping::*;
pub use storage::*;
