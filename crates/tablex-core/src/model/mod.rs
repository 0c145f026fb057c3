pub mod identity;
pub mod position;

pub use identity::{Group, HasIdentity, HasRevision};
pub use position::Position;
