pub mod quadlet;

pub use quadlet::*;
