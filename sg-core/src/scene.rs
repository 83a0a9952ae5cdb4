mod hierarchy;

pub use hierarchy::*;
