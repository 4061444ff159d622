//! Constants shared by every scheme

pub mod hash;
pub mod limits;
