//! Host-facing pieces: the mounted grid view and the resize notifications
//! that drive it.

pub mod grid;
pub mod resize;
