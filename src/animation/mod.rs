pub mod ease;
pub mod phase;
pub mod pingpong;
pub mod steer;
