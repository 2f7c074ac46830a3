pub mod adjust;
pub mod log;
pub mod status;
pub mod verify;
