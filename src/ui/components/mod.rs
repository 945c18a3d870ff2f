pub mod player;
pub mod status;
