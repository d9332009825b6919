pub mod events;
pub mod orchestration;
pub mod state;
