pub mod bridge;
pub mod view_state;
