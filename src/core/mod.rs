pub mod config;
pub mod constants;
pub mod geo;
pub mod position;
pub mod view_state;
pub mod viewport;
