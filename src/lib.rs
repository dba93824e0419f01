pub mod api;
pub mod battle;
pub mod board;
pub mod mutate;
pub mod projection;
pub mod round;
pub mod setup;
pub mod types;
pub mod validate;


pub use api::{build_board, execute_round, project_positions, set_ready, submit_order};
pub use types::*;
