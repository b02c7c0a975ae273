pub mod game_state;

pub use game_state::GameState;
