//! Data model shared by the balancer, the evaluator and the API layer

pub mod player;
pub mod team;

pub use player::{Line, Player, PlayerRecord, Position, Strength};
pub use team::Team;
