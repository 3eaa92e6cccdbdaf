pub mod game;
pub mod potion;
