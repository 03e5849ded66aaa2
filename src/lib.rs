pub mod config;
pub mod court;
pub mod export;
pub mod loader;
pub mod palette;
pub mod players;
pub mod season;
pub mod shot;
pub mod state;
pub mod summary;
pub mod teams;
pub mod worker;
pub mod zones;
