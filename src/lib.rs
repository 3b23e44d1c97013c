pub mod config;
pub mod tempo_map;
pub mod time;
pub mod timespan;
