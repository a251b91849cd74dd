pub mod align;
pub mod cli;
pub mod commands;
pub mod utils;
