pub mod ai;
pub mod cli;
pub mod gate;
pub mod indicator;
pub mod prompt;
