pub mod cli;
pub mod indent;
pub mod run;
pub mod tag;
