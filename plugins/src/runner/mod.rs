pub mod process;

pub use process::ProcessLauncher;
