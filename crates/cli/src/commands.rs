mod export;
mod run;

pub use export::ExportCommand;
pub use run::RunCommand;
