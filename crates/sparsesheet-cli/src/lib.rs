pub mod config;
pub mod controller;
pub mod error;
pub mod instruction;

use std::io;

use sparsesheet_core::SparseSheet;
use sparsesheet_macros::MacroSheet;

use crate::config::Config;
use crate::controller::Controller;

/// Run an interactive session over stdin/stdout with a fresh sparse sheet
pub fn run_session(config: &Config) -> anyhow::Result<()> {
    let sheet = MacroSheet::new(SparseSheet::new());
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut controller = Controller::new(sheet, stdin.lock(), stdout.lock(), config);
    controller.run()?;

    Ok(())
}
