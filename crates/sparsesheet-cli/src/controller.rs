use std::io::{BufRead, Write};

use sparsesheet_core::Sheet;
use sparsesheet_macros::{AverageMacro, BulkAssignMacro, MacroSheet, RangeAssignMacro, SheetMacro};

use crate::config::Config;
use crate::error::CliError;
use crate::instruction::{Instruction, MENU};

pub const WELCOME: &str = "Welcome to the spreadsheet program!";
pub const FAREWELL: &str = "Thank you for using this program!";

/// Interactive text front end over a macro-capable sheet.
///
/// Reads one instruction per line from `input` and writes prompts, results
/// and error messages to `output`. Rejected instructions are reported and the
/// session continues; only I/O failures end it early.
pub struct Controller<S: Sheet, R: BufRead, W: Write> {
    sheet: MacroSheet<S>,
    input: R,
    output: W,
    prompt: String,
    show_menu: bool,
}

impl<S: Sheet, R: BufRead, W: Write> Controller<S, R, W> {
    pub fn new(sheet: MacroSheet<S>, input: R, output: W, config: &Config) -> Self {
        Self {
            sheet,
            input,
            output,
            prompt: config.prompt.clone(),
            show_menu: config.show_menu,
        }
    }

    /// Process instructions until `quit` or end of input
    pub fn run(&mut self) -> Result<(), CliError> {
        tracing::info!("session started");
        writeln!(self.output, "{}", WELCOME)?;
        if self.show_menu {
            self.print_menu()?;
        }

        let mut line = String::new();
        loop {
            write!(self.output, "{}", self.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                // End the dangling prompt line
                writeln!(self.output)?;
                break;
            }

            let result = match Instruction::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Instruction::Quit)) => break,
                Ok(Some(instruction)) => {
                    tracing::debug!(?instruction, "parsed instruction");
                    self.execute(instruction)
                }
                Err(err) => Err(err),
            };

            match result {
                Ok(()) => {}
                Err(err) if err.is_recoverable() => self.report(&err)?,
                Err(err) => return Err(err),
            }
        }

        writeln!(self.output, "{}", FAREWELL)?;
        self.output.flush()?;
        tracing::info!("session ended");
        Ok(())
    }

    /// Tear down the controller, returning its sheet
    pub fn into_sheet(self) -> MacroSheet<S> {
        self.sheet
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), CliError> {
        match instruction {
            Instruction::AssignValue { row, col, value } => {
                self.sheet.set(row, col, value)?;
                writeln!(self.output, "Setting cell ({},{}) to {:.1}", row, col, value)?;
            }
            Instruction::PrintValue { row, col } => {
                let value = self.sheet.get(row, col)?;
                writeln!(self.output, "Value: {:.1}", value)?;
            }
            Instruction::BulkAssign {
                from_row,
                from_col,
                to_row,
                to_col,
                value,
            } => {
                let bulk = BulkAssignMacro::new(from_row, from_col, to_row, to_col, value)?;
                self.sheet.execute_macro(&bulk)?;
                writeln!(
                    self.output,
                    "Setting cells from {} to {:.1}",
                    bulk.range(),
                    bulk.value()
                )?;
            }
            Instruction::RangeAssign {
                from_row,
                from_col,
                to_row,
                to_col,
                start_value,
                increment,
            } => {
                let sequence = RangeAssignMacro::new(
                    from_row,
                    from_col,
                    to_row,
                    to_col,
                    start_value,
                    increment,
                )?;
                self.sheet.execute_macro(&sequence)?;
                writeln!(
                    self.output,
                    "Setting cells from {} starting at {:.1} with increment {:.1}",
                    sequence.range(),
                    sequence.start_value(),
                    sequence.increment()
                )?;
            }
            Instruction::Average {
                from_row,
                from_col,
                to_row,
                to_col,
                dest_row,
                dest_col,
            } => {
                let average =
                    AverageMacro::new(from_row, from_col, to_row, to_col, dest_row, dest_col)?;
                self.sheet.execute_macro(&average)?;
                let dest = average.dest();
                writeln!(
                    self.output,
                    "Computing average of cells from {} and storing in ({},{})",
                    average.range(),
                    dest.row,
                    dest.col
                )?;
            }
            Instruction::Menu => self.print_menu()?,
            // Handled by the read loop
            Instruction::Quit => {}
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<(), CliError> {
        for line in MENU {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &CliError) -> Result<(), CliError> {
        tracing::warn!(error = %err, "instruction rejected");
        match err {
            CliError::UnknownInstruction(_) => writeln!(self.output, "{}", err)?,
            _ => writeln!(self.output, "Error: {}", err)?,
        }
        Ok(())
    }
}
