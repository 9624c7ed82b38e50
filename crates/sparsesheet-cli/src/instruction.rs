//! Parsing of interpreter instructions.
//!
//! A line is split on whitespace. The first token names the instruction
//! (case-sensitive), the rest are its arguments. Rows are letter labels
//! (`A` is row 0, `AA` is row 26, any case) and columns are 1-based
//! numbers; both are converted to the 0-based indices the sheet uses.
//! Column 0 or below becomes a negative index and is left for the sheet or
//! the macro constructor to reject.

use sparsesheet_core::row_from_label;

use crate::error::CliError;

pub const ASSIGN_VALUE_USAGE: &str = "assign-value ROW COL VALUE";
pub const PRINT_VALUE_USAGE: &str = "print-value ROW COL";
pub const BULK_ASSIGN_USAGE: &str = "bulk-assign-value FROM_ROW FROM_COL TO_ROW TO_COL VALUE";
pub const RANGE_ASSIGN_USAGE: &str =
    "range-assign FROM_ROW FROM_COL TO_ROW TO_COL START_VALUE INCREMENT";
pub const AVERAGE_USAGE: &str = "average FROM_ROW FROM_COL TO_ROW TO_COL DEST_ROW DEST_COL";

/// Menu lines, in display order
pub const MENU: &[&str] = &[
    "Supported user instructions are:",
    "  assign-value ROW COL VALUE (set a cell to a value)",
    "  print-value ROW COL (print the value at the given location)",
    "  bulk-assign-value FROM_ROW FROM_COL TO_ROW TO_COL VALUE (set a range of cells to a value)",
    "  range-assign FROM_ROW FROM_COL TO_ROW TO_COL START_VALUE INCREMENT (set a range of cells with incrementing values)",
    "  average FROM_ROW FROM_COL TO_ROW TO_COL DEST_ROW DEST_COL (compute average of cells)",
    "  menu (show this menu)",
    "  q or quit (exit the program)",
];

/// A parsed instruction with 0-based coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    AssignValue {
        row: i64,
        col: i64,
        value: f64,
    },
    PrintValue {
        row: i64,
        col: i64,
    },
    BulkAssign {
        from_row: i64,
        from_col: i64,
        to_row: i64,
        to_col: i64,
        value: f64,
    },
    RangeAssign {
        from_row: i64,
        from_col: i64,
        to_row: i64,
        to_col: i64,
        start_value: f64,
        increment: f64,
    },
    Average {
        from_row: i64,
        from_col: i64,
        to_row: i64,
        to_col: i64,
        dest_row: i64,
        dest_col: i64,
    },
    Menu,
    Quit,
}

impl Instruction {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CliError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let instruction = match name {
            "assign-value" => {
                expect_args("assign-value", ASSIGN_VALUE_USAGE, args, 3)?;
                Instruction::AssignValue {
                    row: parse_row(args[0])?,
                    col: parse_col(args[1])?,
                    value: parse_value(args[2])?,
                }
            }
            "print-value" => {
                expect_args("print-value", PRINT_VALUE_USAGE, args, 2)?;
                Instruction::PrintValue {
                    row: parse_row(args[0])?,
                    col: parse_col(args[1])?,
                }
            }
            "bulk-assign-value" => {
                expect_args("bulk-assign-value", BULK_ASSIGN_USAGE, args, 5)?;
                Instruction::BulkAssign {
                    from_row: parse_row(args[0])?,
                    from_col: parse_col(args[1])?,
                    to_row: parse_row(args[2])?,
                    to_col: parse_col(args[3])?,
                    value: parse_value(args[4])?,
                }
            }
            "range-assign" => {
                expect_args("range-assign", RANGE_ASSIGN_USAGE, args, 6)?;
                Instruction::RangeAssign {
                    from_row: parse_row(args[0])?,
                    from_col: parse_col(args[1])?,
                    to_row: parse_row(args[2])?,
                    to_col: parse_col(args[3])?,
                    start_value: parse_value(args[4])?,
                    increment: parse_value(args[5])?,
                }
            }
            "average" => {
                expect_args("average", AVERAGE_USAGE, args, 6)?;
                Instruction::Average {
                    from_row: parse_row(args[0])?,
                    from_col: parse_col(args[1])?,
                    to_row: parse_row(args[2])?,
                    to_col: parse_col(args[3])?,
                    dest_row: parse_row(args[4])?,
                    dest_col: parse_col(args[5])?,
                }
            }
            "menu" => {
                expect_args("menu", "menu", args, 0)?;
                Instruction::Menu
            }
            "q" | "quit" => {
                expect_args("quit", "q or quit", args, 0)?;
                Instruction::Quit
            }
            other => return Err(CliError::UnknownInstruction(other.to_string())),
        };

        Ok(Some(instruction))
    }
}

fn expect_args(
    instruction: &'static str,
    usage: &'static str,
    args: &[&str],
    count: usize,
) -> Result<(), CliError> {
    if args.len() == count {
        Ok(())
    } else {
        Err(CliError::WrongArity { instruction, usage })
    }
}

fn parse_row(token: &str) -> Result<i64, CliError> {
    row_from_label(token)
        .map(i64::from)
        .ok_or_else(|| CliError::InvalidRow(token.to_string()))
}

fn parse_col(token: &str) -> Result<i64, CliError> {
    token
        .parse::<i64>()
        .ok()
        .and_then(|col| col.checked_sub(1))
        .ok_or_else(|| CliError::InvalidNumber(token.to_string()))
}

fn parse_value(token: &str) -> Result<f64, CliError> {
    token
        .parse::<f64>()
        .map_err(|_| CliError::InvalidNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Instruction::parse("").unwrap(), None);
        assert_eq!(Instruction::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn test_assign_value_converts_coordinates() {
        let parsed = Instruction::parse("assign-value AD 26 3.5").unwrap();
        assert_eq!(
            parsed,
            Some(Instruction::AssignValue {
                row: 29,
                col: 25,
                value: 3.5
            })
        );
    }

    #[test]
    fn test_row_labels_are_case_insensitive() {
        let upper = Instruction::parse("print-value AB 1").unwrap();
        let lower = Instruction::parse("print-value ab 1").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, Some(Instruction::PrintValue { row: 27, col: 0 }));
    }

    #[test]
    fn test_macro_instructions() {
        assert_eq!(
            Instruction::parse("bulk-assign-value A 1 B 3 42.5").unwrap(),
            Some(Instruction::BulkAssign {
                from_row: 0,
                from_col: 0,
                to_row: 1,
                to_col: 2,
                value: 42.5
            })
        );
        assert_eq!(
            Instruction::parse("range-assign A 1 A 5 10 5").unwrap(),
            Some(Instruction::RangeAssign {
                from_row: 0,
                from_col: 0,
                to_row: 0,
                to_col: 4,
                start_value: 10.0,
                increment: 5.0
            })
        );
        assert_eq!(
            Instruction::parse("average B 2 C 3 D 4").unwrap(),
            Some(Instruction::Average {
                from_row: 1,
                from_col: 1,
                to_row: 2,
                to_col: 2,
                dest_row: 3,
                dest_col: 3
            })
        );
    }

    #[test]
    fn test_non_positive_column_passes_through_negative() {
        let parsed = Instruction::parse("print-value A 0").unwrap();
        assert_eq!(parsed, Some(Instruction::PrintValue { row: 0, col: -1 }));
    }

    #[test]
    fn test_quit_and_menu() {
        assert_eq!(Instruction::parse("q").unwrap(), Some(Instruction::Quit));
        assert_eq!(Instruction::parse("quit").unwrap(), Some(Instruction::Quit));
        assert_eq!(Instruction::parse("menu").unwrap(), Some(Instruction::Menu));
    }

    #[test]
    fn test_quit_and_menu_take_no_arguments() {
        assert!(matches!(
            Instruction::parse("quit now").unwrap_err(),
            CliError::WrongArity {
                instruction: "quit",
                ..
            }
        ));
        assert!(matches!(
            Instruction::parse("q 1").unwrap_err(),
            CliError::WrongArity {
                instruction: "quit",
                ..
            }
        ));
        assert!(matches!(
            Instruction::parse("menu foo").unwrap_err(),
            CliError::WrongArity {
                instruction: "menu",
                ..
            }
        ));
    }

    #[test]
    fn test_instruction_names_are_case_sensitive() {
        let err = Instruction::parse("ASSIGN-VALUE A 1 2").unwrap_err();
        assert!(matches!(err, CliError::UnknownInstruction(name) if name == "ASSIGN-VALUE"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(
            Instruction::parse("assign-value A 1").unwrap_err(),
            CliError::WrongArity {
                instruction: "assign-value",
                ..
            }
        ));
        assert!(matches!(
            Instruction::parse("assign-value 1 1 1").unwrap_err(),
            CliError::InvalidRow(_)
        ));
        assert!(matches!(
            Instruction::parse("assign-value A x 1").unwrap_err(),
            CliError::InvalidNumber(_)
        ));
        assert!(matches!(
            Instruction::parse("assign-value A 1 ten").unwrap_err(),
            CliError::InvalidNumber(_)
        ));
    }
}
