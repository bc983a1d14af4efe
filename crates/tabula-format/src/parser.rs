use std::io::{BufRead, Write};

use tabula_solver::LinearProgram;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing {0}")]
    MissingCount(&'static str),
    #[error("Invalid count: {0}")]
    InvalidCount(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Parses `n m` followed by `m + 1` rows of `n + 1` integers, all
/// whitespace-delimited, the objective row last.
///
/// Values are split into rows by count only. The objective row may omit its
/// right-hand side; any other short row is left short so the tableau
/// builder can reject it.
pub fn parse_program(source: &str) -> Result<LinearProgram, ParseError> {
    let mut tokens = source.split_whitespace();

    let variable_count = parse_count(tokens.next(), "variable count")?;
    let constraint_count = parse_count(tokens.next(), "constraint count")?;

    let values = tokens.map(parse_number).collect::<Result<Vec<_>, _>>()?;

    let width = variable_count
        .checked_add(1)
        .ok_or_else(|| ParseError::InvalidCount(variable_count.to_string()))?;
    let row_count = constraint_count
        .checked_add(1)
        .ok_or_else(|| ParseError::InvalidCount(constraint_count.to_string()))?;
    let expected = row_count
        .checked_mul(width)
        .ok_or_else(|| ParseError::InvalidCount(constraint_count.to_string()))?;
    if values.len() > expected {
        tracing::warn!(expected, found = values.len(), "ignoring trailing values");
    }

    // Rows past the supplied values would all be empty; one short row is
    // enough for the builder to reject the program.
    let rows = (0..row_count.min(values.len() / width + 1))
        .map(|i| {
            let start = (i * width).min(values.len());
            let end = start.saturating_add(width).min(values.len());
            let mut row = values[start..end].to_vec();
            pad_objective(&mut row, i == constraint_count, variable_count);
            row
        })
        .collect();

    tracing::debug!(variable_count, constraint_count, "parsed program text");
    Ok(LinearProgram::from_rows(variable_count, constraint_count, rows))
}

/// Reads a program by prompting for the counts and then one row per line.
///
/// The objective row may omit its right-hand side.
pub fn read_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut prompts: W,
) -> Result<LinearProgram, ParseError> {
    let variable_count = {
        let line = prompt_line(&mut input, &mut prompts, "Input number of variables:   ")?;
        parse_count(Some(line.trim()), "variable count")?
    };
    let constraint_count = {
        let line = prompt_line(&mut input, &mut prompts, "Input number of constraints: ")?;
        parse_count(Some(line.trim()), "constraint count")?
    };

    writeln!(prompts, "Input the variables of each constraint space delimited").map_err(io_error)?;
    writeln!(prompts, "The last must be the objective function").map_err(io_error)?;
    writeln!(prompts, "Ex 4 1 1 9 means 4x + y + z <= 9").map_err(io_error)?;

    let row_count = constraint_count
        .checked_add(1)
        .ok_or_else(|| ParseError::InvalidCount(constraint_count.to_string()))?;

    let mut rows = Vec::new();
    for i in 0..row_count {
        let line = prompt_line(&mut input, &mut prompts, "Input constraint: ")?;
        let mut row = line
            .split_whitespace()
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;
        pad_objective(&mut row, i == constraint_count, variable_count);
        rows.push(row);
    }

    Ok(LinearProgram::from_rows(variable_count, constraint_count, rows))
}

fn pad_objective(row: &mut Vec<i64>, is_objective: bool, variable_count: usize) {
    if is_objective && row.len() == variable_count {
        row.push(0);
    }
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    prompts: &mut W,
    prompt: &str,
) -> Result<String, ParseError> {
    write!(prompts, "{}", prompt).map_err(io_error)?;
    prompts.flush().map_err(io_error)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(io_error)?;
    if read == 0 {
        return Err(ParseError::UnexpectedEof);
    }
    Ok(line)
}

fn parse_count(token: Option<&str>, what: &'static str) -> Result<usize, ParseError> {
    let token = token.filter(|t| !t.is_empty()).ok_or(ParseError::MissingCount(what))?;
    token
        .parse()
        .map_err(|_| ParseError::InvalidCount(token.to_string()))
}

fn parse_number(token: &str) -> Result<i64, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

fn io_error(e: std::io::Error) -> ParseError {
    ParseError::IoError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_solver::{SolverError, Tableau};

    #[test]
    fn test_parse_flat_program() {
        let program = parse_program("2 3 3 6 40 -1 3 0 1 4 16 100 300").unwrap();

        assert_eq!(program.variable_count, 2);
        assert_eq!(program.constraint_count, 3);
        assert_eq!(program.rows.len(), 4);
        assert_eq!(program.rows[1], vec![-1, 3, 0]);
        assert_eq!(program.rows[3], vec![100, 300, 0]);
    }

    #[test]
    fn test_parse_multiline_program() {
        let program = parse_program("2 1\n1 1 4\n1 1 0\n").unwrap();
        assert_eq!(program.rows, vec![vec![1, 1, 4], vec![1, 1, 0]]);
    }

    #[test]
    fn test_parse_short_program_keeps_short_rows() {
        let program = parse_program("2 2 1 1 4 1 1").unwrap();
        assert_eq!(program.rows, vec![vec![1, 1, 4], vec![1, 1]]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_program(""), Err(ParseError::MissingCount("variable count")));
        assert_eq!(parse_program("2"), Err(ParseError::MissingCount("constraint count")));
        assert_eq!(parse_program("-2 1"), Err(ParseError::InvalidCount("-2".to_string())));
        assert_eq!(parse_program("1 1 x 2 1 0"), Err(ParseError::InvalidNumber("x".to_string())));
    }

    #[test]
    fn test_parse_overflowing_counts() {
        assert_eq!(
            parse_program("18446744073709551615 1 1 2 3"),
            Err(ParseError::InvalidCount("18446744073709551615".to_string()))
        );
        assert_eq!(
            parse_program("1 18446744073709551615 1 2"),
            Err(ParseError::InvalidCount("18446744073709551615".to_string()))
        );
        assert_eq!(
            parse_program("2 9223372036854775807 1 2 3"),
            Err(ParseError::InvalidCount("9223372036854775807".to_string()))
        );
    }

    #[test]
    fn test_parse_oversized_count_stops_at_values() {
        let program = parse_program("1 100000000000 1 2").unwrap();

        assert_eq!(program.constraint_count, 100_000_000_000);
        assert_eq!(program.rows, vec![vec![1, 2], vec![]]);
        assert!(matches!(
            Tableau::build(&program),
            Err(SolverError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_read_interactive() {
        let input = b"2\n1\n1 1 4\n1 1\n";
        let mut prompts = Vec::new();
        let program = read_interactive(&input[..], &mut prompts).unwrap();

        assert_eq!(program.rows, vec![vec![1, 1, 4], vec![1, 1, 0]]);
        let shown = String::from_utf8(prompts).unwrap();
        assert!(shown.starts_with("Input number of variables:   "));
        assert_eq!(shown.matches("Input constraint: ").count(), 2);
    }

    #[test]
    fn test_read_interactive_overflowing_count() {
        let input = b"1\n18446744073709551615\n";
        let result = read_interactive(&input[..], std::io::sink());
        assert_eq!(
            result,
            Err(ParseError::InvalidCount("18446744073709551615".to_string()))
        );
    }

    #[test]
    fn test_read_interactive_eof() {
        let input = b"2\n1\n1 1 4\n";
        let result = read_interactive(&input[..], std::io::sink());
        assert_eq!(result, Err(ParseError::UnexpectedEof));
    }
}
