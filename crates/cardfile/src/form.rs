//! Interactive confirmation of extracted card fields.

use std::io::{self, BufRead, Write};

use crate::card::CardFields;

/// Ask the user to confirm or edit each field.
///
/// Each prompt shows the current value in brackets. An empty answer, or end
/// of input, keeps it; anything else is trimmed and replaces it.
///
/// # Errors
///
/// Returns an error if reading from `input` or writing to `output` fails.
pub fn confirm_fields<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    defaults: CardFields,
) -> io::Result<CardFields> {
    let company = prompt(&mut input, &mut output, "Company", defaults.company)?;
    let person_name = prompt(&mut input, &mut output, "Name", defaults.person_name)?;
    let role = prompt(&mut input, &mut output, "Role", defaults.role)?;

    Ok(CardFields {
        company,
        person_name,
        role,
    })
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: String,
) -> io::Result<String> {
    write!(output, "{label} [{default}]: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(default);
    }

    let answer = line.trim();
    if answer.is_empty() {
        Ok(default)
    } else {
        Ok(answer.to_string())
    }
}
