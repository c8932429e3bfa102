use std::io::{self, BufRead};

use anyhow::{bail, Context};
use lookahead_grep::Pattern;

/// Separates the pattern from the subject on the input line.
const SEPARATOR: char = '|';

// Splits an input line into its pattern and subject fields.
fn split_fields(line: &str) -> anyhow::Result<(&str, &str)> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let [pattern, subject] = fields[..] else {
        bail!(
            "please enter a valid input: expected <pattern>{SEPARATOR}<subject>, found {} field(s)",
            fields.len()
        );
    };
    Ok((pattern, subject))
}

// Usage: echo '<pattern>|<subject>' | lookahead-grep
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut input_line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input_line)
        .context("error reading input line")?;
    // A last line without its '\n' is accepted; only an empty stream is an error
    if read == 0 {
        bail!("error reading input line: no input");
    }

    // Trim the line terminator so it does not end up in the subject
    let trimmed = input_line.trim_end_matches('\n');
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);

    let (pattern, subject) = split_fields(trimmed)?;
    let compiled = Pattern::new(pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;

    println!("{}", compiled.is_match(subject));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_the_single_separator() {
        assert_eq!(split_fields("a+|caaat").unwrap(), ("a+", "caaat"));
        assert_eq!(split_fields("|").unwrap(), ("", ""));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(split_fields("abc").is_err());
        assert!(split_fields("a|b|c").is_err());
    }
}
