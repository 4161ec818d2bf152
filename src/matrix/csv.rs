//! Minimal CSV record reader for rating matrices
//!
//! Handles quoted fields with doubled quotes, LF/CRLF line ends, a leading
//! UTF-8 BOM and blank lines. A quote opens a quoted field only as the
//! field's first character; anywhere else it is kept literally.

use crate::error::{SociogramError, SociogramResult};

/// Split CSV text into records of fields
pub(crate) fn parse_records(input: &str) -> SociogramResult<Vec<Vec<String>>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(SociogramError::malformed(format!(
            "unterminated quoted field at line {}",
            line
        )));
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    // Blank lines carry no cells
    records.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_records() {
        let records = parse_records(",A,B\nA,,3\nB,-1,\n").unwrap();
        assert_eq!(
            records,
            vec![
                vec!["", "A", "B"],
                vec!["A", "", "3"],
                vec!["B", "-1", ""],
            ]
        );
    }

    #[test]
    fn test_quotes_crlf_and_bom() {
        let records = parse_records("\u{feff}id,\"Lin, Xing\"\r\n\"Lin, Xing\",\"say \"\"hi\"\"\"\r\n\r\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["id", "Lin, Xing"]);
        assert_eq!(records[1], vec!["Lin, Xing", "say \"hi\""]);
    }

    #[test]
    fn test_quote_opens_only_at_field_start() {
        // A quote after leading whitespace is literal, so the comma splits
        let records = parse_records("a, \"b,c\"\n").unwrap();
        assert_eq!(records[0], vec!["a", " \"b", "c\""]);

        let records = parse_records("a,\"b,c\"\n").unwrap();
        assert_eq!(records[0], vec!["a", "b,c"]);
    }

    #[test]
    fn test_missing_final_newline() {
        let records = parse_records("x,y\n1,2").unwrap();
        assert_eq!(records[1], vec!["1", "2"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(matches!(
            parse_records("a,\"b\n"),
            Err(SociogramError::MalformedMatrix { .. })
        ));
    }
}
