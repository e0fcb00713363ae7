//! Parser for `name = 0xRRGGBB` color-table entries.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("missing '=' in color entry '{0}'")]
    MissingSeparator(String),
    #[error("invalid name in color entry '{0}'")]
    InvalidName(String),
    #[error("color value must be 0x-prefixed hex in entry '{0}'")]
    InvalidValue(String),
}

/// Parse one entry. Surrounding whitespace and whitespace around `=` are
/// ignored; hex digits are case-insensitive.
pub fn parse_color_entry(line: &str) -> Result<(String, u32), ColorParseError> {
    let entry = line.trim();
    let (name, value) = entry
        .split_once('=')
        .ok_or_else(|| ColorParseError::MissingSeparator(entry.to_owned()))?;

    let name = name.trim_end();
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ColorParseError::InvalidName(entry.to_owned()));
    }

    let digits = value
        .trim_start()
        .strip_prefix("0x")
        .ok_or_else(|| ColorParseError::InvalidValue(entry.to_owned()))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidValue(entry.to_owned()));
    }
    let color = u32::from_str_radix(digits, 16)
        .map_err(|_| ColorParseError::InvalidValue(entry.to_owned()))?;

    Ok((name.to_owned(), color))
}

/// Build the name → color table. Malformed entries are logged and skipped;
/// the rejected entries are returned alongside the table.
pub fn build_color_table(lines: &[String]) -> (HashMap<String, u32>, Vec<ColorParseError>) {
    let mut table = HashMap::new();
    let mut rejected = Vec::new();
    for line in lines {
        match parse_color_entry(line) {
            Ok((name, color)) => {
                table.insert(name, color);
            }
            Err(err) => {
                log::warn!("Skipping ore color entry: {}", err);
                rejected.push(err);
            }
        }
    }
    (table, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_entry() {
        assert_eq!(
            parse_color_entry("oreIron=0xA17951"),
            Ok(("oreIron".to_string(), 0xA17951))
        );
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_case() {
        assert_eq!(
            parse_color_entry("  oreGold \t=  0xf2FF8d  "),
            Ok(("oreGold".to_string(), 0xF2FF8D))
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse_color_entry("oreIron 0xA17951"),
            Err(ColorParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_color_entry("ore Iron = 0xA17951"),
            Err(ColorParseError::InvalidName(_))
        ));
        assert!(matches!(
            parse_color_entry(" = 0xA17951"),
            Err(ColorParseError::InvalidName(_))
        ));
        assert!(matches!(
            parse_color_entry("oreIron = A17951"),
            Err(ColorParseError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_color_entry("oreIron = 0xZZ0000"),
            Err(ColorParseError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_color_entry("oreIron = 0x"),
            Err(ColorParseError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_color_entry("oreIron = 0x123456789"),
            Err(ColorParseError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_build_table_skips_bad_entries() {
        let lines = vec![
            "oreCoal = 0x433E3B".to_string(),
            "garbage".to_string(),
            "oreTin=0xC0D1D8".to_string(),
        ];
        let (table, rejected) = build_color_table(&lines);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("oreCoal"), Some(&0x433E3B));
        assert_eq!(table.get("oreTin"), Some(&0xC0D1D8));
        assert_eq!(rejected.len(), 1);
    }
}
