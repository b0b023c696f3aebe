//! Display formatting for validated values.

/// Format a phone number for display.
///
/// Eleven digits become `(AA) NNNNN-NNNN`, ten become `(AA) NNNN-NNNN`.
/// Anything else is returned unchanged.
pub fn format_phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mobile() {
        assert_eq!(format_phone("11999999999"), "(11) 99999-9999");
        assert_eq!(format_phone("11 9 9999 9999"), "(11) 99999-9999");
    }

    #[test]
    fn test_format_landline() {
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn test_other_lengths_unchanged() {
        assert_eq!(format_phone("+55 11 99999-9999"), "+55 11 99999-9999");
        assert_eq!(format_phone("123"), "123");
    }
}
