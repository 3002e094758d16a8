/// Format a phone number for display.
/// Normalizes Brazilian numbers to (XX) XXXXX-XXXX or (XX) XXXX-XXXX.
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Drop the country code when present
    let digits = match digits.len() {
        12 | 13 if digits.starts_with("55") => digits[2..].to_string(),
        _ => digits,
    };

    match digits.len() {
        11 => format!("({}) {}-{}", &digits[0..2], &digits[2..7], &digits[7..11]),
        10 => format!("({}) {}-{}", &digits[0..2], &digits[2..6], &digits[6..10]),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Replace every character with `*`, for password fields
pub fn mask(s: &str) -> String {
    "*".repeat(s.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(format_phone("1132654321"), "(11) 3265-4321");
        assert_eq!(format_phone("+55 11 98765-4321"), "(11) 98765-4321");
        assert_eq!(format_phone("123"), "123"); // Too short, return as-is
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Resíduos orgânicos", 9), "Resídu...");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("senha"), "*****");
        assert_eq!(mask(""), "");
    }
}
