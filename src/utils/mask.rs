//! Input masks applied while the user types

fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Mask a phone number as `(xx) xxxxx-xxxx`, ignoring anything past 11 digits
pub fn mask_phone(input: &str) -> String {
    let d = digits(input);
    match d.len() {
        0..=2 => d,
        3..=7 => format!("({}) {}", &d[..2], &d[2..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..d.len().min(11)]),
    }
}

/// Mask a date as `DD/MM/YYYY`, ignoring anything past 8 digits
pub fn mask_date_input(input: &str) -> String {
    let d = digits(input);
    match d.len() {
        0..=2 => d,
        3..=4 => format!("{}/{}", &d[..2], &d[2..]),
        _ => format!("{}/{}/{}", &d[..2], &d[2..4], &d[4..d.len().min(8)]),
    }
}

/// Keep only the digits of a price field
pub fn mask_price(input: &str) -> String {
    digits(input)
}
