use regex::Regex;
use std::sync::OnceLock;

/// Keys on the dialer keypad
pub const KEYPAD: [char; 12] = ['1', '2', '3', '4', '5', '6', '7', '8', '9', '*', '0', '#'];

/// Typed dialer input may contain digits, `*`, `#`, `+`, `-` and whitespace.
pub fn is_valid_dial_input(input: &str) -> bool {
    static DIAL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = DIAL_REGEX.get_or_init(|| Regex::new(r"^[0-9*#+\-\s]*$").expect("Invalid dial regex"));
    re.is_match(input)
}

pub fn is_keypad_key(key: char) -> bool {
    KEYPAD.contains(&key)
}

/// Strip a stored phone number down to dialable characters
pub fn normalize_phone(phone: &str) -> String {
    static STRIP_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = STRIP_REGEX.get_or_init(|| Regex::new(r"[^0-9+*#]").expect("Invalid phone regex"));
    re.replace_all(phone, "").into_owned()
}
