// veche-client/src/utils/validation.rs
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 8;

lazy_static::lazy_static! {
    static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref DIGIT: Regex = Regex::new(r"\d").unwrap();
    static ref SPECIAL: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
}

// Returns the first rule the address breaks
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let value = email.trim();
    if value.is_empty() {
        return Err("Enter your email.");
    }
    if !value.contains('@') {
        return Err("Email must contain @");
    }

    let mut parts = value.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() {
        return Err("Email must have characters before @");
    }
    if domain.is_empty() {
        return Err("Email must have a domain after @");
    }
    if domain.contains(' ') {
        return Err("Email cannot contain spaces");
    }
    if !domain.contains('.') {
        return Err("Domain must contain a dot (e.g., example.com)");
    }

    let tld = domain.rsplit('.').next().unwrap_or_default();
    if tld.chars().count() < 2 {
        return Err("Top-level domain must be at least 2 characters");
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    pub length: usize,
    pub has_upper: bool,
    pub has_number: bool,
    pub has_special: bool,
}

impl PasswordCheck {
    pub fn new(password: &str) -> Self {
        Self {
            length: password.chars().count(),
            has_upper: UPPERCASE.is_match(password),
            has_number: DIGIT.is_match(password),
            has_special: SPECIAL.is_match(password),
        }
    }

    // Characters still missing to reach the minimum length
    pub fn remaining(&self) -> usize {
        MIN_PASSWORD_LEN.saturating_sub(self.length)
    }

    pub fn is_valid(&self) -> bool {
        self.remaining() == 0 && self.has_upper && self.has_number && self.has_special
    }
}
