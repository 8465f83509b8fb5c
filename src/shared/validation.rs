use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for canonical region IDs: ASCII digits only, no separators
    /// - Valid: "32", "3273", "3273010001"
    /// - Invalid: "32.73", "32 73", "", "３２" (full-width digits)
    pub static ref DIGITS_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}
