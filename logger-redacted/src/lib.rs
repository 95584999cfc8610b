pub mod macros;
pub mod redactor;

pub use redactor::*;

/// Log redaction for the SGC_USB backend
///
/// User records carry institutional e-mail addresses and, in the seeded
/// directory, plaintext passwords. Anything that may end up in a log line
/// (user administration events, upstream error bodies, configuration dumps)
/// goes through [`PiiRedactor`] first.
///
/// # Detected Data Types
///
/// - **Email Addresses**: juan.perez@usalesiana.edu.bo → EMAIL[hash] or j***@u***
/// - **Credentials**: `password=...`, `"api_key": "..."` → `password=[REDACTED]`
/// - **Bearer Tokens**: `Bearer abc.def` → `Bearer [REDACTED]`
/// - **IP Addresses**: 192.168.1.1 → IP[hash] or 192.***.***.1
///
/// # Example
///
/// ```rust
/// use logger_redacted::{redact, PiiRedactor, RedactionConfig};
///
/// let line = redact("login failed for ana.lopez@usalesiana.edu.bo password=user123");
/// assert!(!line.contains("ana.lopez"));
/// assert!(!line.contains("user123"));
///
/// let masked = PiiRedactor::new(RedactionConfig {
///     hash_for_correlation: false,
///     ..Default::default()
/// })
/// .redact("contact ana.lopez@usalesiana.edu.bo");
/// assert!(masked.contains("a***@u***"));
/// ```
pub fn redact(text: &str) -> String {
    DEFAULT_REDACTOR.redact(text)
}

lazy_static::lazy_static! {
    static ref DEFAULT_REDACTOR: PiiRedactor = PiiRedactor::new(RedactionConfig::default());
}
