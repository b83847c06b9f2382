use crate::util::sha256_hex;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A student's session cookie, e.g. `JSESSIONID=xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// `Debug` is redacted so a credential never lands in a log line by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short stable identifier that is safe to log.
    pub fn fingerprint(&self) -> String {
        sha256_hex(self.0.as_bytes())[..8].to_string()
    }

    pub fn looks_like_session(&self) -> bool {
        session_pattern().is_some_and(|re| re.is_match(&self.0))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.fingerprint())
    }
}

fn session_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^JSESSIONID=[0-9A-Za-z\-]+$").ok())
        .as_ref()
}

/// Splits the joined command-line value. Blank segments are dropped so a trailing
/// delimiter does not produce an extra student.
pub fn parse_credentials(raw: &str, delimiter: &str) -> Vec<Credential> {
    let parts: Vec<&str> = if delimiter.is_empty() {
        vec![raw]
    } else {
        raw.split(delimiter).collect()
    };
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Credential::new)
        .collect()
}
