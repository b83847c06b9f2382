use thiserror::Error;

/// Why a single student's report did not go through.
///
/// `Display` is the line shown to the operator; every variant counts as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("failed: network problem ({0}).")]
    Network(String),
    #[error(
        "failed: the cookie is most likely wrong. It should look like JSESSIONID=xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
    )]
    InvalidCredential,
    #[error("failed: most likely a problem on the school's side (missing `{0}`).")]
    ServerFieldMissing(&'static str),
    #[error("failed: most likely a problem on the school's side (unexpected value for `{0}`).")]
    ServerFieldInvalid(&'static str),
    #[error("failed: most likely a problem on the school's side (response is not JSON).")]
    MalformedBody,
    #[error("failed: unknown school status {0}.")]
    UnknownSchoolStatus(i64),
    #[error("failed: data was uploaded but not accepted, please check manually.")]
    SubmissionRejected,
}

impl ReportError {
    pub fn kind(&self) -> &'static str {
        match self {
            ReportError::Network(_) => "network",
            ReportError::InvalidCredential => "invalid_credential",
            ReportError::ServerFieldMissing(_) => "server_field_missing",
            ReportError::ServerFieldInvalid(_) => "server_field_invalid",
            ReportError::MalformedBody => "malformed_body",
            ReportError::UnknownSchoolStatus(_) => "unknown_school_status",
            ReportError::SubmissionRejected => "submission_rejected",
        }
    }
}

/// Parses a portal body, which must be JSON.
pub(crate) fn parse_body(body: &[u8]) -> Result<serde_json::Value, ReportError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!("unparsable portal body: {err}");
        ReportError::MalformedBody
    })
}

/// Reads a field that must be present and non-null.
pub(crate) fn required<'a>(
    obj: &'a serde_json::Value,
    name: &'static str,
) -> Result<&'a serde_json::Value, ReportError> {
    match obj.get(name) {
        None | Some(serde_json::Value::Null) => Err(ReportError::ServerFieldMissing(name)),
        Some(v) => Ok(v),
    }
}
