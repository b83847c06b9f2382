use crate::{
    error::{parse_body, required, ReportError},
    portal::{Portal, PortalResponse, RequestContext},
};
use serde_json::Value;
use tracing::warn;

/// What the portal says about a student today. Errors are carried separately as `ReportError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AlreadyReported,
    NotReportedOffCampus,
    NotReportedOnCampus,
}

pub fn check_status(
    portal: &dyn Portal,
    url: &str,
    ctx: &RequestContext,
) -> Result<Status, ReportError> {
    let resp = portal.get(url, ctx).map_err(|err| {
        warn!(credential = %ctx.credential.fingerprint(), "status request failed: {err:#}");
        ReportError::Network(format!("{err:#}"))
    })?;
    classify_status(&resp)
}

/// Maps a status-check response onto a `Status`.
///
/// Order matters: a non-zero `appliedTimes` wins over whatever `schoolStatus` says.
pub fn classify_status(resp: &PortalResponse) -> Result<Status, ReportError> {
    if resp.status != 200 {
        return Err(ReportError::Network(format!("HTTP {}", resp.status)));
    }

    let body = parse_body(&resp.body)?;
    let data = match body.get("data") {
        None | Some(Value::Null) => return Err(ReportError::InvalidCredential),
        Some(d) if d.is_object() => d,
        Some(_) => return Err(ReportError::ServerFieldInvalid("data")),
    };

    if int_field(data, "appliedTimes")? != 0 {
        return Ok(Status::AlreadyReported);
    }

    match int_field(data, "schoolStatus")? {
        0 => Ok(Status::NotReportedOffCampus),
        1 => Ok(Status::NotReportedOnCampus),
        other => Err(ReportError::UnknownSchoolStatus(other)),
    }
}

fn int_field(data: &Value, name: &'static str) -> Result<i64, ReportError> {
    required(data, name)?
        .as_i64()
        .ok_or(ReportError::ServerFieldInvalid(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(body: &str) -> Result<Status, ReportError> {
        classify_status(&PortalResponse::ok_json(body))
    }

    #[test]
    fn non_200_is_network() {
        let resp = PortalResponse {
            status: 502,
            body: br#"{"data":{"appliedTimes":1}}"#.to_vec(),
        };
        assert!(matches!(classify_status(&resp), Err(ReportError::Network(_))));
    }

    #[test]
    fn null_or_absent_data_is_invalid_credential() {
        assert_eq!(classify(r#"{"data":null}"#), Err(ReportError::InvalidCredential));
        assert_eq!(classify(r#"{}"#), Err(ReportError::InvalidCredential));
    }

    #[test]
    fn missing_applied_times() {
        assert_eq!(
            classify(r#"{"data":{"schoolStatus":1}}"#),
            Err(ReportError::ServerFieldMissing("appliedTimes"))
        );
    }

    #[test]
    fn applied_times_wins_over_school_status() {
        for body in [
            r#"{"data":{"appliedTimes":1}}"#,
            r#"{"data":{"appliedTimes":2,"schoolStatus":7}}"#,
            r#"{"data":{"appliedTimes":3,"schoolStatus":null}}"#,
        ] {
            assert_eq!(classify(body), Ok(Status::AlreadyReported), "{body}");
        }
    }

    #[test]
    fn school_status_branches() {
        assert_eq!(
            classify(r#"{"data":{"appliedTimes":0}}"#),
            Err(ReportError::ServerFieldMissing("schoolStatus"))
        );
        assert_eq!(
            classify(r#"{"data":{"appliedTimes":0,"schoolStatus":0}}"#),
            Ok(Status::NotReportedOffCampus)
        );
        assert_eq!(
            classify(r#"{"data":{"appliedTimes":0,"schoolStatus":1}}"#),
            Ok(Status::NotReportedOnCampus)
        );
        assert_eq!(
            classify(r#"{"data":{"appliedTimes":0,"schoolStatus":5}}"#),
            Err(ReportError::UnknownSchoolStatus(5))
        );
    }

    #[test]
    fn garbage_body_is_server_problem() {
        assert_eq!(
            classify("<html>maintenance</html>"),
            Err(ReportError::MalformedBody)
        );
    }

    #[test]
    fn wrongly_typed_fields_are_named() {
        assert_eq!(
            classify(r#"{"data":{"appliedTimes":"0","schoolStatus":1}}"#),
            Err(ReportError::ServerFieldInvalid("appliedTimes"))
        );
        assert_eq!(
            classify(r#"{"data":{"appliedTimes":0,"schoolStatus":"1"}}"#),
            Err(ReportError::ServerFieldInvalid("schoolStatus"))
        );
        assert_eq!(
            classify(r#"{"data":"expired"}"#),
            Err(ReportError::ServerFieldInvalid("data"))
        );

        let msg = classify(r#"{"data":{"appliedTimes":"0"}}"#)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("`appliedTimes`"), "{msg}");
        assert!(!msg.contains("`data`"), "{msg}");
    }
}
