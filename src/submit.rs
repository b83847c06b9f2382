use crate::{
    error::{parse_body, required, ReportError},
    portal::{Portal, PortalResponse, RequestContext},
};
use std::collections::BTreeMap;
use tracing::warn;

pub fn submit(
    portal: &dyn Portal,
    url: &str,
    form: &BTreeMap<String, String>,
    ctx: &RequestContext,
) -> Result<(), ReportError> {
    let resp = portal.post_form(url, ctx, form).map_err(|err| {
        warn!(credential = %ctx.credential.fingerprint(), "submission failed: {err:#}");
        ReportError::Network(format!("{err:#}"))
    })?;
    classify_submission(&resp)
}

pub fn classify_submission(resp: &PortalResponse) -> Result<(), ReportError> {
    if resp.status != 200 {
        return Err(ReportError::Network(format!("HTTP {}", resp.status)));
    }

    let body = parse_body(&resp.body)?;
    match required(&body, "status")?.as_bool() {
        Some(true) => Ok(()),
        Some(false) => Err(ReportError::SubmissionRejected),
        None => Err(ReportError::ServerFieldInvalid("status")),
    }
}
