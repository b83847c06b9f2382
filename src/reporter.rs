use crate::{
    config::Config,
    credentials::Credential,
    portal::{Portal, RequestContext},
    status::{self, Status},
    submit,
    tally::{EntryReport, Outcome, RunReport, Tally},
    util::now_rfc3339,
};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, info, warn};

const SEPARATOR_WIDTH: usize = 60;

/// Runs the status check and, when needed, the submission for each student in turn.
///
/// Credentials are handled strictly one after another; each gets its own
/// `RequestContext`, so nothing about one student's headers leaks into the next.
pub struct Reporter<P: Portal> {
    cfg: Config,
    portal: P,
}

impl<P: Portal> Reporter<P> {
    pub fn new(cfg: &Config, portal: P) -> Self {
        Self {
            cfg: cfg.clone(),
            portal,
        }
    }

    pub fn portal(&self) -> &P {
        &self.portal
    }

    /// Processes every credential and writes the human-readable progress to `out`.
    ///
    /// Never aborts: per-student failures are counted, and a broken `out` only loses text.
    pub fn run(&self, credentials: &[Credential], out: &mut dyn Write) -> RunReport {
        let started = now_rfc3339();
        let mut tally = Tally::default();
        let mut entries = Vec::with_capacity(credentials.len());
        let mut out = Console::new(out);

        out.line(format_args!("{}", "-".repeat(SEPARATOR_WIDTH)));
        for (i, credential) in credentials.iter().enumerate() {
            let index = i + 1;
            out.partial(format_args!("Reporting for student {index}... "));

            let outcome = self.process(credential);
            tally.record(&outcome);
            info!(
                index,
                credential = %credential.fingerprint(),
                outcome = outcome.kind(),
                "student processed"
            );
            out.line(format_args!("{}", outcome.message()));

            entries.push(EntryReport {
                index,
                fingerprint: credential.fingerprint(),
                outcome: outcome.kind().to_string(),
                message: outcome.message(),
            });
        }
        out.line(format_args!("{}", "-".repeat(SEPARATOR_WIDTH)));
        out.line(format_args!("{}", tally.summary_line()));

        RunReport {
            started,
            finished: now_rfc3339(),
            tally,
            entries,
        }
    }

    /// One student: status lookup, then the submission that status calls for.
    pub fn process(&self, credential: &Credential) -> Outcome {
        if !credential.looks_like_session() {
            warn!(
                credential = %credential.fingerprint(),
                "credential does not look like JSESSIONID=<id>; trying anyway"
            );
        }
        let ctx = RequestContext::new(&self.cfg.http, credential);

        let status = match status::check_status(&self.portal, &self.cfg.portal.status_url, &ctx) {
            Ok(s) => s,
            Err(err) => return Outcome::Failed(err),
        };
        debug!(credential = %credential.fingerprint(), ?status, "status checked");

        match status {
            Status::AlreadyReported => Outcome::AlreadyReported,
            Status::NotReportedOnCampus => {
                let form = self.cfg.payload.on_campus.form_fields();
                self.submit(&self.cfg.portal.on_campus_url, &form, &ctx)
            }
            Status::NotReportedOffCampus => {
                if self.cfg.portal.off_campus_url.is_empty() {
                    warn!(
                        credential = %credential.fingerprint(),
                        "off-campus endpoint is not configured; nothing submitted"
                    );
                    return Outcome::OffCampusUnconfigured;
                }
                self.submit(
                    &self.cfg.portal.off_campus_url,
                    &self.cfg.payload.off_campus,
                    &ctx,
                )
            }
        }
    }

    fn submit(
        &self,
        url: &str,
        form: &BTreeMap<String, String>,
        ctx: &RequestContext,
    ) -> Outcome {
        match submit::submit(&self.portal, url, form, ctx) {
            Ok(()) => Outcome::Submitted,
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// Operator-facing output. The first write error is logged and later text is dropped.
struct Console<'a> {
    out: &'a mut dyn Write,
    broken: bool,
}

impl<'a> Console<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, broken: false }
    }

    fn partial(&mut self, args: fmt::Arguments<'_>) {
        self.emit(|w| {
            w.write_fmt(args)?;
            w.flush()
        });
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        self.emit(|w| {
            w.write_fmt(args)?;
            w.write_all(b"\n")
        });
    }

    fn emit(&mut self, f: impl FnOnce(&mut dyn Write) -> io::Result<()>) {
        if self.broken {
            return;
        }
        if let Err(err) = f(&mut *self.out) {
            warn!("output stream failed, continuing without progress output: {err}");
            self.broken = true;
        }
    }
}
