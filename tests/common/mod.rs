#![allow(dead_code)]

use anyhow::{anyhow, Result};
use health_reporter::portal::{Portal, PortalResponse, RequestContext};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get {
        url: String,
        cookie: String,
        user_agent: String,
    },
    Post {
        url: String,
        cookie: String,
        form: BTreeMap<String, String>,
    },
}

#[derive(Clone)]
enum Reply {
    Response(PortalResponse),
    TransportError(String),
}

/// In-memory portal answering per cookie and recording every request it sees.
#[derive(Default)]
pub struct ScriptedPortal {
    status: HashMap<String, Reply>,
    submit: HashMap<String, Reply>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedPortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_json(mut self, cookie: &str, body: &str) -> Self {
        self.status
            .insert(cookie.into(), Reply::Response(PortalResponse::ok_json(body)));
        self
    }

    pub fn status_http(mut self, cookie: &str, code: u16) -> Self {
        self.status.insert(
            cookie.into(),
            Reply::Response(PortalResponse {
                status: code,
                body: Vec::new(),
            }),
        );
        self
    }

    pub fn status_unreachable(mut self, cookie: &str) -> Self {
        self.status
            .insert(cookie.into(), Reply::TransportError("connection refused".into()));
        self
    }

    pub fn submit_json(mut self, cookie: &str, body: &str) -> Self {
        self.submit
            .insert(cookie.into(), Reply::Response(PortalResponse::ok_json(body)));
        self
    }

    pub fn submit_unreachable(mut self, cookie: &str) -> Self {
        self.submit
            .insert(cookie.into(), Reply::TransportError("timed out".into()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn posts(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Post { .. }))
            .collect()
    }

    fn answer(table: &HashMap<String, Reply>, cookie: &str) -> Result<PortalResponse> {
        match table.get(cookie) {
            Some(Reply::Response(r)) => Ok(r.clone()),
            Some(Reply::TransportError(msg)) => Err(anyhow!("{msg}")),
            None => Err(anyhow!("no scripted reply for {cookie}")),
        }
    }
}

impl Portal for ScriptedPortal {
    fn get(&self, url: &str, ctx: &RequestContext) -> Result<PortalResponse> {
        self.calls.borrow_mut().push(Call::Get {
            url: url.into(),
            cookie: ctx.cookie().into(),
            user_agent: ctx.user_agent.clone(),
        });
        Self::answer(&self.status, ctx.cookie())
    }

    fn post_form(
        &self,
        url: &str,
        ctx: &RequestContext,
        form: &BTreeMap<String, String>,
    ) -> Result<PortalResponse> {
        self.calls.borrow_mut().push(Call::Post {
            url: url.into(),
            cookie: ctx.cookie().into(),
            form: form.clone(),
        });
        Self::answer(&self.submit, ctx.cookie())
    }
}

pub const ON_CAMPUS: &str = r#"{"data":{"appliedTimes":0,"schoolStatus":1}}"#;
pub const OFF_CAMPUS: &str = r#"{"data":{"appliedTimes":0,"schoolStatus":0}}"#;
pub const REPORTED: &str = r#"{"data":{"appliedTimes":1,"schoolStatus":1}}"#;
pub const ACCEPTED: &str = r#"{"status":true}"#;
pub const REJECTED: &str = r#"{"status":false}"#;
