use crate::{config::Http, credentials::Credential};

/// Headers for one student's requests. Built fresh per credential and never mutated.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_agent: String,
    pub credential: Credential,
}

impl RequestContext {
    pub fn new(http: &Http, credential: &Credential) -> Self {
        Self {
            user_agent: http.user_agent.clone(),
            credential: credential.clone(),
        }
    }

    pub fn cookie(&self) -> &str {
        self.credential.as_str()
    }
}

#[derive(Debug, Clone)]
pub struct PortalResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl PortalResponse {
    pub fn ok_json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}
