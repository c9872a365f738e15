use std::io::Cursor;

use log::{debug, warn};
use rocket::{http::Status, response, response::Responder, Request, Response};

use super::ResponseSink;

const CONTENT_TYPE: &str = "Content-Type";

/// Response state collected during a handler and written out by Rocket.
#[derive(Debug, Clone)]
pub struct BufferedResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
    charset: String,
    sent: bool,
}

impl BufferedResponse {
    pub fn new(charset: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
            charset: charset.into(),
            sent: false,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    fn writable(&self, what: &str) -> bool {
        if self.sent {
            warn!("response already sent, ignoring {}", what);
        }
        !self.sent
    }
}

impl ResponseSink for BufferedResponse {
    fn clear_headers(&mut self) {
        if self.writable("header reset") {
            self.headers.clear();
        }
    }

    fn set_status_code(&mut self, code: u16) {
        if self.writable("status change") {
            self.status = code;
        }
    }

    fn set_header(&mut self, name: &str, value: &str) {
        if !self.writable("header") {
            return;
        }
        if name.chars().chain(value.chars()).any(char::is_control) {
            warn!("dropping header {:?} with control characters", name);
            return;
        }
        match self.headers.iter_mut().find(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Some(header) => header.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    fn set_body(&mut self, body: String) {
        if self.writable("body") {
            self.body = body;
        }
    }

    fn send(&mut self) {
        if self.sent {
            debug!("response already sent");
            return;
        }
        self.sent = true;
    }
}

impl<'r> Responder<'r, 'static> for BufferedResponse {
    fn respond_to(self, _req: &'r Request<'_>) -> response::Result<'static> {
        let mut builder = Response::build();
        builder.status(Status::new(self.status));

        if self.header(CONTENT_TYPE).is_none() {
            builder.raw_header(CONTENT_TYPE, format!("text/html; charset={}", self.charset));
        }
        for (name, value) in self.headers {
            builder.raw_header_adjoin(name, value);
        }

        builder.sized_body(self.body.len(), Cursor::new(self.body)).ok()
    }
}
