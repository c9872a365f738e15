//! Redirects for request-handling contexts.
//!
//! Anything that can hand out a URL builder, an event notifier, the redirect
//! settings and its own response implements [`Redirector`] and gets URL
//! generation and redirects for free.

pub mod destination;
pub mod error;

pub use destination::{Destination, Parameters};
pub use error::RedirectError;

use crate::{
    app_environment::RedirectSettings,
    events::{log_payload, EventNotifier, APPLICATION_LOG},
    responders::ResponseSink,
    routing::{UrlBuilder, UrlError},
};

pub const DEFAULT_STATUS: u16 = 302;

const LOCATION: &str = "Location";

/// One redirect: where to, how long the meta-refresh waits, and the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRequest {
    pub destination: Option<Destination>,
    pub delay: u32,
    pub status: u16,
}

impl RedirectRequest {
    pub fn new(destination: Option<Destination>) -> Self {
        Self {
            destination,
            delay: 0,
            status: DEFAULT_STATUS,
        }
    }

    pub fn to(destination: impl Into<Destination>) -> Self {
        Self::new(Some(destination.into()))
    }

    pub fn delay(mut self, seconds: u32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

pub trait Redirector {
    type Response: ResponseSink;

    fn url_builder(&self) -> &dyn UrlBuilder;

    /// `None` when events are not wanted.
    fn notifier(&self) -> Option<&dyn EventNotifier>;

    fn settings(&self) -> &RedirectSettings;

    fn response_mut(&mut self) -> &mut Self::Response;

    /// Generates a URL from a parameter mapping or an internal URI.
    fn generate_url(&self, destination: &Destination, absolute: bool) -> Result<String, UrlError> {
        self.url_builder().generate(destination, absolute)
    }

    /// Converts an internal URI into its parameters.
    fn parse_internal_uri(&self, uri: &str) -> Result<Parameters, UrlError> {
        self.url_builder().parse(uri)
    }

    /// Points the response at `request.destination` and sends it.
    ///
    /// The `Location` header is only set for 201 and 3xx codes; every other
    /// status relies on the meta-refresh tag in the body.
    fn redirect(&mut self, request: RedirectRequest) -> Result<(), RedirectError> {
        let destination = match request.destination {
            Some(destination) if !destination.is_empty() => destination,
            _ => return Err(RedirectError::InvalidDestination),
        };

        let url = normalize_ampersands(&self.generate_url(&destination, true)?);

        if self.settings().logging_enabled {
            if let Some(notifier) = self.notifier() {
                notifier.notify(APPLICATION_LOG, log_payload(format!("Redirect to \"{}\"", url)));
            }
        }

        let body = refresh_body(request.delay, &url);
        let response = self.response_mut();
        response.clear_headers();
        response.set_status_code(request.status);
        if sets_location(request.status) {
            response.set_header(LOCATION, &url);
        }
        response.set_body(body);
        response.send();

        Ok(())
    }
}

/// Undoes `&amp;` entities some URL builders leave in generated URLs, where
/// they would otherwise be escaped a second time in the refresh tag.
pub fn normalize_ampersands(url: &str) -> String {
    url.replace("&amp;", "&")
}

pub fn sets_location(status: u16) -> bool {
    status == 201 || (300..400).contains(&status)
}

pub fn refresh_body(delay: u32, url: &str) -> String {
    format!(
        "<html><head><meta http-equiv=\"refresh\" content=\"{};url={}\"/></head></html>",
        delay,
        escape_html(url)
    )
}

/// Escapes the characters that are special in HTML attribute values,
/// single and double quotes included. Works on any ASCII-compatible charset.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
