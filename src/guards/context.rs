use crate::{
    app_environment::RedirectSettings,
    controller::Redirector,
    events::EventNotifier,
    responders::BufferedResponse,
    routing::UrlBuilder,
};

use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome, Request};

/// Collaborators shared by every request, managed by Rocket.
pub struct RedirectState {
    pub urls: Box<dyn UrlBuilder>,
    pub notifier: Option<Box<dyn EventNotifier>>,
    pub settings: RedirectSettings,
}

/// Per-request handling context: borrows the shared collaborators and owns
/// the response being built for this request.
pub struct RequestContext<'r> {
    state: &'r RedirectState,
    response: BufferedResponse,
}

impl<'r> RequestContext<'r> {
    pub fn new(state: &'r RedirectState) -> Self {
        Self {
            state,
            response: BufferedResponse::new(state.settings.charset.clone()),
        }
    }

    pub fn into_response(self) -> BufferedResponse {
        self.response
    }
}

#[derive(Debug)]
pub enum RequestContextError {
    Unmanaged,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RequestContext<'r> {
    type Error = RequestContextError;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match req.rocket().state::<RedirectState>() {
            None => Outcome::Error((Status::InternalServerError, RequestContextError::Unmanaged)),
            Some(state) => Outcome::Success(RequestContext::new(state)),
        }
    }
}

impl<'r> Redirector for RequestContext<'r> {
    type Response = BufferedResponse;

    fn url_builder(&self) -> &dyn UrlBuilder {
        self.state.urls.as_ref()
    }

    fn notifier(&self) -> Option<&dyn EventNotifier> {
        self.state.notifier.as_deref()
    }

    fn settings(&self) -> &RedirectSettings {
        &self.state.settings
    }

    fn response_mut(&mut self) -> &mut BufferedResponse {
        &mut self.response
    }
}
