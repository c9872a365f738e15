use crate::{
    api::models::RedirectResponse,
    controller::{Destination, Parameters, RedirectError, RedirectRequest, Redirector, DEFAULT_STATUS},
    guards::context::RequestContext,
    routing::{is_passthrough, ROUTE_KEY},
};

use log::error;
use rocket::{http::Status, serde::json::Json};

#[get("/item/<id>")]
pub fn item_show(id: &str) -> String {
    format!("item {}", id)
}

#[get("/redirect?<to>&<delay>&<status>")]
pub fn redirect_to(
    ctx: RequestContext<'_>,
    to: Option<String>,
    delay: Option<u32>,
    status: Option<u16>,
) -> RedirectResponse {
    // internal URIs only
    if let Some(uri) = to.as_deref() {
        if is_passthrough(uri) || uri.chars().any(char::is_control) {
            return RedirectResponse::BadRequest(format!("not an internal URI: {:?}", uri));
        }
    }
    if let Some(code) = status.filter(|code| !(100..=599).contains(code)) {
        return RedirectResponse::BadRequest(format!("invalid status code {}", code));
    }

    let request = RedirectRequest::new(to.map(Destination::from))
        .delay(delay.unwrap_or(0))
        .status(status.unwrap_or(DEFAULT_STATUS));

    respond(ctx, request)
}

#[get("/goto/<module>/<action>?<params..>")]
pub fn goto(
    ctx: RequestContext<'_>,
    module: &str,
    action: &str,
    params: Parameters,
) -> RedirectResponse {
    let mut params = params;
    params.remove(ROUTE_KEY);
    params.insert("module".to_string(), module.to_string());
    params.insert("action".to_string(), action.to_string());

    respond(ctx, RedirectRequest::to(params).status(301))
}

#[get("/parse?<uri>")]
pub fn parse_uri(ctx: RequestContext<'_>, uri: &str) -> Result<Json<Parameters>, (Status, String)> {
    ctx.parse_internal_uri(uri)
        .map(Json)
        .map_err(|e| (Status::BadRequest, e.to_string()))
}

fn respond(mut ctx: RequestContext<'_>, request: RedirectRequest) -> RedirectResponse {
    match ctx.redirect(request) {
        Ok(()) => RedirectResponse::Redirect(ctx.into_response()),
        Err(e @ RedirectError::InvalidDestination) => RedirectResponse::BadRequest(e.to_string()),
        Err(e) => {
            error!("redirect failed: {}", e);
            RedirectResponse::InternalServerError(e.to_string())
        }
    }
}
