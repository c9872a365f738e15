#[macro_use]
extern crate rocket;

pub mod api;
pub mod app_environment;
pub mod controller;
pub mod events;
pub mod guards;
pub mod responders;
pub mod routing;

use crate::{
    app_environment::AppEnvironment,
    events::LogNotifier,
    guards::context::RedirectState,
    routing::{RouteUrlBuilder, UrlError},
};

use rocket::{Build, Rocket};

/// Assembles the application: the route table used for URL generation, the
/// shared redirect collaborators and the mounted handlers.
pub fn build(env: &AppEnvironment) -> Result<Rocket<Build>, UrlError> {
    let urls = RouteUrlBuilder::new(&env.base_url)?
        .route("homepage", "/")
        .route("item_show", "/item/:id");

    let state = RedirectState {
        urls: Box::new(urls),
        notifier: Some(Box::new(LogNotifier)),
        settings: env.redirect.clone(),
    };

    Ok(rocket::build().manage(state).attach(api::stage()))
}
