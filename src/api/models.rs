use crate::responders::BufferedResponse;

use rocket::response::Responder;

#[derive(Responder)]
pub enum RedirectResponse {
    #[response(status = 500)]
    InternalServerError(String),
    #[response(status = 400)]
    BadRequest(String),
    Redirect(BufferedResponse),
}
