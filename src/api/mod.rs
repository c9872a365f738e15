mod models;
mod redirects;

use crate::api::redirects::*;

#[get("/")]
fn index() -> String {
    String::from("neat")
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Redirects", |rocket| async {
        rocket.mount("/", routes![index, item_show, redirect_to, goto, parse_uri])
    })
}
