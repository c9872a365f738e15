use web_redirector::{
    app_environment::{AppEnvironment, RedirectSettings},
    build,
    controller::Parameters,
};

use rocket::http::Status;
use rocket::local::blocking::Client;

fn client() -> Client {
    client_with(RedirectSettings::default())
}

fn client_with(redirect: RedirectSettings) -> Client {
    let env = AppEnvironment {
        base_url: "http://example.com".into(),
        redirect,
    };

    Client::tracked(build(&env).expect("valid base url")).expect("valid rocket instance")
}

#[test]
fn index_answers() {
    let client = client();
    let response = client.get("/").dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().as_deref(), Some("neat"));
}

#[test]
fn redirect_to_named_route() {
    let client = client();
    let response = client.get("/redirect?to=%40item_show%3Fid%3D42").dispatch();

    assert_eq!(response.status(), Status::Found);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("http://example.com/item/42")
    );
    assert_eq!(
        response.headers().get_one("Content-Type"),
        Some("text/html; charset=utf-8")
    );
    assert_eq!(
        response.into_string().as_deref(),
        Some("<html><head><meta http-equiv=\"refresh\" content=\"0;url=http://example.com/item/42\"/></head></html>")
    );
}

#[test]
fn non_redirect_status_uses_refresh_only() {
    let client = client();
    let response = client
        .get("/redirect?to=%40homepage&delay=3&status=200")
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.headers().get_one("Location"), None);
    assert!(response
        .into_string()
        .unwrap_or_default()
        .contains("content=\"3;url=http://example.com/\""));
}

#[test]
fn goto_builds_url_from_parameters() {
    let client = client();
    let response = client.get("/goto/blog/list?page=2").dispatch();

    assert_eq!(response.status(), Status::MovedPermanently);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("http://example.com/blog/list?page=2")
    );
}

#[test]
fn empty_destination_is_a_bad_request() {
    let client = client();

    for uri in ["/redirect", "/redirect?to="] {
        let response = client.get(uri).dispatch();
        assert_eq!(response.status(), Status::BadRequest, "{}", uri);
        assert_eq!(response.headers().get_one("Location"), None);
    }
}

#[test]
fn unknown_route_is_a_server_error() {
    let client = client();
    let response = client.get("/redirect?to=%40nowhere").dispatch();

    assert_eq!(response.status(), Status::InternalServerError);
}

#[test]
fn parse_returns_parameters_as_json() {
    let client = client();
    let response = client.get("/parse?uri=item%2Fshow%3Fid%3D3").dispatch();

    assert_eq!(response.status(), Status::Ok);
    let params = response.into_json::<Parameters>().expect("json body");
    assert_eq!(params.get("module").map(String::as_str), Some("item"));
    assert_eq!(params.get("action").map(String::as_str), Some("show"));
    assert_eq!(params.get("id").map(String::as_str), Some("3"));
}

#[test]
fn parse_rejects_bare_word_with_query() {
    let client = client();
    let response = client.get("/parse?uri=home%3Fid%3D1").dispatch();

    assert_eq!(response.status(), Status::BadRequest);
}

#[test]
fn redirect_target_is_served() {
    let client = client();
    let response = client.get("/item/42").dispatch();

    assert_eq!(response.into_string().as_deref(), Some("item 42"));
}

#[test]
fn configured_charset_lands_in_content_type() {
    let client = client_with(RedirectSettings {
        logging_enabled: false,
        charset: "ISO-8859-1".into(),
    });
    let response = client.get("/redirect?to=%40homepage").dispatch();

    assert_eq!(response.status(), Status::Found);
    assert_eq!(
        response.headers().get_one("Content-Type"),
        Some("text/html; charset=ISO-8859-1")
    );
}

#[test]
fn external_and_raw_destinations_are_refused() {
    let client = client();

    for uri in [
        "/redirect?to=https%3A%2F%2Fevil.example%2Fphish",
        "/redirect?to=%2F%2Fevil.example",
        "/redirect?to=%2Fa%0D%0ASet-Cookie%3A%20x%3D1",
        "/redirect?to=item%2Fshow%0D%0ASet-Cookie%3A%20x%3D1",
    ] {
        let response = client.get(uri).dispatch();
        assert_eq!(response.status(), Status::BadRequest, "{}", uri);
        assert_eq!(response.headers().get_one("Location"), None, "{}", uri);
        assert_eq!(response.headers().get_one("Set-Cookie"), None, "{}", uri);
    }
}

#[test]
fn out_of_range_status_is_a_bad_request() {
    let client = client();

    for status in ["42", "99", "600"] {
        let response = client
            .get(format!("/redirect?to=%40homepage&status={}", status))
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest, "status {}", status);
    }

    let response = client.get("/redirect?to=%40homepage&status=599").dispatch();
    assert_eq!(response.status().code, 599);
}

#[test]
fn goto_ignores_route_override() {
    let client = client();
    let response = client.get("/goto/a/b?_route=item_show&id=5").dispatch();

    assert_eq!(response.status(), Status::MovedPermanently);
    assert_eq!(
        response.headers().get_one("Location"),
        Some("http://example.com/a/b?id=5")
    );
}

#[test]
fn zero_is_a_route_name_not_an_empty_destination() {
    let client = client();
    let response = client.get("/redirect?to=0").dispatch();

    assert_eq!(response.status(), Status::InternalServerError);
}
