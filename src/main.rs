use rocket::{Build, Rocket};
use rocket_sentry::RocketSentry;
use web_redirector::app_environment;

#[rocket::launch]
fn rocket() -> Rocket<Build> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let env = match app_environment::get() {
        Ok(env) => env,
        Err(e) => panic!("{}", e),
    };

    match web_redirector::build(&env) {
        Ok(rocket) => rocket.attach(RocketSentry::fairing()),
        Err(e) => panic!("{}", e),
    }
}
