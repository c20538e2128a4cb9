#[macro_use]
extern crate rocket;

use log::info;
use rocket::fairing::AdHoc;
use std::env;

use tailchaser_snake::bot::{Bot, SERVER_ID};
use tailchaser_snake::config::Config;
use tailchaser_snake::debug_logger::DebugLogger;

mod handler;

#[launch]
async fn rocket() -> _ {
    // Hosts hand us PORT; Rocket only reads ROCKET_PORT
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // One info line per move unless RUST_LOG says otherwise
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting {}", SERVER_ID);

    // Heuristic thresholds and the decision log are fixed for the process lifetime
    let config = Config::load_or_default();
    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::new(config, debug_logger);

    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server header", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", SERVER_ID);
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}
