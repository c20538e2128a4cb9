// Rocket routes for the tail-chasing bot
//
// Each route pulls the shared Bot out of managed state and hands it the
// parsed GameState. Only /move can fail: a board the decision core refuses
// is answered with 400 instead of a guessed move.

use log::warn;
use rocket::http::Status;
use rocket::serde::json::Json;
use serde_json::Value;

use tailchaser_snake::bot::Bot;
use tailchaser_snake::types::GameState;

/// Appearance from `[appearance]` in Snake.toml
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// Logged only; nothing is kept between games
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameState>) -> Status {
    bot.start(
        &start_req.game,
        &start_req.turn,
        &start_req.board,
        &start_req.you,
    );

    Status::Ok
}

/// Runs one stateless decision on the posted snapshot
///
/// Non-positive or overflowing board dimensions give 400.
#[post("/move", format = "json", data = "<move_req>")]
pub fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<GameState>,
) -> Result<Json<Value>, Status> {
    bot.get_move(
        &move_req.game,
        &move_req.turn,
        &move_req.board,
        &move_req.you,
    )
    .map(Json)
    .map_err(|e| {
        warn!("{} MOVE {}: rejected snapshot: {}", move_req.game.id, move_req.turn, e);
        Status::BadRequest
    })
}

#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Status {
    bot.end(&end_req.game, &end_req.turn, &end_req.board, &end_req.you);

    Status::Ok
}
