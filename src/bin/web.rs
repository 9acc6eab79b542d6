//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; override with env HOST / PORT.
//! Admin password comes from env ADMIN_PASSWORD (default "admin123");
//! the admin role lives in the session cookie and is mapped to an Actor
//! on every request.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use football_league_web::{
    service, Actor, Availability, FixtureId, LeagueError, MemoryStore, Player,
};
use serde::Deserialize;

/// Shared store instance. Everything the engine touches lives here.
type AppState = Data<MemoryStore>;

/// Runtime configuration read once at startup.
#[derive(Clone)]
struct AppConfig {
    admin_password: String,
}

const ROLE_KEY: &str = "role";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    password: String,
}

#[derive(Deserialize)]
struct SignupBody {
    username: String,
    platform: String,
    team: String,
    availability: Option<Availability>,
}

#[derive(Deserialize)]
struct FixtureResultBody {
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct BracketResultBody {
    round: usize,
    match_index: usize,
    score: String,
}

/// Path segment: player username (e.g. /api/players/{username})
#[derive(Deserialize)]
struct PlayerPath {
    username: String,
}

/// Path segment: fixture id (e.g. /api/matches/{id}/result)
#[derive(Deserialize)]
struct FixturePath {
    id: FixtureId,
}

/// Map the session cookie to the capability passed into the service layer.
fn actor_from(session: &Session) -> Actor {
    match session.get::<String>(ROLE_KEY) {
        Ok(Some(role)) if role == "admin" => Actor::Admin,
        _ => Actor::Guest,
    }
}

/// One JSON error shape for the whole API, with a status per error kind.
fn error_response(e: LeagueError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        LeagueError::Unauthorized => HttpResponse::Forbidden().json(body),
        LeagueError::PlayerNotFound(_) | LeagueError::NoSuchMatch => {
            HttpResponse::NotFound().json(body)
        }
        LeagueError::Store(ref err) => {
            log::error!("store failure: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn respond<T: serde::Serialize>(result: Result<T, LeagueError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-league-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Exchange the shared admin password for the admin role in the session.
#[post("/api/admin/login")]
async fn api_admin_login(
    config: Data<AppConfig>,
    session: Session,
    body: Json<LoginBody>,
) -> HttpResponse {
    if body.password != config.admin_password {
        return HttpResponse::Forbidden()
            .json(serde_json::json!({ "error": "Wrong admin password" }));
    }
    if session.insert(ROLE_KEY, "admin").is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    log::info!("Admin logged in");
    HttpResponse::Ok().json(serde_json::json!({ "role": "admin" }))
}

#[post("/api/admin/logout")]
async fn api_admin_logout(session: Session) -> HttpResponse {
    session.remove(ROLE_KEY);
    HttpResponse::Ok().json(serde_json::json!({ "role": "guest" }))
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    respond(service::list_players(state.get_ref()))
}

/// Public signup: anyone may register themselves.
#[post("/api/players")]
async fn api_signup(state: AppState, body: Json<SignupBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut player = Player::new(body.username, body.platform, body.team);
    player.availability = body.availability;
    respond(service::signup(state.get_ref(), player))
}

/// Admin edit of a signup (replaces the stored row).
#[put("/api/players/{username}")]
async fn api_update_player(
    state: AppState,
    session: Session,
    path: Path<PlayerPath>,
    body: Json<Player>,
) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::update_player(
        state.get_ref(),
        actor,
        &path.username,
        body.into_inner(),
    ))
}

#[delete("/api/players/{username}")]
async fn api_remove_player(
    state: AppState,
    session: Session,
    path: Path<PlayerPath>,
) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::remove_player(state.get_ref(), actor, &path.username))
}

#[get("/api/standings")]
async fn api_standings(state: AppState) -> HttpResponse {
    respond(service::current_standings(state.get_ref()))
}

#[get("/api/matches")]
async fn api_list_fixtures(state: AppState) -> HttpResponse {
    respond(service::list_fixtures(state.get_ref()))
}

/// Generate (or regenerate) the round-robin schedule.
#[post("/api/matches/generate")]
async fn api_generate_schedule(state: AppState, session: Session) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::generate_season_schedule(state.get_ref(), actor))
}

/// Enter a fixture result; standings are fully recomputed.
#[put("/api/matches/{id}/result")]
async fn api_fixture_result(
    state: AppState,
    session: Session,
    path: Path<FixturePath>,
    body: Json<FixtureResultBody>,
) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::submit_fixture_result(
        state.get_ref(),
        actor,
        path.id,
        body.home_score,
        body.away_score,
    ))
}

/// Clear every regular-season result and zero all stats.
#[post("/api/matches/clear-results")]
async fn api_clear_results(state: AppState, session: Session) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::clear_regular_results(state.get_ref(), actor))
}

#[get("/api/season")]
async fn api_season_state(state: AppState) -> HttpResponse {
    respond(service::season_state(state.get_ref()))
}

/// Conclude the regular season: locks result entry, unlocks playoffs.
#[post("/api/season/close")]
async fn api_close_season(state: AppState, session: Session) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::close_season(state.get_ref(), actor))
}

/// Full season reset: wipes fixtures, bracket, and stats; season reopens.
#[post("/api/season/reset")]
async fn api_reset_season(state: AppState, session: Session) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::reset_season(state.get_ref(), actor))
}

/// The bracket plus display names for its rounds (names are derived on
/// demand, never stored).
#[get("/api/bracket")]
async fn api_get_bracket(state: AppState) -> HttpResponse {
    match service::load_bracket(state.get_ref()) {
        Ok(bracket) => {
            let round_names = bracket
                .as_ref()
                .map(|b| b.round_names())
                .unwrap_or_default();
            HttpResponse::Ok().json(serde_json::json!({
                "bracket": bracket,
                "round_names": round_names,
            }))
        }
        Err(e) => error_response(e),
    }
}

/// Generate the playoff bracket from the current standings (season must
/// be concluded).
#[post("/api/bracket/generate")]
async fn api_generate_bracket(state: AppState, session: Session) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::generate_playoff_bracket(state.get_ref(), actor))
}

/// Delete the bracket without touching the regular season.
#[delete("/api/bracket")]
async fn api_delete_bracket(state: AppState, session: Session) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::reset_playoff_bracket(state.get_ref(), actor))
}

/// Record a playoff result; the winner advances one round automatically.
#[put("/api/bracket/result")]
async fn api_bracket_result(
    state: AppState,
    session: Session,
    body: Json<BracketResultBody>,
) -> HttpResponse {
    let actor = actor_from(&session);
    respond(service::record_playoff_result(
        state.get_ref(),
        actor,
        body.round,
        body.match_index,
        &body.score,
    ))
}

/// The champion, once the final has a decisive result.
#[get("/api/bracket/champion")]
async fn api_champion(state: AppState) -> HttpResponse {
    respond(service::playoff_champion(state.get_ref()))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn session_key() -> Key {
    match std::env::var("SESSION_KEY") {
        Ok(s) if s.len() >= 64 => Key::derive_from(s.as_bytes()),
        _ => Key::generate(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let config = AppConfig {
        admin_password: std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string()),
    };
    let key = session_key();
    let state = Data::new(MemoryStore::new());
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_admin_login)
            .service(api_admin_logout)
            .service(api_list_players)
            .service(api_signup)
            .service(api_update_player)
            .service(api_remove_player)
            .service(api_standings)
            .service(api_list_fixtures)
            .service(api_generate_schedule)
            .service(api_fixture_result)
            .service(api_clear_results)
            .service(api_season_state)
            .service(api_close_season)
            .service(api_reset_season)
            .service(api_get_bracket)
            .service(api_generate_bracket)
            .service(api_delete_bracket)
            .service(api_bracket_result)
            .service(api_champion)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
