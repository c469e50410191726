//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get,
    http::StatusCode,
    patch, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_tournament_web::{
    change_match_status, generate_group_matches, generate_playoff, generate_playoff_final,
    group_champion, group_standings, group_status, patch_match, playoff_view,
    schedule_group_matches, submit_match_result, ErrorKind, GroupId, MatchId, MatchPatch,
    MatchStatus, PlayerId, ScheduleRequest, SetScore, Tournament, TournamentConfig,
    TournamentError, TournamentId,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Every mutation holds the write
/// lock for its whole check-then-write, which serializes bracket and schedule
/// generation per group.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    config: TournamentConfig,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    club: String,
}

#[derive(Deserialize)]
struct CreateGroupBody {
    name: String,
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct SubmitResultBody {
    sets: Vec<SetScore>,
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: MatchStatus,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and group id.
#[derive(Deserialize)]
struct GroupPath {
    id: TournamentId,
    group_id: GroupId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let status = match e.kind() {
        ErrorKind::Validation | ErrorKind::Precondition => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
    };
    let mut body = serde_json::json!({ "error": e.to_string(), "kind": e.kind() });
    if !e.match_ids().is_empty() {
        body["match_ids"] = serde_json::json!(e.match_ids());
    }
    HttpResponse::build(status).json(body)
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::build(status).json(value),
        Err(e) => {
            log::debug!("request rejected: {}", e);
            error_response(&e)
        }
    }
}

/// Run `f` on a tournament under the write lock, refreshing its last activity.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = Tournament::new(body.name.trim(), body.config);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Created().json(&tournament);
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

#[post("/api/tournaments/{id}/players")]
async fn api_add_player(state: AppState, path: Path<TournamentPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t
            .add_player(body.name.as_str(), body.club.as_str())
            .and_then(|id| t.player(id).cloned());
        respond(StatusCode::CREATED, result)
    })
}

/// Bulk import players from a CSV body with a `name,club` header.
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<TournamentPath>, body: Bytes) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        respond(StatusCode::CREATED, t.import_players_csv(&body[..]))
    })
}

#[post("/api/tournaments/{id}/groups")]
async fn api_create_group(state: AppState, path: Path<TournamentPath>, body: Json<CreateGroupBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t
            .create_group(body.name.trim(), &body.player_ids)
            .and_then(|id| t.group(id).cloned());
        respond(StatusCode::CREATED, result)
    })
}

/// Generate the round-robin matches of a group.
#[post("/api/tournaments/{id}/groups/{group_id}/matches")]
async fn api_generate_group_matches(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        respond(StatusCode::CREATED, generate_group_matches(t, path.group_id, Utc::now()))
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/matches")]
async fn api_list_group_matches(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        let result = t
            .group(path.group_id)
            .map(|g| g.id)
            .map(|group_id| t.group_matches(group_id));
        respond(StatusCode::OK, result)
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/status")]
async fn api_group_status(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| respond(StatusCode::OK, group_status(t, path.group_id)))
}

/// Assign courts and start times to the group's pending matches.
#[post("/api/tournaments/{id}/groups/{group_id}/schedule")]
async fn api_schedule_group(
    state: AppState,
    path: Path<GroupPath>,
    body: Bytes,
) -> HttpResponse {
    let request = match ScheduleRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };
    with_tournament(&state, path.id, |t| {
        respond(
            StatusCode::OK,
            schedule_group_matches(t, path.group_id, &request, Utc::now()),
        )
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/standings")]
async fn api_group_standings(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| respond(StatusCode::OK, group_standings(t, path.group_id)))
}

/// Generate the semifinals (top 4 of the group: 1 vs 4, 2 vs 3).
#[post("/api/tournaments/{id}/groups/{group_id}/playoff")]
async fn api_generate_playoff(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        respond(StatusCode::CREATED, generate_playoff(t, path.group_id, Utc::now()))
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/playoff")]
async fn api_playoff_view(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| respond(StatusCode::OK, playoff_view(t, path.group_id)))
}

/// Generate the final from the two semifinal winners.
#[post("/api/tournaments/{id}/groups/{group_id}/playoff/final")]
async fn api_generate_final(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        respond(StatusCode::CREATED, generate_playoff_final(t, path.group_id, Utc::now()))
    })
}

#[get("/api/tournaments/{id}/groups/{group_id}/winner")]
async fn api_group_winner(state: AppState, path: Path<GroupPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| respond(StatusCode::OK, group_champion(t, path.group_id)))
}

/// Edit court number or scheduled times of a match.
#[patch("/api/tournaments/{id}/matches/{match_id}")]
async fn api_patch_match(state: AppState, path: Path<MatchPath>, body: Json<MatchPatch>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        respond(StatusCode::OK, patch_match(t, path.match_id, &body))
    })
}

/// Record (or replace) the full result of a match.
#[patch("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_submit_result(state: AppState, path: Path<MatchPath>, body: Json<SubmitResultBody>) -> HttpResponse {
    let sets = body.into_inner().sets;
    with_tournament(&state, path.id, |t| {
        respond(StatusCode::OK, submit_match_result(t, path.match_id, sets, Utc::now()))
    })
}

#[put("/api/tournaments/{id}/matches/{match_id}/status")]
async fn api_set_status(state: AppState, path: Path<MatchPath>, body: Json<SetStatusBody>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        respond(
            StatusCode::OK,
            change_match_status(t, path.match_id, body.status, Utc::now()),
        )
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
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

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_create_group)
            .service(api_generate_group_matches)
            .service(api_list_group_matches)
            .service(api_group_status)
            .service(api_schedule_group)
            .service(api_group_standings)
            .service(api_generate_playoff)
            .service(api_playoff_view)
            .service(api_generate_final)
            .service(api_group_winner)
            .service(api_patch_match)
            .service(api_submit_result)
            .service(api_set_status)
    })
    .bind(bind)?
    .run()
    .await
}
