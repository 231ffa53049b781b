//! Single binary web server: JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), RUST_LOG (e.g. debug).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament_web::{
    cancel_edit, complete_finals, complete_match, delete_match, delete_round, generate_next_round,
    initiate_finals, rank_leaderboard, reset_tournament, reverse_match, roster, save_edit,
    snapshot, start_tournament, update_finals_score, update_score, LeaderboardMode, Side,
    Tournament, TournamentError, TournamentId, TournamentSettings,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament snapshot + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    rating: Option<i32>,
}

#[derive(Deserialize)]
struct ScoreBody {
    side: Side,
    delta: i32,
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(default)]
    mode: LeaderboardMode,
}

#[derive(Deserialize)]
struct FinalsBody {
    #[serde(default)]
    mode: LeaderboardMode,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: Uuid,
}

#[derive(Deserialize)]
struct RoundPath {
    id: TournamentId,
    round_id: u32,
}

#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    round_id: u32,
    match_id: String,
}

type Entries<'a> = RwLockWriteGuard<'a, HashMap<TournamentId, TournamentEntry>>;

fn lock(state: &AppState) -> Result<Entries<'_>, HttpResponse> {
    state
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

fn store(entries: &mut Entries<'_>, tournament: Tournament) {
    entries.insert(
        tournament.id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: impl Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `f` against the stored snapshot; on success the returned snapshot replaces it.
/// On error the stored snapshot is left untouched.
fn transition<E: Display>(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&Tournament) -> Result<Tournament, E>,
) -> HttpResponse {
    let mut g = match lock(state) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let Some(entry) = g.get_mut(&id) else {
        return not_found();
    };
    entry.last_activity = Instant::now();
    match f(&entry.tournament) {
        Ok(next) => {
            entry.tournament = next;
            HttpResponse::Ok().json(&entry.tournament)
        }
        Err(e) => bad_request(e),
    }
}

/// Read-only access; still refreshes last_activity.
fn inspect(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&Tournament) -> HttpResponse,
) -> HttpResponse {
    let mut g = match lock(state) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&entry.tournament)
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Option<Json<TournamentSettings>>,
) -> HttpResponse {
    let settings = body.map(Json::into_inner).unwrap_or_default();
    let tournament = Tournament::new(settings);
    let id = tournament.id;
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let response = HttpResponse::Ok().json(&tournament);
    store(&mut g, tournament);
    log::info!("Created tournament {}", id);
    response
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    inspect(&state, path.id, |t| HttpResponse::Ok().json(t))
}

#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    transition(&state, path.id, |t| {
        let mut next = t.clone();
        next.add_player(body.name.as_str(), body.rating)?;
        Ok::<_, TournamentError>(next)
    })
}

/// Bulk add from a CSV body: `name[,rating]` per line.
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(
    state: AppState,
    path: Path<TournamentPath>,
    body: String,
) -> HttpResponse {
    transition(&state, path.id, |t| {
        roster::import_roster(t, body.as_bytes()).map(|(next, _)| next)
    })
}

/// Remove a player by id (only before the tournament starts).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    transition(&state, path.id, |t| {
        let mut next = t.clone();
        next.remove_player(path.player_id)?;
        Ok::<_, TournamentError>(next)
    })
}

/// Mark a player away / back.
#[post("/api/tournaments/{id}/players/{player_id}/toggle")]
async fn api_toggle_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    transition(&state, path.id, |t| {
        let mut next = t.clone();
        next.toggle_player_active(path.player_id)?;
        Ok::<_, TournamentError>(next)
    })
}

#[put("/api/tournaments/{id}/settings")]
async fn api_set_settings(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentSettings>,
) -> HttpResponse {
    transition(&state, path.id, |t| {
        let mut next = t.clone();
        next.set_settings(body.into_inner());
        Ok::<_, TournamentError>(next)
    })
}

/// Start the tournament and generate the first round.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    transition(&state, path.id, start_tournament)
}

/// Back to roster stage with the same players.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    transition(&state, path.id, |t| {
        Ok::<_, TournamentError>(reset_tournament(t))
    })
}

#[post("/api/tournaments/{id}/rounds")]
async fn api_generate_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    transition(&state, path.id, generate_next_round)
}

#[delete("/api/tournaments/{id}/rounds/{round_id}")]
async fn api_delete_round(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    transition(&state, path.id, |t| delete_round(t, path.round_id))
}

#[put("/api/tournaments/{id}/rounds/{round_id}/matches/{match_id}/score")]
async fn api_update_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    transition(&state, path.id, |t| {
        update_score(t, path.round_id, &path.match_id, body.side, body.delta)
    })
}

#[post("/api/tournaments/{id}/rounds/{round_id}/matches/{match_id}/complete")]
async fn api_complete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    transition(&state, path.id, |t| complete_match(t, path.round_id, &path.match_id))
}

/// Reopen a completed match for editing.
#[post("/api/tournaments/{id}/rounds/{round_id}/matches/{match_id}/edit")]
async fn api_edit_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    transition(&state, path.id, |t| reverse_match(t, path.round_id, &path.match_id))
}

#[post("/api/tournaments/{id}/rounds/{round_id}/matches/{match_id}/save")]
async fn api_save_edit(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    transition(&state, path.id, |t| save_edit(t, path.round_id, &path.match_id))
}

#[post("/api/tournaments/{id}/rounds/{round_id}/matches/{match_id}/cancel")]
async fn api_cancel_edit(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    transition(&state, path.id, |t| cancel_edit(t, path.round_id, &path.match_id))
}

#[delete("/api/tournaments/{id}/rounds/{round_id}/matches/{match_id}")]
async fn api_delete_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    transition(&state, path.id, |t| delete_match(t, path.round_id, &path.match_id))
}

#[get("/api/tournaments/{id}/leaderboard")]
async fn api_leaderboard(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<LeaderboardQuery>,
) -> HttpResponse {
    inspect(&state, path.id, |t| {
        HttpResponse::Ok().json(rank_leaderboard(&t.players, &t.rounds, query.mode))
    })
}

/// Seed the finals from the top four of the leaderboard.
#[post("/api/tournaments/{id}/finals")]
async fn api_initiate_finals(
    state: AppState,
    path: Path<TournamentPath>,
    body: Option<Json<FinalsBody>>,
) -> HttpResponse {
    let mode = body.map(|b| b.mode).unwrap_or_default();
    transition(&state, path.id, |t| initiate_finals(t, mode))
}

#[put("/api/tournaments/{id}/finals/score")]
async fn api_finals_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    transition(&state, path.id, |t| update_finals_score(t, body.side, body.delta))
}

#[post("/api/tournaments/{id}/finals/complete")]
async fn api_finals_complete(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    transition(&state, path.id, complete_finals)
}

/// Export the versioned snapshot (for the client's own storage).
#[get("/api/tournaments/{id}/snapshot")]
async fn api_export_snapshot(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    inspect(&state, path.id, |t| match snapshot::to_json(t) {
        Ok(json) => HttpResponse::Ok().content_type("application/json").body(json),
        Err(e) => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    })
}

/// Restore a tournament from a snapshot; it keeps the id stored in the snapshot.
#[post("/api/snapshots")]
async fn api_import_snapshot(state: AppState, body: String) -> HttpResponse {
    let tournament = match snapshot::from_json(&body) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let response = HttpResponse::Ok().json(&tournament);
    log::info!("Restored tournament {} from snapshot", tournament.id);
    store(&mut g, tournament);
    response
}

/// Drop entries idle for longer than [`INACTIVITY_TIMEOUT`]. Returns how many went.
fn sweep_inactive(entries: &mut HashMap<TournamentId, TournamentEntry>) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
    before - entries.len()
}

/// Sweep every 30 minutes on the actix runtime.
fn spawn_cleanup(state: AppState) {
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = match state.write() {
                Ok(mut entries) => sweep_inactive(&mut entries),
                Err(_) => continue,
            };
            if removed > 0 {
                log::info!("Dropped {} idle tournament(s)", removed);
            }
        }
    });
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

    spawn_cleanup(state.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_import_players)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_toggle_player)
            .service(api_set_settings)
            .service(api_start_tournament)
            .service(api_reset_tournament)
            .service(api_generate_round)
            .service(api_delete_round)
            .service(api_update_score)
            .service(api_complete_match)
            .service(api_edit_match)
            .service(api_save_edit)
            .service(api_cancel_edit)
            .service(api_delete_match)
            .service(api_leaderboard)
            .service(api_initiate_finals)
            .service(api_finals_score)
            .service(api_finals_complete)
            .service(api_export_snapshot)
            .service(api_import_snapshot)
    })
    .bind(bind)?
    .run()
    .await
}
