use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use crate::config::{AppConfig, ScheduleDefaults};
use crate::display::format_schedule;
use crate::error::AppError;
use crate::parser::clean_names;
use crate::schedule::{generate, resolve_seed, Schedule, ScheduleReport, Score};
use crate::tournament::{compute_standings, slugify, TournamentStore};

/// Shared server state. Every store access goes through the mutex, so result
/// entry on a tournament file is never interleaved with another write.
pub struct AppState {
    pub store: Mutex<TournamentStore>,
    pub defaults: ScheduleDefaults,
}

impl AppState {
    pub fn new(store: TournamentStore, defaults: ScheduleDefaults) -> Self {
        AppState {
            store: Mutex::new(store),
            defaults,
        }
    }

    fn store(&self) -> MutexGuard<'_, TournamentStore> {
        // The store holds no in-memory state a panic could corrupt.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    name: String,
    players: Vec<String>,
    courts: Option<u32>,
    rounds: Option<u32>,
    #[serde(default)]
    shuffle: bool,
    seed: Option<u64>,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    seed: Option<u64>,
    report: ScheduleReport,
    text: String,
}

#[derive(Deserialize)]
pub struct ResultRequest {
    round: usize,
    #[serde(rename = "match")]
    match_index: usize,
    result: Option<Score>,
}

#[derive(Deserialize)]
pub struct ExistsQuery {
    #[serde(default)]
    name: String,
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = serde_json::json!({"error": err.to_string()});
    match err {
        AppError::Validation(_) | AppError::InvalidInput { .. } => HttpResponse::BadRequest().json(body),
        AppError::TournamentNotFound { .. } | AppError::MatchNotFound { .. } => HttpResponse::NotFound().json(body),
        AppError::TournamentExists { .. } => HttpResponse::Conflict().json(body),
        _ => {
            tracing::error!(error = %err, "request failed");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn build_schedule(
    req: &ScheduleRequest,
    defaults: &ScheduleDefaults,
) -> std::result::Result<(Schedule, Option<u64>), AppError> {
    let players = clean_names(req.players.iter().map(String::as_str));
    let seed = resolve_seed(req.shuffle, req.seed);
    let schedule = generate(
        &players,
        req.courts.unwrap_or(defaults.courts),
        req.rounds.unwrap_or(defaults.rounds),
        seed,
    )?;
    Ok((schedule, seed))
}

async fn ping() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

// Generates a schedule without saving it
async fn preview_schedule(
    req: web::Json<ScheduleRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match build_schedule(&req, &state.defaults) {
        Ok((schedule, seed)) => Ok(HttpResponse::Ok().json(ScheduleResponse {
            seed,
            report: schedule.report(),
            text: format_schedule(&schedule),
        })),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn create_tournament(
    req: web::Json<ScheduleRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (schedule, seed) = match build_schedule(&req, &state.defaults) {
        Ok(built) => built,
        Err(e) => return Ok(error_response(&e)),
    };

    match state.store().create(&req.name, &schedule, seed) {
        Ok(tournament) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "id": tournament.id,
            "seed": seed,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_tournaments(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.store().list() {
        Ok(items) => Ok(HttpResponse::Ok().json(serde_json::json!({"tournaments": items}))),
        Err(e) => Ok(error_response(&e)),
    }
}

// Lets a client warn before a named create would be refused
async fn tournament_exists(
    query: web::Query<ExistsQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let exists = state.store().exists(&slugify(&query.name));
    Ok(HttpResponse::Ok().json(serde_json::json!({"exists": exists})))
}

async fn get_tournament(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match state.store().load(&id) {
        Ok(tournament) => Ok(HttpResponse::Ok().json(tournament)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn delete_tournament(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match state.store().delete(&id) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))),
        Err(e) => Ok(error_response(&e)),
    }
}

// Score entry: only the result of one match changes
async fn update_result(
    id: web::Path<String>,
    req: web::Json<ResultRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let store = state.store();
    let outcome = store.load(&id).and_then(|mut tournament| {
        tournament.record_result(req.round, req.match_index, req.result)?;
        store.save(&tournament)?;
        Ok(tournament.progress())
    });

    match outcome {
        Ok(progress) => {
            tracing::info!(id = %id, round = req.round, match_index = req.match_index, "result updated");
            Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok", "progress": progress})))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn get_standings(
    id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match state.store().load(&id) {
        Ok(tournament) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "standings": compute_standings(&tournament),
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/ping", web::get().to(ping))
        .route("/api/schedule", web::post().to(preview_schedule))
        .service(
            web::resource("/api/tournaments")
                .route(web::get().to(list_tournaments))
                .route(web::post().to(create_tournament)),
        )
        .route("/api/tournaments/exists", web::get().to(tournament_exists))
        .service(
            web::resource("/api/tournaments/{id}")
                .route(web::get().to(get_tournament))
                .route(web::delete().to(delete_tournament)),
        )
        .service(web::resource("/api/tournaments/{id}/results").route(web::post().to(update_result)))
        .service(web::resource("/api/tournaments/{id}/standings").route(web::get().to(get_standings)));
}

pub async fn start_server(config: &AppConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(
        TournamentStore::new(&config.storage.tournaments_dir),
        config.schedule.clone(),
    ));

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        dir = %config.storage.tournaments_dir,
        "starting web server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
