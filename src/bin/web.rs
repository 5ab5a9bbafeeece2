//! Single binary web server: the CRUD shell around the draw engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, patch, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use tournament_draw_web::{
    assign_groups, build_draw, compute_standings, draw_groups, fill_bracket, group_players,
    list_matches, record_result, DrawError, MatchFilter, MatchQuery, MatchStatus, MemoryStore,
    Player, PlayerFilter, PlayerId, PlayerUpdate, Round, Store,
};
use uuid::Uuid;

/// In-memory record store shared across handlers. The engine requires the
/// store to serialize concurrent writes; the RwLock is that guarantee here.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterBody {
    firstname: String,
    lastname: String,
    #[serde(default)]
    affiliation: Option<String>,
    #[serde(default)]
    seed_rank: Option<u32>,
    category: String,
}

/// One row of a bulk registration CSV:
/// firstname,lastname,affiliation,seed_rank,category
#[derive(Deserialize)]
struct RegisterRow {
    firstname: String,
    lastname: String,
    affiliation: Option<String>,
    seed_rank: Option<u32>,
    category: String,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
struct GroupAssignment {
    player_id: PlayerId,
    group_name: String,
}

#[derive(Deserialize)]
struct AssignGroupsBody {
    assignments: Vec<GroupAssignment>,
}

#[derive(Deserialize)]
struct DrawGroupsBody {
    category: String,
    group_count: usize,
}

#[derive(Deserialize)]
struct MatchListQuery {
    category: Option<String>,
    group: Option<String>,
    round: Option<String>,
}

#[derive(Deserialize)]
struct ScoreBody {
    player1_score: u32,
    player2_score: u32,
    #[serde(default)]
    winner_id: Option<PlayerId>,
    #[serde(default)]
    status: Option<MatchStatus>,
}

#[derive(Deserialize)]
struct CategoryQuery {
    category: String,
}

/// Path segment: player id (e.g. /api/players/{id}/approve)
#[derive(Deserialize)]
struct PlayerPath {
    id: Uuid,
}

/// Path segment: match id (e.g. /api/matches/{id}/score)
#[derive(Deserialize)]
struct MatchPath {
    id: Uuid,
}

/// Path segment: category (e.g. /api/tournaments/{category}/draw)
#[derive(Deserialize)]
struct CategoryPath {
    category: String,
}

fn error_response(err: &DrawError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        DrawError::TournamentNotFound(_)
        | DrawError::MatchNotFound(_)
        | DrawError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-draw-web",
    })
}

/// Register a player (created unpaid; approval happens separately).
#[post("/api/players")]
async fn api_register_player(state: AppState, body: Json<RegisterBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let body = body.into_inner();
    let player = g.save_player(Player::new(
        body.firstname,
        body.lastname,
        body.affiliation,
        body.seed_rank,
        body.category,
    ));
    HttpResponse::Ok().json(player)
}

/// Bulk registration from a CSV body (one player per row, header row
/// required: firstname,lastname,affiliation,seed_rank,category).
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: String) -> HttpResponse {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut rows: Vec<RegisterRow> = Vec::new();
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": format!("Bad CSV row: {}", err) }))
            }
        }
    }

    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let players: Vec<Player> = rows
        .into_iter()
        .map(|row| {
            g.save_player(Player::new(
                row.firstname,
                row.lastname,
                row.affiliation,
                row.seed_rank,
                row.category,
            ))
        })
        .collect();
    log::info!("Imported {} player(s) from CSV", players.len());
    HttpResponse::Ok().json(players)
}

/// Payment lookup by name for the front desk: name + paid flag only.
#[get("/api/players/payments/search")]
async fn api_search_payments(state: AppState, query: Query<SearchQuery>) -> HttpResponse {
    if query.query.trim().is_empty() {
        return HttpResponse::Ok().json(Vec::<serde_json::Value>::new());
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let found = g.find_players(&PlayerFilter {
        name_query: Some(query.query.clone()),
        ..PlayerFilter::default()
    });
    let view: Vec<serde_json::Value> = found
        .iter()
        .map(|p| {
            serde_json::json!({
                "firstname": p.firstname,
                "lastname": p.lastname,
                "is_paid": p.is_paid,
            })
        })
        .collect();
    HttpResponse::Ok().json(view)
}

/// Approval queue: players who have not paid yet.
#[get("/api/players/unpaid")]
async fn api_unpaid_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let found = g.find_players(&PlayerFilter {
        is_paid: Some(false),
        ..PlayerFilter::default()
    });
    HttpResponse::Ok().json(found)
}

/// Approve a player's payment.
#[patch("/api/players/{id}/approve")]
async fn api_approve_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_player(
        path.id,
        PlayerUpdate {
            is_paid: Some(true),
            ..PlayerUpdate::default()
        },
    ) {
        Some(player) => HttpResponse::Ok().json(player),
        None => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Player not found" })),
    }
}

/// Players eligible for grouping: paid but not yet in a group.
#[get("/api/players/groups/available")]
async fn api_available_for_grouping(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let found = g.find_players(&PlayerFilter {
        is_paid: Some(true),
        grouped: Some(false),
        ..PlayerFilter::default()
    });
    HttpResponse::Ok().json(found)
}

/// Grouped players, bucketed by group name.
#[get("/api/players/groups")]
async fn api_grouped_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let found = g.find_players(&PlayerFilter {
        grouped: Some(true),
        ..PlayerFilter::default()
    });
    let groups: Vec<serde_json::Value> = group_players(&found)
        .into_iter()
        .map(|(name, members)| serde_json::json!({ "group_name": name, "players": members }))
        .collect();
    HttpResponse::Ok().json(groups)
}

/// Persist admin-chosen group assignments.
#[post("/api/players/groups/assign")]
async fn api_assign_groups(state: AppState, body: Json<AssignGroupsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let assignments: Vec<(PlayerId, String)> = body
        .assignments
        .iter()
        .map(|a| (a.player_id, a.group_name.clone()))
        .collect();
    match assign_groups(&mut *g, &assignments) {
        Ok(()) => {
            HttpResponse::Ok().json(serde_json::json!({ "message": "Groups assigned successfully" }))
        }
        Err(e) => error_response(&e),
    }
}

/// Random group draw: deal paid, ungrouped, unseeded players of a category
/// into N groups.
#[post("/api/players/groups/draw")]
async fn api_draw_groups(state: AppState, body: Json<DrawGroupsBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match draw_groups(&mut *g, &body.category, body.group_count) {
        Ok(assignments) => {
            let view: Vec<serde_json::Value> = assignments
                .iter()
                .map(|(id, group)| serde_json::json!({ "player_id": id, "group_name": group }))
                .collect();
            HttpResponse::Ok().json(view)
        }
        Err(e) => error_response(&e),
    }
}

/// Create the tournament draw for a category: group fixtures plus the seeded
/// knockout skeleton.
#[post("/api/tournaments/{category}/draw")]
async fn api_build_draw(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match build_draw(&mut *g, &path.category) {
        Ok(tournament) => HttpResponse::Ok().json(tournament),
        Err(e) => error_response(&e),
    }
}

/// Fill the round of 16 once the group stage is complete. Precondition
/// failures come back as 200 with `generated: false` so clients can poll.
#[post("/api/tournaments/{category}/bracket")]
async fn api_fill_bracket(state: AppState, path: Path<CategoryPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match fill_bracket(&mut *g, &path.category) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

/// List matches ordered by match_order. `round=bracket` expands to the four
/// knockout rounds; `round=group&group=A` narrows to one group's fixtures.
#[get("/api/matches")]
async fn api_list_matches(state: AppState, query: Query<MatchListQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut match_query = MatchQuery {
        category: query.category.clone(),
        ..MatchQuery::default()
    };
    match query.round.as_deref() {
        Some("bracket") => match_query.rounds = Some(Round::BRACKET.to_vec()),
        Some(raw) => match raw.parse::<Round>() {
            Ok(round) => {
                match_query.round = Some(round);
                if round == Round::Group {
                    match_query.group_name = query.group.clone();
                }
            }
            Err(()) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": format!("Unknown round {}", raw) }))
            }
        },
        None => {}
    }
    match list_matches(&*g, &match_query) {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(e) => error_response(&e),
    }
}

/// Report a match score. Winner derived from the scores unless given
/// explicitly; equal scores without a winner record a tie.
#[patch("/api/matches/{id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match record_result(
        &mut *g,
        path.id,
        body.player1_score,
        body.player2_score,
        body.winner_id,
        body.status,
    ) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => error_response(&e),
    }
}

/// Current group standings for a category (completed matches only).
#[get("/api/standings")]
async fn api_standings(state: AppState, query: Query<CategoryQuery>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournament = match g.find_tournament(&query.category) {
        Some(t) => t,
        None => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("No tournament found for category {}", query.category)
            }))
        }
    };
    let completed = g.find_matches(
        &MatchFilter::in_tournament(tournament.id)
            .round(Round::Group)
            .status(MatchStatus::Completed),
    );
    let standings: Vec<serde_json::Value> = compute_standings(&completed)
        .into_iter()
        .map(|(name, rows)| serde_json::json!({ "group_name": name, "standings": rows }))
        .collect();
    HttpResponse::Ok().json(standings)
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

    let state = Data::new(RwLock::new(MemoryStore::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_register_player)
            .service(api_import_players)
            .service(api_search_payments)
            .service(api_unpaid_players)
            .service(api_approve_player)
            .service(api_available_for_grouping)
            .service(api_grouped_players)
            .service(api_assign_groups)
            .service(api_draw_groups)
            .service(api_build_draw)
            .service(api_fill_bracket)
            .service(api_list_matches)
            .service(api_record_score)
            .service(api_standings)
    })
    .bind(bind)?
    .run()
    .await
}
