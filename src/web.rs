use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use actix_files::Files;
use serde::{Deserialize, Serialize};
use crate::config::AppConfig;
use crate::error::SheetError;
use crate::form::{commit_housekeeper_number, snapshot_from_form, validate_submission, worklog_filename, worklog_json};
use crate::parser::{read_snapshot, CatalogRoom, FloorRow, RoomCatalog};
use crate::sheet::{mute_floor, summarize, Housekeeper, SheetSnapshot, TimingConfig};

/// Read-only state shared by every worker
pub struct AppState {
    pub catalog: RoomCatalog,
}

#[derive(Serialize)]
pub struct RoomsResponse<'a> {
    success: bool,
    floors: Vec<FloorRow>,
    rooms: &'a [CatalogRoom],
    timing: TimingConfig,
    blank_sheet: SheetSnapshot,
}

#[derive(Deserialize)]
pub struct NumberEdit {
    housekeepers: Vec<Housekeeper>,
    position: usize,
    value: String,
}

#[derive(Deserialize)]
pub struct MuteFloorRequest {
    snapshot: SheetSnapshot,
    floor: String,
}

/// Maps a sheet error to its JSON response
fn error_response(err: &SheetError) -> HttpResponse {
    let body = serde_json::json!({"success": false, "error": err.to_string()});
    match err {
        SheetError::DuplicateNumber(_) => HttpResponse::Conflict().json(body),
        e if e.is_validation() => HttpResponse::BadRequest().json(body),
        SheetError::Json(_) => HttpResponse::BadRequest().json(body),
        _ => {
            log::error!("request failed: {}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

// Room grid and default timings
async fn get_rooms(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(RoomsResponse {
        success: true,
        floors: state.catalog.floors_descending(),
        rooms: &state.catalog.rooms,
        timing: state.catalog.timing,
        blank_sheet: state.catalog.empty_snapshot(),
    }))
}

async fn post_summary(snapshot: web::Json<SheetSnapshot>) -> Result<HttpResponse> {
    let summary = summarize(&snapshot);
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true, "summary": summary})))
}

// Form submission preview: validates, then returns the summary with any warnings
async fn post_preview(
    form: web::Form<Vec<(String, String)>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let snapshot = snapshot_from_form(&form, &state.catalog);
    match validate_submission(&snapshot) {
        Ok(warnings) => {
            let warning_text: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "summary": summarize(&snapshot),
                "warnings": warnings,
                "messages": warning_text,
            })))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn post_housekeeper_number(edit: web::Json<NumberEdit>) -> Result<HttpResponse> {
    let NumberEdit { mut housekeepers, position, value } = edit.into_inner();
    match commit_housekeeper_number(&mut housekeepers, position, &value) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "housekeepers": housekeepers,
        }))),
        Err(e) => Ok(HttpResponse::Conflict().json(serde_json::json!({
            "success": false,
            "error": e.to_string(),
            "housekeepers": housekeepers,
        }))),
    }
}

async fn post_mute_floor(req: web::Json<MuteFloorRequest>) -> Result<HttpResponse> {
    let MuteFloorRequest { mut snapshot, floor } = req.into_inner();
    match mute_floor(&mut snapshot, &floor) {
        Ok(changed) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "changed": changed,
            "summary": summarize(&snapshot),
            "snapshot": snapshot,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

// Worklog save: the sheet as a JSON attachment, from a snapshot or the posted form
async fn post_worklog(
    sheet: web::Either<web::Json<SheetSnapshot>, web::Form<Vec<(String, String)>>>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let snapshot = match sheet {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => snapshot_from_form(&form, &state.catalog),
    };
    let body = match worklog_json(&snapshot) {
        Ok(body) => body,
        Err(e) => return Ok(error_response(&e)),
    };
    let filename = worklog_filename(chrono::Local::now().naive_local());
    log::info!("saving worklog {} ({} rooms)", filename, snapshot.rooms.len());

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body))
}

// Worklog restore: the uploaded file becomes the current sheet
async fn post_worklog_restore(body: web::Bytes) -> Result<HttpResponse> {
    match read_snapshot(&body[..]) {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "summary": summarize(&snapshot),
            "snapshot": snapshot,
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

/// API routes, shared by the server and handler tests
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/rooms", web::get().to(get_rooms))
        .route("/api/summary", web::post().to(post_summary))
        .route("/api/preview", web::post().to(post_preview))
        .route("/api/housekeepers/number", web::post().to(post_housekeeper_number))
        .route("/api/mute-floor", web::post().to(post_mute_floor))
        .route("/api/worklog", web::post().to(post_worklog))
        .route("/api/worklog/restore", web::post().to(post_worklog_restore));
}

pub async fn start_server(config: AppConfig, catalog: RoomCatalog) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { catalog });
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .service(Files::new("/static", static_dir.clone()).show_files_listing())
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
