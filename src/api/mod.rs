use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write as _;
use std::net::IpAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{LogLevel, ServerConfig};
use crate::core::{BreakevenResult, TrajectoryRow, run_breakeven};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Parser, Debug)]
#[command(
    name = "breakeven",
    version,
    about = "Social Security claiming breakeven calculator with invested benefits"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "BREAKEVEN_LOG_LEVEL",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Info,
        help = "Log level"
    )]
    pub log_level: LogLevel,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Serve the web calculator and JSON API")]
    Serve(ServeArgs),
    #[command(about = "Print the breakeven age and cumulative benefit table")]
    Compute(BreakevenArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "BREAKEVEN_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "BREAKEVEN_PORT", default_value_t = 8080)]
    pub port: u16,
}

#[derive(Args, Debug, Clone)]
pub struct BreakevenArgs {
    #[arg(
        long,
        default_value_t = 2000.0,
        help = "Monthly benefit at full retirement age (67)"
    )]
    pub benefit_fra: f64,
    #[arg(
        long,
        default_value_t = 6.0,
        allow_negative_numbers = true,
        help = "Annual investment return in percent, e.g. 6"
    )]
    pub annual_return: f64,
    #[arg(long, default_value_t = 62, help = "Earlier claiming age")]
    pub start_age_early: u32,
    #[arg(long, default_value_t = 67, help = "Later claiming age")]
    pub start_age_late: u32,
    #[arg(long, default_value_t = 100, help = "Age to simulate through")]
    pub max_age: u32,
}

impl Default for BreakevenArgs {
    fn default() -> Self {
        Self {
            benefit_fra: 2_000.0,
            annual_return: 6.0,
            start_age_early: 62,
            start_age_late: 67,
            max_age: 100,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    #[serde(deserialize_with = "non_null")]
    benefit_fra: Option<f64>,
    #[serde(deserialize_with = "non_null")]
    annual_return: Option<f64>,
    #[serde(deserialize_with = "non_null")]
    start_age_early: Option<u32>,
    #[serde(deserialize_with = "non_null")]
    start_age_late: Option<u32>,
    #[serde(deserialize_with = "non_null")]
    max_age: Option<u32>,
}

// Absent fields fall back to defaults; an explicit null is an error.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom("expected a number, got null"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    benefit_fra: f64,
    annual_return: f64,
    start_age_early: u32,
    start_age_late: u32,
    max_age: u32,
    early_monthly_benefit: f64,
    late_monthly_benefit: f64,
    ages: Vec<u32>,
    early_trajectory: Vec<f64>,
    late_trajectory: Vec<f64>,
    breakeven_age: Option<u32>,
    message: String,
    rows: Vec<TrajectoryRow>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn run_from_args(args: &BreakevenArgs) -> Result<BreakevenResult, String> {
    run_breakeven(
        args.benefit_fra,
        args.annual_return / 100.0,
        args.start_age_early,
        args.start_age_late,
        args.max_age,
    )
    .map_err(|e| e.to_string())
}

pub fn render_report(result: &BreakevenResult) -> String {
    let early_header = format!("Cumulative Benefit (Age {})", result.early_claim_age);
    let late_header = format!("Cumulative Benefit (Age {})", result.late_claim_age);
    let early_width = early_header.len();
    let late_width = late_header.len();

    let mut out = String::new();
    let _ = writeln!(out, "{}", result.summary());
    let _ = writeln!(
        out,
        "Monthly benefit: {:.2} at {}, {:.2} at {}",
        result.early_monthly_benefit,
        result.early_claim_age,
        result.late_monthly_benefit,
        result.late_claim_age
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>4}  {early_header}  {late_header}", "Age");
    for row in result.rows() {
        let _ = writeln!(
            out,
            "{:>4}  {:>early_width$.2}  {:>late_width$.2}",
            row.age, row.early_value, row.late_value
        );
    }
    out
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "breakeven HTTP API listening");
    info!("Local access: http://127.0.0.1:{}/", config.port);

    axum::serve(listener, router()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(
    payload: Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => simulate_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

async fn simulate_post_handler(payload: Result<Json<SimulatePayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => simulate_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let args = args_from_payload(payload);
    match run_from_args(&args) {
        Ok(result) => json_response(StatusCode::OK, build_simulate_response(&args, result)),
        Err(msg) => bad_request(&msg),
    }
}

fn bad_request(msg: &str) -> Response {
    warn!(error = %msg, "rejected simulation request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn args_from_payload(payload: SimulatePayload) -> BreakevenArgs {
    let mut args = BreakevenArgs::default();

    if let Some(v) = payload.benefit_fra {
        args.benefit_fra = v;
    }
    if let Some(v) = payload.annual_return {
        args.annual_return = v;
    }
    if let Some(v) = payload.start_age_early {
        args.start_age_early = v;
    }
    if let Some(v) = payload.start_age_late {
        args.start_age_late = v;
    }
    if let Some(v) = payload.max_age {
        args.max_age = v;
    }

    args
}

fn build_simulate_response(args: &BreakevenArgs, result: BreakevenResult) -> SimulateResponse {
    let message = result.summary();
    let ages = result.ages().collect();
    let rows = result.rows();

    SimulateResponse {
        benefit_fra: args.benefit_fra,
        annual_return: args.annual_return,
        start_age_early: result.early_claim_age,
        start_age_late: result.late_claim_age,
        max_age: args.max_age,
        early_monthly_benefit: result.early_monthly_benefit,
        late_monthly_benefit: result.late_monthly_benefit,
        ages,
        early_trajectory: result.early_trajectory,
        late_trajectory: result.late_trajectory,
        breakeven_age: result.breakeven_age,
        message,
        rows,
    }
}
