//! Schedules API Lambda - list and create travel schedules.
//!
//! Endpoints:
//! - GET /schedule - List the schedules the user may edit, one page at a time
//! - POST /schedule - Create a schedule owned by the user

use std::sync::Arc;

use lambda_http::aws_lambda_events::query_map::QueryMap;
use lambda_http::{run, service_fn, Body, Request, RequestExt, Response};
use shared::store::{DynamoStore, ScheduleStore};
use shared::{
    error_response, json_response, new_schedule_id, ApiMessage, Config, Error, Schedule,
    ScheduleSummary,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_PAGE_SIZE: i64 = 20;

/// Query parameters accepted by the list operation.
#[derive(Debug)]
struct ListRequest {
    user_id: String,
    page_size: i64,
    page_no: i64,
}

impl ListRequest {
    fn from_query(params: &QueryMap) -> Result<Self, Error> {
        let user_id = params
            .first("userId")
            .ok_or(Error::MissingUserId)?
            .to_string();
        let page_size = parse_count(params.first("pageSize"), DEFAULT_PAGE_SIZE)?;
        let page_no = parse_count(params.first("pageNo"), 0)?;
        Ok(Self {
            user_id,
            page_size,
            page_no,
        })
    }
}

/// Query parameters accepted by the create operation.
#[derive(Debug)]
struct CreateRequest {
    user_id: String,
    target_area: String,
    schedule_title: String,
}

impl CreateRequest {
    fn from_query(params: &QueryMap) -> Result<Self, Error> {
        let user_id = params
            .first("userId")
            .ok_or(Error::MissingUserId)?
            .to_string();
        Ok(Self {
            user_id,
            target_area: params.first("targetArea").unwrap_or_default().to_string(),
            schedule_title: params
                .first("scheduleTitle")
                .unwrap_or_default()
                .to_string(),
        })
    }
}

fn parse_count(raw: Option<&str>, default: i64) -> Result<i64, Error> {
    match raw {
        Some(value) => value.parse().map_err(|_| Error::MalformedRequest),
        None => Ok(default),
    }
}

/// Page formula `[pageNo*pageSize, min((pageNo+1)*pageSize, len))`, unclamped;
/// a window that is empty or starts out of range selects nothing.
fn page_window(ids: &[String], page_size: i64, page_no: i64) -> &[String] {
    let len = ids.len() as i64;
    let start = page_no.saturating_mul(page_size);
    let end = page_no
        .saturating_add(1)
        .saturating_mul(page_size)
        .min(len);
    if start < 0 || start >= len || end <= start {
        return &[];
    }
    &ids[start as usize..end as usize]
}

/// List one page of the schedules visible to the user.
async fn list_schedules(
    store: &dyn ScheduleStore,
    request: &ListRequest,
) -> Result<Vec<ScheduleSummary>, Error> {
    let user = store
        .get_user(&request.user_id)
        .await?
        .ok_or(Error::UserNotFound)?;

    if user.editable_schedules.is_empty() {
        return Ok(Vec::new());
    }

    let ids = page_window(&user.editable_schedules, request.page_size, request.page_no);
    store.batch_get_schedules(ids).await
}

/// Create a schedule owned by the user.
///
/// The owner's `editableSchedules` list is left untouched; linking the new
/// schedule to the user is the job of a separate editor-management process.
async fn create_schedule(
    store: &dyn ScheduleStore,
    request: &CreateRequest,
) -> Result<Schedule, Error> {
    let schedule_id = new_schedule_id();

    let user = store
        .get_user(&request.user_id)
        .await?
        .ok_or(Error::UserNotFound)?;

    let schedule = Schedule::new(
        schedule_id,
        &user,
        request.target_area.clone(),
        request.schedule_title.clone(),
    );
    store.put_schedule(&schedule).await?;
    Ok(schedule)
}

async fn handle_list(
    store: &dyn ScheduleStore,
    params: &QueryMap,
) -> Result<Response<Body>, lambda_http::Error> {
    let request = match ListRequest::from_query(params) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };
    match list_schedules(store, &request).await {
        Ok(summaries) => json_response(200, &summaries),
        Err(e) => error_response(&e),
    }
}

async fn handle_create(
    store: &dyn ScheduleStore,
    params: &QueryMap,
) -> Result<Response<Body>, lambda_http::Error> {
    let request = match CreateRequest::from_query(params) {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };
    match create_schedule(store, &request).await {
        Ok(schedule) => {
            // The schedule rides inside the envelope as a JSON *string*;
            // clients depend on this double encoding.
            let encoded = serde_json::to_string(&schedule)?;
            json_response(
                200,
                &ApiMessage {
                    code: 200,
                    msg: encoded,
                },
            )
        }
        Err(e) => error_response(&e),
    }
}

async fn handler(
    state: Arc<AppState>,
    event: Request,
) -> Result<Response<Body>, lambda_http::Error> {
    let method = event.method().as_str().to_uppercase();
    info!(%method, path = %event.uri().path(), "schedules request");

    let params = event.query_string_parameters();
    match method.as_str() {
        "GET" => handle_list(state.store.as_ref(), &params).await,
        "POST" => handle_create(state.store.as_ref(), &params).await,
        other => error_response(&Error::UnsupportedMethod(other.to_string())),
    }
}

/// Application state shared across invocations.
struct AppState {
    store: Arc<dyn ScheduleStore>,
}

impl AppState {
    async fn new() -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_dynamodb::Client::new(&aws_config);
        let config = Config::from_env();
        Self {
            store: Arc::new(DynamoStore::new(client, &config)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
