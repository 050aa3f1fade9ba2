// core/shorts-service/src/handlers/channels.rs
// Channel shorts and channel search endpoints

use std::future::Future;

use actix_web::{web, HttpResponse};
use tracing::Instrument;
use ziktok_common::{generate_request_id, log_failure, log_success, LogContext, ServiceError};

use crate::state::AppState;

/// Runs `work` on its own task: a client that disconnects mid-pipeline does
/// not abort the upstream calls or the cache write.
async fn run_detached<T, F>(work: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>> + 'static,
    T: 'static,
{
    actix_web::rt::spawn(work)
        .await
        .map_err(|e| ServiceError::InternalError(e.to_string()))?
}

pub async fn get_shorts(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let channel_id = path.into_inner();
    let ctx = LogContext::new(generate_request_id()).with_channel(channel_id.as_str());
    let span = tracing::info_span!(
        "get_shorts",
        request_id = %ctx.request_id,
        channel_id = %channel_id
    );

    let work = {
        let data = data.clone();
        let ctx = ctx.clone();
        async move { data.shorts.get_shorts(&ctx, &channel_id).await }.instrument(span)
    };

    match run_detached(work).await {
        Ok(result) => {
            let details = format!("{} shorts", result.shorts.len());
            log_success(&ctx, "get_shorts", Some(&details));
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            log_failure(&ctx, "get_shorts", e.error_code(), &e.to_string());
            data.metrics.record_error(e.error_code(), "get_shorts");
            Err(e)
        }
    }
}

pub async fn search_channels(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let query = path.into_inner();
    let ctx = LogContext::new(generate_request_id()).with_query(query.as_str());
    let span = tracing::info_span!("search_channels", request_id = %ctx.request_id);

    let work = {
        let data = data.clone();
        let ctx = ctx.clone();
        async move { data.shorts.search_channels(&ctx, &query).await }.instrument(span)
    };

    match run_detached(work).await {
        Ok(result) => {
            let details = format!("{} channels", result.channels.len());
            log_success(&ctx, "search_channels", Some(&details));
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            log_failure(&ctx, "search_channels", e.error_code(), &e.to_string());
            data.metrics.record_error(e.error_code(), "search_channels");
            Err(e)
        }
    }
}
