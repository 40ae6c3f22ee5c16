//! Admin API 日志查看端点

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{error, trace};

use crate::services::{LogTail, LogTailResult};

use super::error_code::ErrorCode;
use super::helpers::{error_from_linklister, json_response, success_response};

/// 行数上限，避免一次读出整个日志文件
const MAX_TAIL_LINES: usize = 5000;

async fn tail_response(log_tail: &LogTail, line_count: Option<usize>) -> HttpResponse {
    let line_count = line_count.map(|n| n.clamp(1, MAX_TAIL_LINES));
    trace!("Admin API: tailing {:?} log lines", line_count);

    match log_tail.tail(line_count).await {
        Ok(LogTailResult::Unavailable { message }) => json_response(
            StatusCode::NOT_FOUND,
            ErrorCode::LogUnavailable,
            message.clone(),
            Some(LogTailResult::Unavailable { message }),
        ),
        Ok(lines) => success_response(lines),
        Err(e) => {
            error!("Admin API: failed to read log file: {}", e);
            error_from_linklister(&e)
        }
    }
}

/// `GET /logs`
pub async fn get_logs(log_tail: web::Data<LogTail>) -> ActixResult<impl Responder> {
    Ok(tail_response(&log_tail, None).await)
}

/// `GET /logs/{line_count}`
pub async fn get_logs_n(
    log_tail: web::Data<LogTail>,
    path: web::Path<usize>,
) -> ActixResult<impl Responder> {
    Ok(tail_response(&log_tail, Some(path.into_inner())).await)
}
