// /api/items 以下のルート定義

use super::state::AppState;
use crate::core::{BatchProcessor, FailureKind, Item, ItemId, ProcessingError};
use crate::engine::JobHandle;
use crate::services::items::error_messages;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// エラーレスポンスのボディ
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessedCountBody {
    pub processed_count: u64,
}

/// アイテム関連のルートを登録
///
/// 固定パスは `/{id}` より先に登録する
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/items")
            .route("", web::get().to(list_items))
            .route("", web::post().to(create_item))
            .route("/process", web::get().to(process_items))
            .route("/processed-count", web::get().to(processed_count))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item)),
    );
}

/// エラーをステータスコードに変換
pub fn error_response(error: &ProcessingError) -> HttpResponse {
    match error.kind() {
        FailureKind::NotFound => HttpResponse::NotFound().json(ErrorBody {
            error: error.to_string(),
        }),
        FailureKind::Validation => {
            HttpResponse::BadRequest().json(error_messages(std::slice::from_ref(error)))
        }
        _ => {
            error!(error = %error, "Request failed");
            HttpResponse::InternalServerError().json(ErrorBody {
                error: error.to_string(),
            })
        }
    }
}

async fn list_items(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(match state.items.find_all().await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => error_response(&e),
    })
}

async fn create_item(
    state: web::Data<AppState>,
    body: web::Json<Item>,
) -> ActixResult<HttpResponse> {
    Ok(match state.items.create(body.into_inner()).await {
        Ok(item) => HttpResponse::Created().json(item),
        Err(e) => error_response(&e),
    })
}

async fn get_item(state: web::Data<AppState>, path: web::Path<ItemId>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    Ok(match state.items.find_by_id(id).await {
        Ok(Some(item)) => HttpResponse::Ok().json(item),
        Ok(None) => error_response(&ProcessingError::item_not_found(id)),
        Err(e) => error_response(&e),
    })
}

async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
    body: web::Json<Item>,
) -> ActixResult<HttpResponse> {
    Ok(match state.items.update(path.into_inner(), body.into_inner()).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => error_response(&e),
    })
}

async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<ItemId>,
) -> ActixResult<HttpResponse> {
    Ok(match state.items.delete_by_id(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(&e),
    })
}

/// バッチジョブを開始し、完了まで待って処理済みアイテムを返す
async fn process_items(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Batch processing requested");

    let job = JobHandle::spawn(Arc::clone(&state.processor));
    Ok(match job.wait().await {
        Ok(report) => {
            if !report.is_complete_success() {
                warn!(
                    not_found = report.not_found_count,
                    failed = report.failure_count,
                    "Some items were not processed"
                );
            }
            HttpResponse::Ok().json(report.into_items())
        }
        Err(e) => error_response(&e),
    })
}

async fn processed_count(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ProcessedCountBody {
        processed_count: state.processor.processed_count(),
    }))
}
