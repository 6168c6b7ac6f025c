// rest/routes/health.rs — liveness root route.

use axum::Json;
use serde_json::{json, Value};

pub async fn liveness() -> Json<Value> {
    Json(json!({ "msg": "API ToDo rodando" }))
}
