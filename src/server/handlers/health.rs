use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::HealthStatus;

pub async fn check(Extension(api): Extension<DynAPI>) -> Json<HealthStatus> {
    api.health().into()
}
