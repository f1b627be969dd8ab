use super::Engine;

use crate::{api::HealthAPI, entities::HealthStatus};

impl HealthAPI for Engine {
    fn health(&self) -> HealthStatus {
        HealthStatus::healthy()
    }
}
