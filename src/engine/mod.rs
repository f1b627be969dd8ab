mod fare_api;
mod health_api;

use crate::{api::API, entities::PricingTable};

#[derive(Default)]
pub struct Engine {
    pricing: PricingTable,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all, fields(fallback = pricing.fallback()))]
    pub fn new(pricing: PricingTable) -> Self {
        tracing::debug!("engine ready");

        Self { pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }
}

impl API for Engine {}
