// src/services/ledger_service.rs

//! The inventory ledger: stock-health views and the coupling between
//! distribution records and resource stock.
//!
//! Stock checks and decrements run as one guarded store update, so two
//! concurrent distribution requests can never both pass a stale quantity
//! check. When the guard rejects, the caller gets a conflict carrying the
//! live quantity and nothing has changed.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CategoryRepository, DistributionRepository, ResourceRepository},
    models::{
        category::{Category, CategoryStat},
        distribution::{Distribution, DistributionStats, DistributionStatus},
        resource::Resource,
    },
    store::StoreError,
};

#[derive(Clone)]
pub struct LedgerService {
    resources: ResourceRepository,
    distributions: DistributionRepository,
    categories: CategoryRepository,
}

impl LedgerService {
    pub fn new(
        resources: ResourceRepository,
        distributions: DistributionRepository,
        categories: CategoryRepository,
    ) -> Self {
        Self { resources, distributions, categories }
    }

    // --- RESOURCES ---

    pub async fn create_resource(
        &self,
        name: &str,
        category: &str,
        quantity: i64,
        unit: &str,
        unit_value: Decimal,
    ) -> Result<Resource, AppError> {
        self.resources.create(name, category, quantity, unit, unit_value).await
    }

    pub async fn list_resources(&self) -> Result<Vec<Resource>, AppError> {
        self.resources.list().await
    }

    pub async fn get_resource(&self, id: Uuid) -> Result<Resource, AppError> {
        self.resources.find_by_id(id).await?.ok_or(AppError::NotFound("resource"))
    }

    pub async fn update_resource(
        &self,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Resource, AppError> {
        match self.resources.update(id, fields).await {
            Err(AppError::StoreError(StoreError::NotFound)) => Err(AppError::NotFound("resource")),
            other => other,
        }
    }

    pub async fn delete_resource(&self, id: Uuid) -> Result<(), AppError> {
        if self.resources.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("resource"))
        }
    }

    // --- DISTRIBUTIONS ---

    /// Records a handout and decrements the resource's stock by the same
    /// amount. The decrement is the authoritative stock check: it happens
    /// first, atomically, and an insert failure afterwards puts the stock
    /// back.
    pub async fn record_distribution(
        &self,
        resource_id: Uuid,
        quantity: i64,
        recipient: &str,
        location: &str,
        notes: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Distribution, AppError> {
        if quantity <= 0 {
            return Err(AppError::InvalidQuantity);
        }

        let resource = self
            .resources
            .find_by_id(resource_id)
            .await?
            .ok_or(AppError::NotFound("resource"))?;

        match self.resources.adjust_quantity(resource_id, -quantity).await {
            Ok(_) => {}
            Err(StoreError::Guard { current }) => {
                return Err(AppError::InsufficientStock { available: current, requested: quantity });
            }
            Err(StoreError::NotFound) => return Err(AppError::NotFound("resource")),
            Err(e) => return Err(e.into()),
        }

        let total_value = resource.unit_value * Decimal::from(quantity);
        match self
            .distributions
            .create(
                resource_id,
                &resource.name,
                quantity,
                resource.unit_value,
                total_value,
                recipient,
                location,
                notes,
                date,
            )
            .await
        {
            Ok(distribution) => Ok(distribution),
            Err(e) => {
                // The decrement already landed; put the stock back.
                if let Err(restore) = self.resources.adjust_quantity(resource_id, quantity).await {
                    tracing::error!(
                        "failed to restore {quantity} units to resource {resource_id} \
                         after a rejected distribution insert: {restore}"
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn list_distributions(&self) -> Result<Vec<Distribution>, AppError> {
        self.distributions.list().await
    }

    pub async fn get_distribution(&self, id: Uuid) -> Result<Distribution, AppError> {
        self.distributions.find_by_id(id).await?.ok_or(AppError::NotFound("distribution"))
    }

    pub async fn set_distribution_status(
        &self,
        id: Uuid,
        status: DistributionStatus,
    ) -> Result<Distribution, AppError> {
        let mut fields = Map::new();
        fields.insert("status".into(), serde_json::to_value(status).map_err(anyhow::Error::from)?);
        match self.distributions.update(id, fields).await {
            Err(AppError::StoreError(StoreError::NotFound)) => {
                Err(AppError::NotFound("distribution"))
            }
            other => other,
        }
    }

    pub async fn delete_distribution(&self, id: Uuid) -> Result<(), AppError> {
        if self.distributions.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("distribution"))
        }
    }

    // --- STOCK HEALTH ---

    pub async fn low_stock(&self, threshold: i64) -> Result<Vec<Resource>, AppError> {
        let resources = self.resources.list().await?;
        Ok(resources
            .into_iter()
            .filter(|r| r.quantity > 0 && r.quantity <= threshold)
            .collect())
    }

    pub async fn out_of_stock(&self) -> Result<Vec<Resource>, AppError> {
        let resources = self.resources.list().await?;
        Ok(resources.into_iter().filter(|r| r.quantity == 0).collect())
    }

    /// Per-category usage view. Every category present among resources gets
    /// an entry; distributions are attributed to their resource's category.
    pub async fn category_stats(
        &self,
        limit: usize,
        category: Option<&str>,
    ) -> Result<Vec<CategoryStat>, AppError> {
        let resources = self.resources.list().await?;
        let distributions = self.distributions.list().await?;

        let mut stats: HashMap<String, CategoryStat> = HashMap::new();
        let mut resource_category: HashMap<Uuid, String> = HashMap::new();

        for resource in &resources {
            resource_category.insert(resource.id, resource.category.clone());
            let entry = stats
                .entry(resource.category.clone())
                .or_insert_with(|| CategoryStat::empty(resource.category.clone()));
            entry.total_value += resource.unit_value * Decimal::from(resource.quantity);
            entry.resource_count += 1;
            entry.total_quantity += resource.quantity;
        }

        for distribution in &distributions {
            let Some(name) = resource_category.get(&distribution.resource_id) else {
                continue;
            };
            if let Some(entry) = stats.get_mut(name) {
                entry.used_quantity += distribution.quantity;
            }
        }

        let mut stats: Vec<CategoryStat> = stats
            .into_values()
            .map(|mut stat| {
                stat.remaining_quantity = (stat.total_quantity - stat.used_quantity).max(0);
                stat.usage_percent = usage_percent(stat.used_quantity, stat.remaining_quantity);
                stat
            })
            .collect();

        stats.sort_by(|a, b| {
            b.used_quantity
                .cmp(&a.used_quantity)
                .then_with(|| a.category.cmp(&b.category))
        });
        if let Some(filter) = category {
            stats.retain(|stat| stat.category.eq_ignore_ascii_case(filter));
        }
        stats.truncate(limit);
        Ok(stats)
    }

    pub async fn distribution_stats(
        &self,
        category: Option<&str>,
    ) -> Result<DistributionStats, AppError> {
        let distributions = self.distributions.list().await?;

        // Only needed to resolve the category filter.
        let resource_category: HashMap<Uuid, String> = if category.is_some() {
            self.resources
                .list()
                .await?
                .into_iter()
                .map(|r| (r.id, r.category))
                .collect()
        } else {
            HashMap::new()
        };

        let mut result = DistributionStats::default();
        for distribution in distributions {
            if let Some(filter) = category {
                let matches = resource_category
                    .get(&distribution.resource_id)
                    .is_some_and(|name| name.eq_ignore_ascii_case(filter));
                if !matches {
                    continue;
                }
            }
            result.total_distributions += 1;
            result.value_distributed += distribution.total_value;
            result.quantities_distributed += distribution.quantity;
            if distribution.status == DistributionStatus::Pending {
                result.pending_distributions += 1;
            }
        }
        Ok(result)
    }

    // --- CATEGORIES ---

    pub async fn create_category(&self, name: &str) -> Result<Category, AppError> {
        if let Some(existing) = self.categories.find_by_name(name).await? {
            return Err(AppError::DuplicateCategory(existing.name));
        }
        self.categories.create(name).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.categories.list().await
    }

    /// A category still referenced by a resource cannot be deleted. The guard
    /// lives here, at the boundary, not in the store.
    pub async fn delete_category(&self, id: Uuid) -> Result<Category, AppError> {
        let category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("category"))?;

        let in_use = self
            .resources
            .list()
            .await?
            .iter()
            .any(|r| r.category.eq_ignore_ascii_case(&category.name));
        if in_use {
            return Err(AppError::CategoryInUse(category.name));
        }

        self.categories.delete(id).await?;
        Ok(category)
    }
}

fn usage_percent(used: i64, remaining: i64) -> u8 {
    let denominator = used + remaining;
    if denominator <= 0 {
        return 0;
    }
    let percent = (Decimal::from(used) * Decimal::from(100) / Decimal::from(denominator))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    percent.to_u32().map(|p| p.min(100) as u8).unwrap_or(0)
}
