//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, OfferId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::offer::{NewOffer, Offer};
use crate::domain::repository::{OfferFilter, OfferRepository};
use crate::error::JobsResult;

const OFFER_COLUMNS: &str =
    "offer_id, owner_id, title, description, salary, skills, created_at, active";

/// PostgreSQL-backed offer repository
#[derive(Clone)]
pub struct PgJobsRepository {
    pool: PgPool,
}

impl PgJobsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OfferRepository for PgJobsRepository {
    async fn insert(&self, offer: NewOffer) -> JobsResult<Offer> {
        let created_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO offers (
                offer_id,
                owner_id,
                title,
                description,
                salary,
                skills,
                active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING created_at
            "#,
        )
        .bind(offer.offer_id.as_uuid())
        .bind(offer.owner_id.as_uuid())
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(offer.salary)
        .bind(&offer.skills)
        .bind(offer.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(offer.into_offer(created_at))
    }

    async fn find_by_id(&self, offer_id: &OfferId) -> JobsResult<Option<Offer>> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE offer_id = $1"
        ))
        .bind(offer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OfferRow::into_offer))
    }

    async fn list_active(&self) -> JobsResult<Vec<Offer>> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE active ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OfferRow::into_offer).collect())
    }

    async fn list_filtered(&self, filter: &OfferFilter) -> JobsResult<Vec<Offer>> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {OFFER_COLUMNS} FROM offers WHERE TRUE"
        ));

        if let Some(owner_id) = &filter.owner_id {
            query.push(" AND owner_id = ").push_bind(*owner_id.as_uuid());
        }
        if let Some(active) = filter.active {
            query.push(" AND active = ").push_bind(active);
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search));
            query
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        query.push(" ORDER BY created_at DESC");

        let rows = query
            .build_query_as::<OfferRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(OfferRow::into_offer).collect())
    }

    async fn delete_owned(&self, offer_id: &OfferId, owner_id: &AccountId) -> JobsResult<Option<Offer>> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            "DELETE FROM offers WHERE offer_id = $1 AND owner_id = $2 RETURNING {OFFER_COLUMNS}"
        ))
        .bind(offer_id.as_uuid())
        .bind(owner_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OfferRow::into_offer))
    }
}

/// `ILIKE` wildcards in user input match literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct OfferRow {
    offer_id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    salary: Option<Decimal>,
    skills: Vec<String>,
    created_at: DateTime<Utc>,
    active: bool,
}

impl OfferRow {
    fn into_offer(self) -> Offer {
        Offer {
            offer_id: OfferId::from_uuid(self.offer_id),
            owner_id: AccountId::from_uuid(self.owner_id),
            title: self.title,
            description: self.description,
            salary: self.salary,
            skills: self.skills,
            created_at: self.created_at,
            active: self.active,
        }
    }
}
