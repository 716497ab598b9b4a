//! Repository for the `order_items` table.
//!
//! Side-effect-only at the storage boundary: no business validation lives
//! here. Existence checks and status validation belong to the service; a
//! repository error always means the storage operation itself failed.

use async_trait::async_trait;
use sqlx::PgPool;

use comanda_core::status::OrderStatus;
use comanda_core::types::DbId;

use crate::models::order_item::{NewOrderItem, OrderItem};

/// Column list for order_items queries.
const COLUMNS: &str = "id, ticket_id, product, quantity, note, unit_price, status, updated_at";

/// Storage operations on order items.
///
/// Constructed with an explicit storage handle and injected into the
/// service, so tests can substitute an in-memory implementation.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All items not yet archived, newest-first by row id. An empty vec is
    /// a valid result, not an error.
    async fn list_active(&self) -> Result<Vec<OrderItem>, sqlx::Error>;

    /// All archived items, newest-first by `updated_at`.
    async fn list_archived(&self) -> Result<Vec<OrderItem>, sqlx::Error>;

    /// All items of one ticket. An empty vec means the ticket does not
    /// exist; the caller decides whether that is an error.
    async fn find_by_ticket(&self, ticket_id: &str) -> Result<Vec<OrderItem>, sqlx::Error>;

    /// Set the status of every item sharing `ticket_id`, refreshing
    /// `updated_at`. Returns the number of rows touched.
    async fn update_whole_ticket(
        &self,
        ticket_id: &str,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error>;

    /// Same, additionally scoped by product name. Product is not unique
    /// within a ticket: duplicate lines of the same product all update.
    async fn update_single_item(
        &self,
        ticket_id: &str,
        product: &str,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error>;

    /// Same, scoped by unique row id for precise single-line targeting.
    /// The ticket id is kept in the predicate so a stale row id from
    /// another ticket cannot match.
    async fn update_single_row(
        &self,
        ticket_id: &str,
        row_id: DbId,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error>;

    /// Insert one item. Status is forced to `pending` regardless of caller
    /// input; returns the created row.
    async fn create(&self, item: &NewOrderItem) -> Result<OrderItem, sqlx::Error>;
}

/// Postgres-backed [`OrderRepository`].
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list_active(&self) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM order_items
             WHERE status != 'archived'
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn list_archived(&self) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM order_items
             WHERE status = 'archived'
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_ticket(&self, ticket_id: &str) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM order_items WHERE ticket_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_whole_ticket(
        &self,
        ticket_id: &str,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE order_items SET status = $2, updated_at = NOW()
             WHERE ticket_id = $1",
        )
        .bind(ticket_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_single_item(
        &self,
        ticket_id: &str,
        product: &str,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE order_items SET status = $3, updated_at = NOW()
             WHERE ticket_id = $1 AND product = $2",
        )
        .bind(ticket_id)
        .bind(product)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn update_single_row(
        &self,
        ticket_id: &str,
        row_id: DbId,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE order_items SET status = $3, updated_at = NOW()
             WHERE ticket_id = $1 AND id = $2",
        )
        .bind(ticket_id)
        .bind(row_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn create(&self, item: &NewOrderItem) -> Result<OrderItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_items (ticket_id, product, quantity, note, unit_price, status)
             VALUES ($1, $2, $3, $4, $5, 'pending')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(&item.ticket_id)
            .bind(&item.product)
            .bind(item.quantity)
            .bind(&item.note)
            .bind(item.unit_price)
            .fetch_one(&self.pool)
            .await
    }
}
