//! Order business rules: listing modes, status-transition validation,
//! creation validation, ticket grouping, statistics.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use comanda_core::error::OrderError;
use comanda_core::order::{validate_new_order, DEFAULT_NOTE, SCOPE_ALL};
use comanda_core::status::OrderStatus;
use comanda_core::ticket::group_by_ticket;
use comanda_core::types::DbId;
use comanda_db::models::order_item::{ChangeOrderStatus, CreateOrder, NewOrderItem, OrderItem};
use comanda_db::repositories::OrderRepository;

use crate::error::AppResult;

/// Listing mode selecting the board (active) or history (archived) view.
/// Anything unrecognized falls back to the board.
pub const MODE_BOARD: &str = "board";
pub const MODE_HISTORY: &str = "history";

/// Scope of a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateScope {
    /// Every item sharing the ticket id.
    WholeTicket,
    /// Every line of one product within the ticket (legacy best-effort:
    /// duplicate lines of the same product all update).
    Product(String),
    /// Exactly one line, by row id.
    Row(DbId),
}

impl UpdateScope {
    /// Resolve the wire fields: an explicit `itemId` wins, then a product
    /// name other than `"ALL"`, otherwise the whole ticket.
    pub fn from_request(request: &ChangeOrderStatus) -> Self {
        if let Some(row_id) = request.item_id {
            return UpdateScope::Row(row_id);
        }
        match request.product.as_deref() {
            None => UpdateScope::WholeTicket,
            Some(p) if p == SCOPE_ALL => UpdateScope::WholeTicket,
            Some(p) => UpdateScope::Product(p.to_string()),
        }
    }
}

/// Confirmation returned for a successful status change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeReceipt {
    pub ticket_id: String,
    pub status: OrderStatus,
    pub items_updated: u64,
}

/// Confirmation returned for a successful creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceipt {
    pub ticket_id: String,
    pub item_id: DbId,
}

/// Per-status counts over the active listing. Archived items are excluded
/// by definition of "active" and never appear here.
#[derive(Debug, Default, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub in_preparation: usize,
    pub completed: usize,
}

/// Statistics over the active listing.
#[derive(Debug, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub by_status: StatusBreakdown,
}

/// Order business rules over an injected [`OrderRepository`].
pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List items for the requested mode: `"history"` returns the archived
    /// view, everything else the active board.
    pub async fn list_orders(&self, mode: &str) -> AppResult<Vec<OrderItem>> {
        let items = if mode == MODE_HISTORY {
            self.repo.list_archived().await?
        } else {
            self.repo.list_active().await?
        };
        Ok(items)
    }

    /// The active board folded into tickets: `ticket_id → items`, in the
    /// listing's encounter order. Derived on every call, never persisted.
    pub async fn board_by_ticket(&self) -> AppResult<IndexMap<String, Vec<OrderItem>>> {
        let active = self.repo.list_active().await?;
        Ok(group_by_ticket(active, |item| item.ticket_id.as_str()))
    }

    /// Apply a status change to a ticket or a single line within it.
    ///
    /// Validation order: target status first (no I/O), then ticket
    /// existence, then the scoped update. Re-applying the same status to
    /// the same scope is idempotent. Any enumerated status is accepted
    /// regardless of the current one; forward-only sequencing is the board
    /// UI's concern.
    pub async fn change_status(
        &self,
        ticket_id: &str,
        status: &str,
        scope: UpdateScope,
    ) -> AppResult<StatusChangeReceipt> {
        let Some(target) = OrderStatus::parse(status) else {
            return Err(OrderError::InvalidStatus(status.to_string()).into());
        };

        let existing = self.repo.find_by_ticket(ticket_id).await?;
        if existing.is_empty() {
            return Err(OrderError::NotFound(ticket_id.to_string()).into());
        }

        let items_updated = match &scope {
            UpdateScope::WholeTicket => self.repo.update_whole_ticket(ticket_id, target).await,
            UpdateScope::Product(product) => {
                self.repo.update_single_item(ticket_id, product, target).await
            }
            UpdateScope::Row(row_id) => {
                self.repo.update_single_row(ticket_id, *row_id, target).await
            }
        }
        .map_err(|err| {
            tracing::error!(error = %err, ticket_id, status = %target, "Status update failed");
            OrderError::UpdateFailed
        })?;

        tracing::info!(ticket_id, status = %target, items_updated, "Order status changed");

        Ok(StatusChangeReceipt {
            ticket_id: ticket_id.to_string(),
            status: target,
            items_updated,
        })
    }

    /// Create one order line. Required fields are checked in the order
    /// `ticketId → product → quantity`; the note defaults to the sentinel
    /// and the unit price to zero. The new line always starts `pending`.
    pub async fn create_order(&self, input: CreateOrder) -> AppResult<CreateReceipt> {
        let (ticket_id, product, quantity) = validate_new_order(
            input.ticket_id.as_deref(),
            input.product.as_deref(),
            input.quantity,
        )?;

        let item = NewOrderItem {
            ticket_id: ticket_id.to_string(),
            product: product.to_string(),
            quantity,
            note: input.note.unwrap_or_else(|| DEFAULT_NOTE.to_string()),
            unit_price: input.unit_price.unwrap_or(Decimal::ZERO),
        };

        let created = self.repo.create(&item).await.map_err(|err| {
            tracing::error!(error = %err, ticket_id = %item.ticket_id, "Order creation failed");
            OrderError::CreateFailed
        })?;

        tracing::info!(
            ticket_id = %created.ticket_id,
            item_id = created.id,
            product = %created.product,
            "Order line created"
        );

        Ok(CreateReceipt {
            ticket_id: created.ticket_id,
            item_id: created.id,
        })
    }

    /// Totals over the active listing, broken down by the three board
    /// statuses. Rows carrying an unexpected status string count toward
    /// the total but not the breakdown.
    pub async fn statistics(&self) -> AppResult<OrderStats> {
        let active = self.repo.list_active().await?;

        let mut by_status = StatusBreakdown::default();
        for item in &active {
            match OrderStatus::parse(&item.status) {
                Some(OrderStatus::Pending) => by_status.pending += 1,
                Some(OrderStatus::InPreparation) => by_status.in_preparation += 1,
                Some(OrderStatus::Completed) => by_status.completed += 1,
                Some(OrderStatus::Archived) | None => {}
            }
        }

        Ok(OrderStats {
            total: active.len(),
            by_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;

    use crate::error::AppError;

    use super::*;

    /// In-memory stand-in for the Postgres repository, mirroring its
    /// update semantics (scoped writes refresh `updated_at`, creation
    /// forces `pending`). `fail_writes` simulates a storage-layer failure
    /// after validation has passed.
    #[derive(Default)]
    struct InMemoryOrders {
        items: Mutex<Vec<OrderItem>>,
        fail_writes: bool,
    }

    impl InMemoryOrders {
        fn with_items(items: Vec<OrderItem>) -> Self {
            Self {
                items: Mutex::new(items),
                fail_writes: false,
            }
        }

        fn snapshot(&self) -> Vec<OrderItem> {
            self.items.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrderRepository for InMemoryOrders {
        async fn list_active(&self) -> Result<Vec<OrderItem>, sqlx::Error> {
            let mut items: Vec<_> = self
                .snapshot()
                .into_iter()
                .filter(|i| i.status != "archived")
                .collect();
            items.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(items)
        }

        async fn list_archived(&self) -> Result<Vec<OrderItem>, sqlx::Error> {
            let mut items: Vec<_> = self
                .snapshot()
                .into_iter()
                .filter(|i| i.status == "archived")
                .collect();
            items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(items)
        }

        async fn find_by_ticket(&self, ticket_id: &str) -> Result<Vec<OrderItem>, sqlx::Error> {
            Ok(self
                .snapshot()
                .into_iter()
                .filter(|i| i.ticket_id == ticket_id)
                .collect())
        }

        async fn update_whole_ticket(
            &self,
            ticket_id: &str,
            status: OrderStatus,
        ) -> Result<u64, sqlx::Error> {
            if self.fail_writes {
                return Err(sqlx::Error::PoolClosed);
            }
            let mut items = self.items.lock().unwrap();
            let mut touched = 0;
            for item in items.iter_mut().filter(|i| i.ticket_id == ticket_id) {
                item.status = status.as_str().to_string();
                item.updated_at = Utc::now();
                touched += 1;
            }
            Ok(touched)
        }

        async fn update_single_item(
            &self,
            ticket_id: &str,
            product: &str,
            status: OrderStatus,
        ) -> Result<u64, sqlx::Error> {
            if self.fail_writes {
                return Err(sqlx::Error::PoolClosed);
            }
            let mut items = self.items.lock().unwrap();
            let mut touched = 0;
            for item in items
                .iter_mut()
                .filter(|i| i.ticket_id == ticket_id && i.product == product)
            {
                item.status = status.as_str().to_string();
                item.updated_at = Utc::now();
                touched += 1;
            }
            Ok(touched)
        }

        async fn update_single_row(
            &self,
            ticket_id: &str,
            row_id: DbId,
            status: OrderStatus,
        ) -> Result<u64, sqlx::Error> {
            if self.fail_writes {
                return Err(sqlx::Error::PoolClosed);
            }
            let mut items = self.items.lock().unwrap();
            let mut touched = 0;
            for item in items
                .iter_mut()
                .filter(|i| i.ticket_id == ticket_id && i.id == row_id)
            {
                item.status = status.as_str().to_string();
                item.updated_at = Utc::now();
                touched += 1;
            }
            Ok(touched)
        }

        async fn create(&self, item: &NewOrderItem) -> Result<OrderItem, sqlx::Error> {
            if self.fail_writes {
                return Err(sqlx::Error::PoolClosed);
            }
            let mut items = self.items.lock().unwrap();
            let created = OrderItem {
                id: items.len() as DbId + 1,
                ticket_id: item.ticket_id.clone(),
                product: item.product.clone(),
                quantity: item.quantity,
                note: item.note.clone(),
                unit_price: item.unit_price,
                status: "pending".to_string(),
                updated_at: Utc::now(),
            };
            items.push(created.clone());
            Ok(created)
        }
    }

    fn item(id: DbId, ticket: &str, product: &str, status: &str) -> OrderItem {
        OrderItem {
            id,
            ticket_id: ticket.to_string(),
            product: product.to_string(),
            quantity: 1,
            note: DEFAULT_NOTE.to_string(),
            unit_price: Decimal::ZERO,
            status: status.to_string(),
            updated_at: Utc::now(),
        }
    }

    fn create_input(ticket: &str, product: &str, quantity: i32) -> CreateOrder {
        CreateOrder {
            ticket_id: Some(ticket.to_string()),
            product: Some(product.to_string()),
            quantity: Some(quantity),
            note: None,
            unit_price: None,
        }
    }

    #[tokio::test]
    async fn created_items_start_pending_with_defaults() {
        let service = OrderService::new(InMemoryOrders::default());

        let receipt = service
            .create_order(create_input("T1", "Pizza", 2))
            .await
            .unwrap();
        assert_eq!(receipt.ticket_id, "T1");

        let board = service.list_orders(MODE_BOARD).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].status, "pending");
        assert_eq!(board[0].quantity, 2);
        assert_eq!(board[0].note, DEFAULT_NOTE);
        assert_eq!(board[0].unit_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn create_reports_first_missing_field() {
        let service = OrderService::new(InMemoryOrders::default());

        let err = service
            .create_order(CreateOrder {
                ticket_id: None,
                product: None,
                quantity: None,
                note: None,
                unit_price: None,
            })
            .await
            .unwrap_err();

        assert_matches!(err, AppError::Order(OrderError::MissingField("ticketId")));
    }

    #[tokio::test]
    async fn create_failure_surfaces_as_create_failed() {
        let repo = InMemoryOrders {
            fail_writes: true,
            ..Default::default()
        };
        let service = OrderService::new(repo);

        let err = service
            .create_order(create_input("T1", "Pizza", 1))
            .await
            .unwrap_err();

        assert_matches!(err, AppError::Order(OrderError::CreateFailed));
    }

    #[tokio::test]
    async fn whole_ticket_change_applies_to_every_item_and_is_idempotent() {
        let repo = InMemoryOrders::with_items(vec![
            item(1, "T1", "Pizza", "pending"),
            item(2, "T1", "Soda", "pending"),
            item(3, "T2", "Soup", "pending"),
        ]);
        let service = OrderService::new(repo);

        let receipt = service
            .change_status("T1", "completed", UpdateScope::WholeTicket)
            .await
            .unwrap();
        assert_eq!(receipt.items_updated, 2);
        assert_eq!(receipt.status, OrderStatus::Completed);

        // Same call again: same end state and success result.
        let again = service
            .change_status("T1", "completed", UpdateScope::WholeTicket)
            .await
            .unwrap();
        assert_eq!(again.items_updated, 2);

        let board = service.list_orders(MODE_BOARD).await.unwrap();
        for i in board.iter().filter(|i| i.ticket_id == "T1") {
            assert_eq!(i.status, "completed");
        }
        // The other ticket is untouched.
        assert_eq!(
            board.iter().find(|i| i.ticket_id == "T2").unwrap().status,
            "pending"
        );
    }

    #[tokio::test]
    async fn invalid_status_is_rejected_before_any_mutation() {
        let repo = InMemoryOrders::with_items(vec![item(1, "T1", "Pizza", "pending")]);
        let service = OrderService::new(repo);

        let err = service
            .change_status("T1", "vaporized", UpdateScope::WholeTicket)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Order(OrderError::InvalidStatus(_)));

        let board = service.list_orders(MODE_BOARD).await.unwrap();
        assert_eq!(board[0].status, "pending");
    }

    #[tokio::test]
    async fn unknown_ticket_is_rejected_with_not_found() {
        let repo = InMemoryOrders::with_items(vec![item(1, "T1", "Pizza", "pending")]);
        let service = OrderService::new(repo);

        let err = service
            .change_status("ghost-id", "pending", UpdateScope::WholeTicket)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Order(OrderError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_failure_surfaces_as_update_failed() {
        let repo = InMemoryOrders {
            items: Mutex::new(vec![item(1, "T1", "Pizza", "pending")]),
            fail_writes: true,
        };
        let service = OrderService::new(repo);

        let err = service
            .change_status("T1", "completed", UpdateScope::WholeTicket)
            .await
            .unwrap_err();
        assert_matches!(err, AppError::Order(OrderError::UpdateFailed));
    }

    #[tokio::test]
    async fn single_product_change_leaves_the_rest_of_the_ticket_mixed() {
        let repo = InMemoryOrders::with_items(vec![
            item(1, "T2", "Soda", "pending"),
            item(2, "T2", "Pizza", "pending"),
        ]);
        let service = OrderService::new(repo);

        service
            .change_status("T2", "completed", UpdateScope::Product("Soda".into()))
            .await
            .unwrap();

        let board = service.list_orders(MODE_BOARD).await.unwrap();
        let soda = board.iter().find(|i| i.product == "Soda").unwrap();
        let pizza = board.iter().find(|i| i.product == "Pizza").unwrap();
        assert_eq!(soda.status, "completed");
        assert_eq!(pizza.status, "pending");
    }

    #[tokio::test]
    async fn archiving_moves_a_ticket_from_board_to_history() {
        let repo = InMemoryOrders::with_items(vec![item(1, "T1", "Pizza", "completed")]);
        let service = OrderService::new(repo);

        service
            .change_status("T1", "archived", UpdateScope::WholeTicket)
            .await
            .unwrap();

        let board = service.list_orders(MODE_BOARD).await.unwrap();
        assert!(board.is_empty());

        let history = service.list_orders(MODE_HISTORY).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, "archived");
    }

    #[tokio::test]
    async fn completed_items_stay_on_the_board() {
        let repo = InMemoryOrders::with_items(vec![item(1, "T1", "Pizza", "pending")]);
        let service = OrderService::new(repo);

        service
            .change_status("T1", "in_preparation", UpdateScope::WholeTicket)
            .await
            .unwrap();
        service
            .change_status("T1", "completed", UpdateScope::WholeTicket)
            .await
            .unwrap();

        let board = service.list_orders(MODE_BOARD).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].status, "completed");
    }

    #[tokio::test]
    async fn unknown_listing_mode_defaults_to_board() {
        let repo = InMemoryOrders::with_items(vec![
            item(1, "T1", "Pizza", "pending"),
            item(2, "T2", "Soup", "archived"),
        ]);
        let service = OrderService::new(repo);

        let listed = service.list_orders("whatever").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].ticket_id, "T1");
    }

    #[tokio::test]
    async fn statistics_count_the_active_listing_by_status() {
        let repo = InMemoryOrders::with_items(vec![
            item(1, "T1", "Pizza", "pending"),
            item(2, "T1", "Soda", "pending"),
            item(3, "T2", "Soup", "in_preparation"),
            item(4, "T3", "Cake", "completed"),
            item(5, "T4", "Tea", "archived"),
        ]);
        let service = OrderService::new(repo);

        let stats = service.statistics().await.unwrap();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.pending, 2);
        assert_eq!(stats.by_status.in_preparation, 1);
        assert_eq!(stats.by_status.completed, 1);
        let sum = stats.by_status.pending + stats.by_status.in_preparation + stats.by_status.completed;
        assert!(sum <= stats.total);
    }

    #[tokio::test]
    async fn board_by_ticket_folds_active_items_into_tickets() {
        let repo = InMemoryOrders::with_items(vec![
            item(1, "T1", "Pizza", "pending"),
            item(2, "T2", "Soup", "pending"),
            item(3, "T1", "Soda", "completed"),
            item(4, "T3", "Tea", "archived"),
        ]);
        let service = OrderService::new(repo);

        let tickets = service.board_by_ticket().await.unwrap();

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets["T1"].len(), 2);
        assert_eq!(tickets["T2"].len(), 1);
        assert!(!tickets.contains_key("T3"));
    }

    #[test]
    fn update_scope_resolution_prefers_item_id_over_product() {
        let request = ChangeOrderStatus {
            ticket_id: "T1".into(),
            status: "completed".into(),
            product: Some("Pizza".into()),
            item_id: Some(7),
        };
        assert_eq!(UpdateScope::from_request(&request), UpdateScope::Row(7));

        let request = ChangeOrderStatus {
            ticket_id: "T1".into(),
            status: "completed".into(),
            product: Some("ALL".into()),
            item_id: None,
        };
        assert_eq!(UpdateScope::from_request(&request), UpdateScope::WholeTicket);

        let request = ChangeOrderStatus {
            ticket_id: "T1".into(),
            status: "completed".into(),
            product: None,
            item_id: None,
        };
        assert_eq!(UpdateScope::from_request(&request), UpdateScope::WholeTicket);

        let request = ChangeOrderStatus {
            ticket_id: "T1".into(),
            status: "completed".into(),
            product: Some("Pizza".into()),
            item_id: None,
        };
        assert_eq!(
            UpdateScope::from_request(&request),
            UpdateScope::Product("Pizza".into())
        );
    }
}
