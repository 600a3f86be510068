//! Order query endpoints.

use serde_json::Value;

use brasa_core::{CanonicalOrder, OrderStatus, OrderUuid, TenantId, normalize};

use super::types::{OrdersEnvelope, merge_detail};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// List orders, optionally restricted to the given statuses.
    ///
    /// The list endpoint does not filter server-side; filtering happens here
    /// on the normalized status, case-insensitively. An empty `statuses`
    /// slice means no filtering.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a
    /// recognizable order list.
    pub async fn list_orders(
        &self,
        statuses: &[OrderStatus],
        tenant_id: Option<&TenantId>,
        uuid: Option<&OrderUuid>,
    ) -> Result<Vec<CanonicalOrder>, BackendError> {
        let payload = self.fetch_order_list(tenant_id, uuid).await?;
        let envelope: OrdersEnvelope = serde_json::from_value(payload)?;
        let orders: Vec<CanonicalOrder> = envelope.into_orders().iter().map(normalize).collect();

        if statuses.is_empty() {
            return Ok(orders);
        }
        Ok(orders
            .into_iter()
            .filter(|order| order.status().is_some_and(|s| statuses.contains(&s)))
            .collect())
    }

    /// Fetch one order by uuid.
    ///
    /// When the tenant is unknown it is recovered from the order list. If
    /// the detail endpoint fails for anything other than a clean 404, the
    /// list is scanned as a fallback source before giving up.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::OrderNotFound`] when no source knows the
    /// order, or the underlying error otherwise.
    pub async fn get_order(
        &self,
        uuid: &OrderUuid,
        tenant_id: Option<&TenantId>,
    ) -> Result<CanonicalOrder, BackendError> {
        let tenant = match tenant_id {
            Some(tenant) if !tenant.is_empty() => tenant.clone(),
            _ => self.tenant_for(uuid).await,
        };

        let url = format!(
            "{}/pedidos/id?tenant_id={}&uuid={}",
            self.config().order_detail_url,
            urlencoding::encode(tenant.as_str()),
            urlencoding::encode(uuid.as_str()),
        );

        match self.get_json(&url).await {
            Ok(payload) => Ok(normalize(&merge_detail(payload))),
            Err(BackendError::Api { status: 404, .. }) => Err(BackendError::OrderNotFound),
            Err(err) => {
                tracing::warn!(error = %err, uuid = %uuid, "detail fetch failed, trying list");
                match self.find_in_list(uuid).await {
                    Some(order) => Ok(order),
                    None => Err(err),
                }
            }
        }
    }

    async fn fetch_order_list(
        &self,
        tenant_id: Option<&TenantId>,
        uuid: Option<&OrderUuid>,
    ) -> Result<Value, BackendError> {
        let mut url = format!("{}/pedidos", self.config().orders_url);
        let mut params = Vec::new();
        if let Some(tenant) = tenant_id {
            params.push(format!("tenant_id={}", urlencoding::encode(tenant.as_str())));
        }
        if let Some(uuid) = uuid {
            params.push(format!("uuid={}", urlencoding::encode(uuid.as_str())));
        }
        if !params.is_empty() {
            url = format!("{url}?{}", params.join("&"));
        }
        self.get_json(&url).await
    }

    /// Tenant for an order: read off the list entry when findable, else the
    /// configured default.
    async fn tenant_for(&self, uuid: &OrderUuid) -> TenantId {
        if let Some(order) = self.find_in_list(uuid).await {
            if let Some(tenant) = order.tenant_id {
                return tenant;
            }
        }
        TenantId::new(self.config().default_tenant.clone())
    }

    /// Scan the order list for a record matching any of the id variants.
    async fn find_in_list(&self, uuid: &OrderUuid) -> Option<CanonicalOrder> {
        let payload = self.fetch_order_list(None, None).await.ok()?;
        let envelope: OrdersEnvelope = serde_json::from_value(payload).ok()?;
        envelope
            .into_orders()
            .iter()
            .find(|raw| {
                ["uuid", "id", "id_pedido"].iter().any(|key| {
                    raw.get(*key).and_then(Value::as_str) == Some(uuid.as_str())
                })
            })
            .map(normalize)
    }
}
