use crate::error::Result;
use crate::models::AzureWebCategory;
use crate::runtime::{ArmClient, ClientOptions, Pager, Request, TokenCredential};
use reqwest::Method;
use std::sync::Arc;

const CATEGORY_PATH: &str =
    "/subscriptions/{subscriptionId}/providers/Microsoft.Network/azureWebCategories/{name}";
const LIST_PATH: &str = "/subscriptions/{subscriptionId}/providers/Microsoft.Network/azureWebCategories";

/// Read-only access to the web categories Azure Firewall policies filter on.
#[derive(Debug, Clone)]
pub struct WebCategoriesClient {
    client: ArmClient,
    subscription_id: String,
}

impl WebCategoriesClient {
    pub fn new(
        subscription_id: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
        options: Option<ClientOptions>,
    ) -> Result<Self> {
        Ok(Self::with_client(
            subscription_id,
            ArmClient::new(credential, options)?,
        ))
    }

    pub(crate) fn with_client(subscription_id: impl Into<String>, client: ArmClient) -> Self {
        WebCategoriesClient {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    /// Gets the specified Azure Web Category.
    pub async fn get(&self, name: &str, expand: Option<&str>) -> Result<AzureWebCategory> {
        let req = self.get_request(name, expand)?;
        self.client.send(req, &[200]).await?.json()
    }

    fn get_request(&self, name: &str, expand: Option<&str>) -> Result<Request> {
        let mut req = self.client.request(
            Method::GET,
            CATEGORY_PATH,
            &[("subscriptionId", self.subscription_id.as_str()), ("name", name)],
        )?;
        if let Some(expand) = expand {
            req.set_query("$expand", expand);
        }
        Ok(req)
    }

    /// All Azure Web Categories of the subscription.
    pub fn list_by_subscription_pager(&self, expand: Option<&str>) -> Pager<AzureWebCategory> {
        let first = self
            .client
            .request(
                Method::GET,
                LIST_PATH,
                &[("subscriptionId", self.subscription_id.as_str())],
            )
            .map(|mut req| {
                if let Some(expand) = expand {
                    req.set_query("$expand", expand);
                }
                req
            });
        self.client.pager(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_arm_client;

    #[test]
    fn test_get_request() {
        let client = WebCategoriesClient::with_client("4de8428a-4a93-4b1e-9d8a-9b2f7b4c0a12", test_arm_client());
        let req = client.get_request("Arts", Some("details")).unwrap();
        assert_eq!(
            req.url().path(),
            "/subscriptions/4de8428a-4a93-4b1e-9d8a-9b2f7b4c0a12/providers/Microsoft.Network/azureWebCategories/Arts"
        );
        assert_eq!(req.query("$expand").as_deref(), Some("details"));
    }
}
