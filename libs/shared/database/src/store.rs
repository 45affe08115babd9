use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Generic document-collection client. Collections live behind a
/// PostgREST-style HTTP API: `/rest/v1/{collection}` with `field=eq.value`
/// filters. All mutating calls ask for the affected rows back
/// (`Prefer: return=representation`) so callers can inspect matched counts.
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// One equality filter on a collection field.
pub type Filter<'a> = (&'a str, &'a str);

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            api_key: config.store_api_key.clone(),
        }
    }

    fn get_headers(&self, prefer: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.api_key) {
            headers.insert("apikey", key);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(prefer) = prefer {
            if let Ok(value) = HeaderValue::from_str(prefer) {
                headers.insert("Prefer", value);
            }
        }

        headers
    }

    async fn request<T>(
        &self,
        method: Method,
        collection: &str,
        params: &[(String, String)],
        body: Option<Value>,
        prefer: Option<&str>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/rest/v1/{}", self.base_url, collection);
        debug!("Store request: {} {} {:?}", method, url, params);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.get_headers(prefer))
            .query(params);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Collection not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn to_params(filters: &[Filter<'_>]) -> Vec<(String, String)> {
        filters
            .iter()
            .map(|(field, value)| (field.to_string(), format!("eq.{}", value)))
            .collect()
    }

    /// Fetch every document matching the given equality filters.
    pub async fn find<T>(&self, collection: &str, filters: &[Filter<'_>]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, collection, &Self::to_params(filters), None, None)
            .await
    }

    /// Fetch matching documents with a column projection (`select=` clause).
    pub async fn find_with_select<T>(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
        select: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut params = Self::to_params(filters);
        params.push(("select".to_string(), select.to_string()));
        self.request(Method::GET, collection, &params, None, None).await
    }

    /// Fetch the first document matching the filters, if any.
    pub async fn find_one<T>(&self, collection: &str, filters: &[Filter<'_>]) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut results: Vec<T> = self.find(collection, filters).await?;
        if results.is_empty() {
            Ok(None)
        } else {
            Ok(Some(results.swap_remove(0)))
        }
    }

    /// Insert one document and return the stored representation.
    pub async fn insert<T>(&self, collection: &str, document: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut inserted: Vec<T> = self
            .request(
                Method::POST,
                collection,
                &[],
                Some(document),
                Some("return=representation"),
            )
            .await?;

        if inserted.is_empty() {
            return Err(anyhow!("Insert into {} returned no representation", collection));
        }
        Ok(inserted.swap_remove(0))
    }

    /// Patch every document matching the filters, returning the updated rows.
    /// An empty result means the filter matched nothing.
    pub async fn update(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
        patch: Value,
    ) -> Result<Vec<Value>> {
        self.request(
            Method::PATCH,
            collection,
            &Self::to_params(filters),
            Some(patch),
            Some("return=representation"),
        )
        .await
    }

    /// Insert-or-update keyed on `on_conflict`, returning the stored rows.
    pub async fn upsert(
        &self,
        collection: &str,
        on_conflict: &str,
        document: Value,
    ) -> Result<Vec<Value>> {
        let params = vec![("on_conflict".to_string(), on_conflict.to_string())];
        self.request(
            Method::POST,
            collection,
            &params,
            Some(document),
            Some("resolution=merge-duplicates,return=representation"),
        )
        .await
    }

    /// Delete every document matching the filters, returning the removed rows.
    pub async fn delete(&self, collection: &str, filters: &[Filter<'_>]) -> Result<Vec<Value>> {
        self.request(
            Method::DELETE,
            collection,
            &Self::to_params(filters),
            None,
            Some("return=representation"),
        )
        .await
    }
}
