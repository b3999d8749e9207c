//! Firebase Realtime Database store
//!
//! Maps the KeySwitch operations onto the database's REST API:
//! `{base}/{collection}.json` for the collection and
//! `{base}/{collection}/{id}.json` for a single record.
//!
//! See <https://firebase.google.com/docs/reference/rest/database>

use super::error::StoreError;
use super::http::{RawResponse, StoreHttpClient};
use super::KeySwitchService;
use crate::model::KeySwitch;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use url::Url;

/// Default child location holding the records
pub const DEFAULT_COLLECTION: &str = "Switch";

/// Body returned by a POST (push): the generated child key
#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// Store backed by a Realtime Database reachable over HTTPS
#[derive(Clone)]
pub struct FirebaseKeySwitchService {
    http: StoreHttpClient,
    base_url: String,
    collection: String,
    auth_token: Option<String>,
}

impl FirebaseKeySwitchService {
    pub fn new(http: StoreHttpClient, base_url: &Url) -> Self {
        Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            auth_token: None,
        }
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.trim_matches('/').to_string();
        self
    }

    /// Token sent as the `auth` query parameter (ID token or database secret)
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    /// `{base}/{collection}.json`
    pub fn collection_url(&self) -> Result<Url, StoreError> {
        self.build_url(&format!("{}/{}.json", self.base_url, self.collection))
    }

    /// `{base}/{collection}/{id}.json`
    ///
    /// A blank id would address the whole collection, so it is rejected
    /// before any request is built.
    pub fn item_url(&self, operation: &str, id: &str) -> Result<Url, StoreError> {
        if id.trim().is_empty() {
            return Err(StoreError::missing_id(operation));
        }
        self.build_url(&format!(
            "{}/{}/{}.json",
            self.base_url,
            self.collection,
            urlencoding::encode(id)
        ))
    }

    fn build_url(&self, raw: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(raw).map_err(|e| StoreError::Persistence {
            message: format!("Invalid store URL: {}", raw),
            status: None,
            source: Some(Box::new(e)),
        })?;
        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }

    fn body_of(operation: &str, ks: &KeySwitch) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(ks).map_err(|e| StoreError::decode(operation, e))
    }
}

/// Project a collection read (`{id: {fields}}` or `null`) into records.
///
/// Entries come back ordered by key; push keys sort chronologically.
pub fn records_from_collection(body: &str) -> Result<Vec<KeySwitch>, serde_json::Error> {
    let map: Option<BTreeMap<String, KeySwitch>> = serde_json::from_str(body)?;
    Ok(map
        .unwrap_or_default()
        .into_iter()
        .map(|(id, ks)| ks.with_id(id))
        .collect())
}

fn expect_ok(operation: &str, response: &RawResponse) -> Result<(), StoreError> {
    if response.is_ok() {
        Ok(())
    } else {
        Err(StoreError::status(operation, response.status.as_u16()))
    }
}

#[async_trait]
impl KeySwitchService for FirebaseKeySwitchService {
    async fn create(&self, mut ks: KeySwitch) -> Result<KeySwitch, StoreError> {
        let url = self.collection_url()?;
        let body = Self::body_of("Create", &ks)?;

        let response = self
            .http
            .post(&url, &body)
            .await
            .map_err(|e| StoreError::transport("Create", e))?;
        expect_ok("Create", &response)?;

        let pushed: PushResponse =
            serde_json::from_str(&response.body).map_err(|e| StoreError::decode("Create", e))?;
        tracing::info!("Created KeySwitch {}", pushed.name);
        ks.id = Some(pushed.name);
        Ok(ks)
    }

    async fn get_by_id(&self, id: &str) -> Result<KeySwitch, StoreError> {
        let url = self.item_url("Read", id)?;

        let response = self
            .http
            .get(&url)
            .await
            .map_err(|e| StoreError::transport("Read", e))?;
        expect_ok("Read", &response)?;

        if response.is_null_document() {
            return Err(StoreError::not_found(id));
        }

        let ks: KeySwitch =
            serde_json::from_str(&response.body).map_err(|e| StoreError::decode("Read", e))?;
        Ok(ks.with_id(id))
    }

    async fn get_all(&self) -> Result<Vec<KeySwitch>, StoreError> {
        let url = self.collection_url()?;

        let response = self
            .http
            .get(&url)
            .await
            .map_err(|e| StoreError::transport("Read", e))?;
        expect_ok("Read", &response)?;

        if response.is_null_document() {
            return Ok(Vec::new());
        }

        let records =
            records_from_collection(&response.body).map_err(|e| StoreError::decode("Read", e))?;
        tracing::debug!("Fetched {} KeySwitches", records.len());
        Ok(records)
    }

    async fn update(&self, ks: KeySwitch) -> Result<KeySwitch, StoreError> {
        let Some(id) = ks.id.as_deref() else {
            return Err(StoreError::missing_id("Update"));
        };
        let url = self.item_url("Update", id)?;
        let body = Self::body_of("Update", &ks)?;

        let response = self
            .http
            .put(&url, &body)
            .await
            .map_err(|e| StoreError::transport("Update", e))?;
        expect_ok("Update", &response)?;

        tracing::info!("Updated KeySwitch {}", id);
        Ok(ks)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let url = self.item_url("Delete", id)?;

        let response = self
            .http
            .delete(&url)
            .await
            .map_err(|e| StoreError::transport("Delete", e))?;
        expect_ok("Delete", &response)?;

        tracing::info!("Deleted KeySwitch {}", id);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }
}
