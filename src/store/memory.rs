//! In-memory store
//!
//! Offline stand-in for the Realtime Database with the same contract.

use super::error::StoreError;
use super::KeySwitchService;
use crate::model::KeySwitch;
use crate::sample;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryKeySwitchService {
    records: RwLock<Vec<KeySwitch>>,
}

impl MemoryKeySwitchService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `count` generated switches
    pub fn with_samples(count: usize) -> Self {
        let records = (0..count)
            .map(|_| {
                let mut ks = KeySwitch::pending();
                sample::generate(&mut ks);
                ks.with_id(Uuid::new_v4().to_string())
            })
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

/// Blank ids are refused the same way the REST backend refuses them
fn require_id(operation: &str, id: &str) -> Result<(), StoreError> {
    if id.trim().is_empty() {
        return Err(StoreError::missing_id(operation));
    }
    Ok(())
}

#[async_trait]
impl KeySwitchService for MemoryKeySwitchService {
    async fn create(&self, mut ks: KeySwitch) -> Result<KeySwitch, StoreError> {
        let id = Uuid::new_v4().to_string();
        ks.id = Some(id);
        self.records.write().await.push(ks.clone());
        Ok(ks)
    }

    async fn get_by_id(&self, id: &str) -> Result<KeySwitch, StoreError> {
        require_id("Read", id)?;
        self.records
            .read()
            .await
            .iter()
            .find(|ks| ks.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn get_all(&self) -> Result<Vec<KeySwitch>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn update(&self, ks: KeySwitch) -> Result<KeySwitch, StoreError> {
        let Some(id) = ks.id.clone() else {
            return Err(StoreError::missing_id("Update"));
        };
        require_id("Update", &id)?;
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.id.as_deref() == Some(id.as_str())) {
            Some(idx) => records[idx] = ks.clone(),
            // PUT creates the location when it does not exist yet
            None => records.push(ks.clone()),
        }
        Ok(ks)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        require_id("Delete", id)?;
        self.records
            .write()
            .await
            .retain(|ks| ks.id.as_deref() != Some(id));
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brown() -> KeySwitch {
        KeySwitch {
            name: "Holy Panda".to_string(),
            switch_type: "Tactile Switch".to_string(),
            ..KeySwitch::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = MemoryKeySwitchService::new();
        let created = store.create(brown()).await.unwrap();
        assert!(!created.is_pending());
        assert_eq!(created.name, "Holy Panda");
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = MemoryKeySwitchService::new();
        let err = store.get_by_id("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let store = MemoryKeySwitchService::new();
        let mut created = store.create(brown()).await.unwrap();
        created.switch_type = "Linear Switch".to_string();
        store.update(created.clone()).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn test_update_without_id_fails() {
        let store = MemoryKeySwitchService::new();
        let err = store.update(brown()).await.unwrap_err();
        assert!(err.is_caller_facing());
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_ids_are_rejected() {
        let store = MemoryKeySwitchService::with_samples(2);

        let err = store.update(brown().with_id("")).await.unwrap_err();
        assert!(err.is_caller_facing());
        assert!(store.delete_by_id(" ").await.is_err());
        assert!(!store.get_by_id("").await.unwrap_err().is_not_found());

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|ks| ks.id.as_deref() != Some("")));
    }

    #[tokio::test]
    async fn test_sequential_creates_are_all_retrievable() {
        let store = MemoryKeySwitchService::new();
        let mut created = Vec::new();
        for i in 0..7 {
            let mut ks = brown();
            ks.name = format!("Holy Panda {}", i);
            created.push(store.create(ks).await.unwrap());
        }

        assert_eq!(store.get_all().await.unwrap().len(), 7);
        for ks in &created {
            let id = ks.id.as_deref().unwrap();
            assert_eq!(&store.get_by_id(id).await.unwrap(), ks);
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let store = MemoryKeySwitchService::with_samples(3);
        store.delete_by_id("not-there").await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 3);
    }
}
