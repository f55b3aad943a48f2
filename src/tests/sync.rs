use crate::api::{HostOverride, HostOverrideApi, ServiceApi};
use crate::error::{ApiError, Result};
use crate::sync::HostSync;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// In-memory stand-in for the appliance.
#[derive(Default)]
struct FakeUnbound {
    rows: Mutex<Vec<HostOverride>>,
    next_id: AtomicUsize,
    restarts: AtomicUsize,
    fail_restart: bool,
}

impl FakeUnbound {
    fn with_rows(rows: Vec<HostOverride>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    fn rows(&self) -> Vec<HostOverride> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostOverrideApi for FakeUnbound {
    async fn create(&self, host: &HostOverride) -> Result<String> {
        let uuid = format!("uuid-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.rows.lock().unwrap().push(HostOverride {
            uuid: Some(uuid.clone()),
            ..host.clone()
        });
        Ok(uuid)
    }

    async fn update(&self, host: &HostOverride) -> Result<String> {
        let uuid = host.uuid.clone().ok_or(ApiError::MissingIdentifier)?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.uuid.as_deref() == Some(uuid.as_str()))
            .ok_or_else(|| ApiError::not_found(uuid.clone()))?;
        *row = host.clone();
        Ok(uuid)
    }

    async fn get_by_uuid(&self, uuid: &str) -> Result<HostOverride> {
        self.rows()
            .into_iter()
            .find(|r| r.uuid.as_deref() == Some(uuid))
            .ok_or_else(|| ApiError::not_found(uuid))
    }

    async fn get_by_fqdn(&self, hostname: &str, domain: &str) -> Result<HostOverride> {
        let mut matching: Vec<_> = self
            .rows()
            .into_iter()
            .filter(|r| r.hostname == hostname && r.domain == domain)
            .collect();
        match matching.len() {
            0 => Err(ApiError::not_found(hostname)),
            1 => Ok(matching.remove(0)),
            _ => Err(ApiError::too_many_found(hostname)),
        }
    }

    async fn list(&self) -> Result<Vec<HostOverride>> {
        Ok(self.rows())
    }

    async fn remove(&self, uuid: &str) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.uuid.as_deref() != Some(uuid));
        if rows.len() == before {
            return Err(ApiError::not_found(uuid));
        }
        Ok(())
    }
}

#[async_trait]
impl ServiceApi for FakeUnbound {
    async fn restart(&self) -> Result<()> {
        if self.fail_restart {
            return Err(ApiError::Server {
                status: 500,
                message: "boom".to_string(),
                detail: None,
            });
        }
        self.restarts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn existing(uuid: &str, hostname: &str, server: &str) -> HostOverride {
    HostOverride {
        uuid: Some(uuid.to_string()),
        ..HostOverride::new(hostname, "lan", server)
    }
}

#[tokio::test]
async fn test_apply_creates_and_updates() {
    let fake = FakeUnbound::with_rows(vec![existing("kept-1", "printer", "10.0.0.4")]);
    let sync = HostSync::new(
        fake,
        vec![
            HostOverride::new("printer", "lan", "10.0.0.5"),
            HostOverride::new("nas", "lan", "10.0.0.6"),
        ],
        true,
    );

    let applied = sync.apply().await.unwrap();
    assert_eq!(applied, vec!["kept-1", "uuid-0"]);

    let rows = sync.client().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].server, "10.0.0.5");
    assert_eq!(sync.client().restarts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_apply_is_idempotent() {
    let sync = HostSync::new(
        FakeUnbound::default(),
        vec![HostOverride::new("printer", "lan", "10.0.0.5")],
        false,
    );

    let first = sync.apply().await.unwrap();
    let second = sync.apply().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(sync.client().rows().len(), 1);
    assert_eq!(sync.client().restarts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_apply_nothing_skips_restart() {
    let sync = HostSync::new(FakeUnbound::default(), vec![], true);

    assert!(sync.apply().await.unwrap().is_empty());
    assert_eq!(sync.client().restarts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_apply_reports_restart_failure() {
    let fake = FakeUnbound {
        fail_restart: true,
        ..Default::default()
    };
    let sync = HostSync::new(fake, vec![HostOverride::new("printer", "lan", "10.0.0.5")], true);

    let err = sync.apply().await.unwrap_err();
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_upsert_with_duplicates_creates() {
    let fake = FakeUnbound::with_rows(vec![
        existing("a", "printer", "10.0.0.4"),
        existing("b", "printer", "10.0.0.7"),
    ]);

    assert!(fake.exists("printer", "lan").await.unwrap_err().is_too_many_found());
    let uuid = fake
        .create_or_update(&HostOverride::new("printer", "lan", "10.0.0.5"))
        .await
        .unwrap();
    assert_eq!(uuid, "uuid-0");
    assert_eq!(fake.rows().len(), 3);
}

#[tokio::test]
async fn test_upsert_with_uuid_skips_lookup() {
    let fake = FakeUnbound::with_rows(vec![existing("a", "printer", "10.0.0.4")]);

    let moved = HostOverride {
        hostname: "printer-old".to_string(),
        ..existing("a", "printer", "10.0.0.4")
    };
    assert_eq!(fake.create_or_update(&moved).await.unwrap(), "a");
    assert!(!fake.exists("printer", "lan").await.unwrap());
    assert!(fake.exists("printer-old", "lan").await.unwrap());
}

#[tokio::test]
async fn test_remove_then_lookup_is_not_found() {
    let fake = FakeUnbound::with_rows(vec![existing("a", "printer", "10.0.0.4")]);

    fake.remove("a").await.unwrap();
    assert!(fake.get_by_uuid("a").await.unwrap_err().is_not_found());
    assert!(fake.remove("a").await.unwrap_err().is_not_found());
}
