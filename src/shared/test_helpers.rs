#[cfg(test)]
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc, Mutex,
};

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use axum::Router;
#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use crate::core::config::AuthConfig;
#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::core::middleware::auth_middleware;
#[cfg(test)]
use crate::features::auth::SessionService;
#[cfg(test)]
use crate::features::villages::models::{VillageDraft, VillageRecord};
#[cfg(test)]
use crate::features::villages::store::VillageStore;
#[cfg(test)]
use crate::modules::storage::{
    check_quota, content_id, content_type_for, object_key, usage_excluding, BlobStore,
    StoredBlob,
};

#[cfg(test)]
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        admin_email: "admin@turismoantigua.com".to_string(),
        admin_password: "admin123".to_string(),
        admin_name: "Administrator".to_string(),
        session_secret: "test-session-secret-at-least-32-bytes!".to_string(),
        session_issuer: "antigua-turismo-test".to_string(),
        session_ttl: std::time::Duration::from_secs(3600),
    }
}

#[cfg(test)]
pub fn test_session_service() -> Arc<SessionService> {
    Arc::new(SessionService::new(test_auth_config()))
}

#[cfg(test)]
pub fn admin_token(sessions: &Arc<SessionService>) -> String {
    sessions.issue_token().unwrap()
}

/// Put a router behind the admin session gate, as main does
#[cfg(test)]
pub fn protect(router: Router, sessions: Arc<SessionService>) -> Router {
    router.route_layer(axum::middleware::from_fn_with_state(
        sessions,
        auth_middleware,
    ))
}

/// In-memory village store with the same uniqueness rules as the table
#[cfg(test)]
pub struct MemoryVillageStore {
    rows: Mutex<Vec<VillageRecord>>,
    next_id: AtomicI64,
    available: bool,
}

#[cfg(test)]
impl Default for MemoryVillageStore {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            available: true,
        }
    }
}

#[cfg(test)]
impl MemoryVillageStore {
    /// A store whose every call fails as if the database were down
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(AppError::StoreUnavailable("connection refused".to_string()))
        }
    }

    fn slug_taken(rows: &[VillageRecord], slug: &str, except: Option<i64>) -> bool {
        rows.iter()
            .any(|row| row.slug == slug && Some(row.id) != except)
    }
}

#[cfg(test)]
fn duplicate_slug(_slug: &str) -> AppError {
    AppError::Conflict(
        "A record with the same unique value already exists (villages_slug_key)".to_string(),
    )
}

#[cfg(test)]
#[async_trait]
impl VillageStore for MemoryVillageStore {
    async fn list(&self, status: Option<&'static str>) -> Result<Vec<VillageRecord>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<VillageRecord> = rows
            .iter()
            .filter(|row| status.map_or(true, |s| row.status == s))
            .cloned()
            .collect();
        out.sort_by_key(|row| row.id);
        Ok(out)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<VillageRecord>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<VillageRecord>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|row| row.slug == slug).cloned())
    }

    async fn insert(&self, draft: &VillageDraft) -> Result<VillageRecord> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if Self::slug_taken(&rows, &draft.slug, None) {
            return Err(duplicate_slug(&draft.slug));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let record = VillageRecord::from_draft(id, draft.clone(), now, now);
        rows.push(record.clone());
        Ok(record)
    }

    async fn replace(&self, id: i64, draft: &VillageDraft) -> Result<Option<VillageRecord>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if Self::slug_taken(&rows, &draft.slug, Some(id)) {
            return Err(duplicate_slug(&draft.slug));
        }

        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        *row = VillageRecord::from_draft(id, draft.clone(), row.created_at, Utc::now());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok(rows.len() != before)
    }

    async fn count_by_status(&self) -> Result<Vec<(String, i64)>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        let mut counts: Vec<(String, i64)> = Vec::new();
        for row in rows.iter() {
            match counts.iter_mut().find(|(status, _)| *status == row.status) {
                Some((_, count)) => *count += 1,
                None => counts.push((row.status.clone(), 1)),
            }
        }
        Ok(counts)
    }
}

/// In-memory blob store keyed the same way as the S3 backend
#[cfg(test)]
pub struct MemoryBlobStore {
    objects: Mutex<Vec<(String, usize)>>,
    quota: Option<u64>,
}

#[cfg(test)]
impl MemoryBlobStore {
    pub fn new(quota: Option<u64>) -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            quota,
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, data: Vec<u8>, filename: &str) -> Result<StoredBlob> {
        let mut objects = self.objects.lock().unwrap();
        let id = content_id(&data);
        let key = object_key("media", &id, filename);

        let used = usage_excluding(
            objects.iter().map(|(existing, size)| (existing.as_str(), *size as u64)),
            &key,
        );
        check_quota(used, data.len() as u64, self.quota)?;

        objects.retain(|(existing, _)| *existing != key);
        objects.push((key.clone(), data.len()));

        Ok(StoredBlob {
            id,
            url: format!("http://localhost:9000/antigua-media/{}", key),
            uri: format!("s3://antigua-media/{}", key),
            size: data.len(),
            content_type: content_type_for(filename),
        })
    }
}
