//! In-memory fakes for exercising services without Postgres or the media service

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use vidtube_common::auth::{JwtService, TokenSecrets};
use vidtube_common::PasswordService;
use vidtube_core::entities::{
    Account, AccountRecord, ChannelProfile, MediaAsset, MediaSlot, MediaUpload, ReplacedMedia,
    WatchedVideo,
};
use vidtube_core::error::DomainError;
use vidtube_core::traits::{AccountRepository, ChannelRepository, MediaStore, RepoResult};
use vidtube_core::{Snowflake, SnowflakeGenerator};
use vidtube_service::{RegisterInput, ServiceContext};

pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";

// ============================================================================
// Accounts
// ============================================================================

#[derive(Default)]
pub struct InMemoryAccountRepository {
    records: Mutex<HashMap<Snowflake, AccountRecord>>,
    fail_token_writes: AtomicBool,
    fail_account_writes: AtomicBool,
    unavailable: AtomicBool,
    steal_on_next_replace: Mutex<Option<String>>,
    rename_on_next_media_write: Mutex<Option<String>>,
}

impl InMemoryAccountRepository {
    pub fn record(&self, id: Snowflake) -> Option<AccountRecord> {
        self.records.lock().get(&id).cloned()
    }

    pub fn refresh_token(&self, id: Snowflake) -> Option<String> {
        self.record(id).and_then(|record| record.refresh_token)
    }

    /// Overwrite the slot directly, bypassing the service
    pub fn force_refresh_token(&self, id: Snowflake, token: Option<&str>) {
        if let Some(record) = self.records.lock().get_mut(&id) {
            record.refresh_token = token.map(str::to_string);
        }
    }

    pub fn fail_token_writes(&self, fail: bool) {
        self.fail_token_writes.store(fail, Ordering::SeqCst);
    }

    /// Fail `create`, `update_details`, `update_media` and `update_password`
    /// while reads keep working
    pub fn fail_account_writes(&self, fail: bool) {
        self.fail_account_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make the next conditional replace observe `token` already in the slot,
    /// as if a concurrent rotation committed first.
    pub fn steal_on_next_replace(&self, token: &str) {
        *self.steal_on_next_replace.lock() = Some(token.to_string());
    }

    /// Change the full name just before the next media write lands, as if
    /// another request committed in between.
    pub fn rename_on_next_media_write(&self, full_name: &str) {
        *self.rename_on_next_media_write.lock() = Some(full_name.to_string());
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("connection refused".to_string()));
        }
        Ok(())
    }

    fn check_account_writes(&self) -> RepoResult<()> {
        self.check_available()?;
        if self.fail_account_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("write failed".to_string()));
        }
        Ok(())
    }

    fn check_token_writes(&self) -> RepoResult<()> {
        self.check_available()?;
        if self.fail_token_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable("write failed".to_string()));
        }
        Ok(())
    }
}

fn taken_by_other(records: &HashMap<Snowflake, AccountRecord>, account: &Account) -> bool {
    records.values().any(|record| {
        record.id() != account.id
            && (record.account.username == account.username
                || record.account.email == account.email)
    })
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AccountRecord>> {
        self.check_available()?;
        Ok(self.record(id))
    }

    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> RepoResult<Option<AccountRecord>> {
        self.check_available()?;
        let username = Account::normalize_username(username);
        Ok(self
            .records
            .lock()
            .values()
            .find(|record| record.account.username == username || record.account.email == email)
            .cloned())
    }

    async fn create(&self, record: &AccountRecord) -> RepoResult<()> {
        self.check_account_writes()?;
        let mut records = self.records.lock();
        if taken_by_other(&records, &record.account) || records.contains_key(&record.id()) {
            return Err(DomainError::ConflictingAccount);
        }
        records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update_details(
        &self,
        id: Snowflake,
        full_name: Option<&str>,
        email: Option<&str>,
    ) -> RepoResult<Account> {
        self.check_account_writes()?;
        let mut records = self.records.lock();
        if let Some(email) = email {
            let taken = records
                .values()
                .any(|record| record.id() != id && record.account.email == email);
            if taken {
                return Err(DomainError::ConflictingAccount);
            }
        }
        let record = records.get_mut(&id).ok_or(DomainError::AccountNotFound(id))?;
        if let Some(full_name) = full_name {
            record.account.full_name = full_name.to_string();
        }
        if let Some(email) = email {
            record.account.email = email.to_string();
        }
        record.account.updated_at = Utc::now();
        Ok(record.account.clone())
    }

    async fn update_media(
        &self,
        id: Snowflake,
        slot: MediaSlot,
        url: &str,
    ) -> RepoResult<ReplacedMedia> {
        self.check_account_writes()?;
        let rename = self.rename_on_next_media_write.lock().take();
        let mut records = self.records.lock();
        let record = records.get_mut(&id).ok_or(DomainError::AccountNotFound(id))?;
        if let Some(full_name) = rename {
            record.account.full_name = full_name;
        }
        let previous = match slot {
            MediaSlot::Avatar => Some(std::mem::replace(
                &mut record.account.avatar,
                url.to_string(),
            )),
            MediaSlot::CoverImage => record.account.cover_image.replace(url.to_string()),
        };
        record.account.updated_at = Utc::now();
        Ok(ReplacedMedia {
            account: record.account.clone(),
            previous,
        })
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        self.check_account_writes()?;
        let mut records = self.records.lock();
        let record = records.get_mut(&id).ok_or(DomainError::AccountNotFound(id))?;
        record.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn set_refresh_token(&self, id: Snowflake, token: Option<&str>) -> RepoResult<bool> {
        self.check_token_writes()?;
        let mut records = self.records.lock();
        Ok(match records.get_mut(&id) {
            Some(record) => {
                record.refresh_token = token.map(str::to_string);
                true
            }
            None => false,
        })
    }

    async fn replace_refresh_token(
        &self,
        id: Snowflake,
        expected: &str,
        replacement: &str,
    ) -> RepoResult<bool> {
        self.check_token_writes()?;
        let stolen = self.steal_on_next_replace.lock().take();
        let mut records = self.records.lock();
        let Some(record) = records.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(winner) = stolen {
            record.refresh_token = Some(winner);
        }
        if record.refresh_token.as_deref() != Some(expected) {
            return Ok(false);
        }
        record.refresh_token = Some(replacement.to_string());
        Ok(true)
    }

    async fn delete_by_id(&self, id: Snowflake) -> RepoResult<()> {
        self.check_available()?;
        self.records
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::AccountNotFound(id))
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check_available()
    }
}

// ============================================================================
// Channels
// ============================================================================

#[derive(Default)]
pub struct InMemoryChannelRepository {
    profiles: Mutex<Vec<ChannelProfile>>,
    subscriptions: Mutex<Vec<(Snowflake, Snowflake)>>,
    history: Mutex<HashMap<Snowflake, Vec<WatchedVideo>>>,
}

impl InMemoryChannelRepository {
    pub fn add_profile(&self, profile: ChannelProfile) {
        self.profiles.lock().push(profile);
    }

    pub fn subscribe(&self, subscriber: Snowflake, channel: Snowflake) {
        self.subscriptions.lock().push((subscriber, channel));
    }

    pub fn watch(&self, account_id: Snowflake, video: WatchedVideo) {
        self.history.lock().entry(account_id).or_default().push(video);
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Snowflake>,
    ) -> RepoResult<Option<ChannelProfile>> {
        let username = Account::normalize_username(username);
        let subscriptions = self.subscriptions.lock();

        Ok(self
            .profiles
            .lock()
            .iter()
            .find(|profile| profile.username == username)
            .cloned()
            .map(|mut profile| {
                let id = profile.id;
                profile.subscribers_count =
                    subscriptions.iter().filter(|(_, channel)| *channel == id).count() as i64;
                profile.subscribed_to_count =
                    subscriptions.iter().filter(|(subscriber, _)| *subscriber == id).count() as i64;
                profile.is_subscribed = viewer
                    .is_some_and(|viewer| subscriptions.contains(&(viewer, id)));
                profile
            }))
    }

    async fn watch_history(&self, account_id: Snowflake) -> RepoResult<Vec<WatchedVideo>> {
        let mut videos = self
            .history
            .lock()
            .get(&account_id)
            .cloned()
            .unwrap_or_default();
        videos.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        Ok(videos)
    }
}

// ============================================================================
// Media
// ============================================================================

#[derive(Default)]
pub struct FakeMediaStore {
    uploads: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    fail_uploads_after: Mutex<Option<usize>>,
    fail_deletes: AtomicBool,
}

impl FakeMediaStore {
    /// Let `count` more uploads through, then fail the rest
    pub fn fail_uploads_after(&self, count: usize) {
        *self.fail_uploads_after.lock() = Some(count);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().clone()
    }
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(&self, upload: &MediaUpload) -> RepoResult<MediaAsset> {
        if let Some(remaining) = self.fail_uploads_after.lock().as_mut() {
            if *remaining == 0 {
                return Err(DomainError::MediaUnavailable("upload rejected".to_string()));
            }
            *remaining -= 1;
        }

        let mut uploads = self.uploads.lock();
        let url = format!("https://cdn.test/{}/{}", uploads.len(), upload.file_name);
        uploads.push(url.clone());
        Ok(MediaAsset::new(url))
    }

    async fn delete(&self, url: &str) -> RepoResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::MediaUnavailable("delete rejected".to_string()));
        }
        self.deleted.lock().push(url.to_string());
        Ok(())
    }
}

// ============================================================================
// Context
// ============================================================================

pub struct TestHarness {
    pub ctx: ServiceContext,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub channels: Arc<InMemoryChannelRepository>,
    pub media: Arc<FakeMediaStore>,
}

pub fn jwt_service(ttl: i64) -> JwtService {
    JwtService::new(TokenSecrets {
        access_secret: ACCESS_SECRET,
        access_ttl: ttl,
        refresh_secret: REFRESH_SECRET,
        refresh_ttl: ttl,
    })
}

pub fn harness() -> TestHarness {
    let accounts = Arc::new(InMemoryAccountRepository::default());
    let channels = Arc::new(InMemoryChannelRepository::default());
    let media = Arc::new(FakeMediaStore::default());

    let ctx = ServiceContext::builder()
        .account_repo(accounts.clone())
        .channel_repo(channels.clone())
        .media_store(media.clone())
        .jwt_service(Arc::new(jwt_service(3600)))
        .password_service(PasswordService::new())
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .build()
        .expect("complete test context");

    TestHarness {
        ctx,
        accounts,
        channels,
        media,
    }
}

pub fn avatar() -> MediaUpload {
    MediaUpload::new("avatar.png", Some("image/png".to_string()), vec![1, 2, 3])
}

pub fn register_input(username: &str, email: &str, password: &str) -> RegisterInput {
    RegisterInput {
        full_name: format!("{username} Example"),
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        avatar: Some(avatar()),
        cover_image: None,
    }
}

/// Register an account through the service and return its id
pub async fn register(
    harness: &TestHarness,
    username: &str,
    email: &str,
    password: &str,
) -> Snowflake {
    let account = vidtube_service::AccountService::new(&harness.ctx)
        .register(register_input(username, email, password))
        .await
        .expect("registration succeeds");
    Snowflake::parse(&account.id).expect("numeric id")
}
