//! Test doubles: a recording `CloverApi` and a failing clipboard.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use clover_client::*;
use clover_flux::Flux;

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::config::ClientConfig;
use crate::error::{BffError, Result};
use crate::handlers::CloverBff;
use crate::session::{MemoryStorage, SessionData, SessionStorage, save_session};

fn server_error(status: u16) -> ApiError {
    ApiError::Server {
        status,
        message: "boom".into(),
    }
}

/// Scripted backend. Every call is recorded as a short string.
#[derive(Default)]
pub struct FakeApi {
    pub calls: Mutex<Vec<String>>,
    pub liked: Mutex<bool>,
    pub like_total: Mutex<u64>,
    pub fail: Mutex<Vec<&'static str>>,
    pub search_results: Mutex<VecDeque<SearchResult>>,
    pub search_by_term: Mutex<HashMap<String, SearchResult>>,
    pub comments: Mutex<Vec<CommentItem>>,
    pub delays: Mutex<HashMap<String, Duration>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `method` fail with a 500.
    pub fn fail_on(&self, method: &'static str) {
        self.fail.lock().unwrap().push(method);
    }

    /// Hold calls recorded as `call` (e.g. "search lee") for `delay`.
    /// Honored by `search` and `post_comment`.
    pub fn delay_on(&self, call: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(call.to_string(), delay);
    }

    /// Answer searches for `term` with `result`, ahead of the queue.
    pub fn answer_search(&self, term: &str, result: SearchResult) {
        self.search_by_term
            .lock()
            .unwrap()
            .insert(term.to_string(), result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls whose name starts with `method`.
    pub fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(' ').next() == Some(method))
            .count()
    }

    fn record(&self, method: &'static str, args: &str) -> std::result::Result<(), ApiError> {
        let call = if args.is_empty() {
            method.to_string()
        } else {
            format!("{} {}", method, args)
        };
        self.calls.lock().unwrap().push(call);
        if self.fail.lock().unwrap().contains(&method) {
            return Err(server_error(500));
        }
        Ok(())
    }

    async fn stall(&self, call: &str) {
        let delay = self.delays.lock().unwrap().get(call).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

pub fn feed(feed_id: &str, images: usize) -> FeedGroupData {
    FeedGroupData {
        feed_item: FeedItem {
            feed_id: feed_id.to_string(),
            author_id: "u2".into(),
            content: "hello".into(),
            feed_images: if images == 0 {
                None
            } else {
                Some((0..images).map(|i| format!("{}-{}.jpg", feed_id, i)).collect())
            },
            created_time: "2024-03-01T10:00:00Z".into(),
            privacy_type: "PUBLIC".into(),
            dynamic_link: format!("https://clover.link/{}", feed_id),
        },
        author_profile: AuthorProfile {
            user_id: "u2".into(),
            display_name: "Ann Lee".into(),
            avatar_img_url: None,
        },
        total_react: 5,
        total_comment: 1,
        current_user_react: None,
    }
}

pub fn user_row(user_id: &str, lastname: &str) -> SearchUser {
    SearchUser {
        user_id: user_id.into(),
        firstname: "Ann".into(),
        lastname: Some(lastname.into()),
        avatar: None,
        connected: false,
    }
}

#[async_trait]
impl CloverApi for FakeApi {
    async fn login(&self, form: &LoginForm) -> std::result::Result<LoginData, ApiError> {
        self.record("login", &form.email)?;
        Ok(LoginData {
            token_id: "tok-1".into(),
            user_id: Some("u1".into()),
        })
    }

    async fn register(&self, form: &RegisterForm) -> std::result::Result<(), ApiError> {
        self.record("register", &form.email)
    }

    async fn logout(&self, token_id: &str) -> std::result::Result<(), ApiError> {
        self.record("logout", token_id)
    }

    async fn get_user_info(&self) -> std::result::Result<UserInfo, ApiError> {
        self.record("get_user_info", "")?;
        Ok(UserInfo {
            user_id: "u1".into(),
            email: "ann@clover.social".into(),
            firstname: "Ann".into(),
            lastname: "Lee".into(),
            avatar: Some("ann.png".into()),
        })
    }

    async fn get_user_profile(
        &self,
        user_id: &str,
    ) -> std::result::Result<UserProfile, ApiError> {
        self.record("get_user_profile", user_id)?;
        Ok(UserProfile {
            user_id: user_id.into(),
            firstname: "Ann".into(),
            lastname: "Lee".into(),
            avatar: None,
            connected: false,
            total_followers: 0,
            total_following: 0,
        })
    }

    async fn update_profile(
        &self,
        _form: &UpdateProfileForm,
    ) -> std::result::Result<(), ApiError> {
        self.record("update_profile", "")
    }

    async fn upload_avatar(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> std::result::Result<(), ApiError> {
        self.record("upload_avatar", file_name)
    }

    async fn search(&self, keyword: &str) -> std::result::Result<SearchResult, ApiError> {
        self.record("search", keyword)?;
        self.stall(&format!("search {}", keyword)).await;
        if let Some(result) = self.search_by_term.lock().unwrap().get(keyword) {
            return Ok(result.clone());
        }
        Ok(self
            .search_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn list_followers(
        &self,
        query: &FollowQuery,
    ) -> std::result::Result<FollowPage, ApiError> {
        self.record("list_followers", &query.user_id)?;
        Ok(FollowPage { users: vec![], total: 0 })
    }

    async fn list_following(
        &self,
        query: &FollowQuery,
    ) -> std::result::Result<FollowPage, ApiError> {
        self.record("list_following", &query.user_id)?;
        Ok(FollowPage { users: vec![], total: 0 })
    }

    async fn connect(&self, target_user_id: &str, status: u8) -> std::result::Result<(), ApiError> {
        self.record("connect", &format!("{} {}", target_user_id, status))
    }

    async fn get_feed_detail(
        &self,
        feed_id: &str,
    ) -> std::result::Result<FeedGroupData, ApiError> {
        self.record("get_feed_detail", feed_id)?;
        Ok(feed(feed_id, 0))
    }

    async fn get_feed_link(&self, feed_id: &str) -> std::result::Result<String, ApiError> {
        self.record("get_feed_link", feed_id)?;
        Ok(format!("https://clover.link/{}", feed_id))
    }

    async fn post_comment(&self, form: &CommentForm) -> std::result::Result<(), ApiError> {
        let call = format!("{} {} {} {}", form.feed_id, form.author_id, form.level, form.content);
        self.record("post_comment", &call)?;
        self.stall(&format!("post_comment {}", call)).await;
        let mut comments = self.comments.lock().unwrap();
        let comment_id = format!("c{}", comments.len() + 1);
        comments.push(CommentItem {
            comment_id,
            feed_id: form.feed_id.clone(),
            author_id: form.author_id.clone(),
            content: form.content.clone(),
            level: form.level,
            author_profile: None,
            created_time: String::new(),
        });
        Ok(())
    }

    async fn list_comments(
        &self,
        feed_id: &str,
    ) -> std::result::Result<Vec<CommentItem>, ApiError> {
        self.record("list_comments", feed_id)?;
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn check_like(&self, feed_id: &str) -> std::result::Result<LikeStatus, ApiError> {
        self.record("check_like", feed_id)?;
        Ok(LikeStatus {
            current_user_like: *self.liked.lock().unwrap(),
        })
    }

    async fn post_like(&self, feed_id: &str, status: u8) -> std::result::Result<u64, ApiError> {
        self.record("post_like", &format!("{} {}", feed_id, status))?;
        *self.liked.lock().unwrap() = status == 1;
        Ok(*self.like_total.lock().unwrap())
    }

    async fn join_group(&self, group_id: &str) -> std::result::Result<(), ApiError> {
        self.record("join_group", group_id)
    }

    async fn get_group(&self, group_id: &str) -> std::result::Result<GroupInfo, ApiError> {
        self.record("get_group", group_id)?;
        Ok(GroupInfo {
            group: GroupSummary {
                group_id: group_id.into(),
                group_name: "Rustaceans".into(),
                banner_url: None,
            },
            total_member: 3,
            current_user_role: None,
        })
    }
}

/// A clipboard the platform refused to write.
pub struct DeniedClipboard;

impl Clipboard for DeniedClipboard {
    fn write(&self, _text: &str) -> Result<()> {
        Err(BffError::Clipboard("permission denied".into()))
    }
}

/// A registered engine over fakes.
pub struct Harness {
    pub flux: Flux,
    pub api: Arc<FakeApi>,
    pub session: Arc<MemoryStorage>,
    pub clipboard: Arc<MemoryClipboard>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_clipboard(None)
    }

    pub fn with_clipboard(clipboard: Option<Arc<dyn Clipboard>>) -> Self {
        let flux = Flux::new();
        let api = Arc::new(FakeApi::new());
        let session = Arc::new(MemoryStorage::new());
        let memory = Arc::new(MemoryClipboard::new());
        let clipboard = clipboard.unwrap_or_else(|| memory.clone() as Arc<dyn Clipboard>);

        let bff = CloverBff::new(
            &flux,
            api.clone(),
            session.clone(),
            clipboard,
            ClientConfig::default(),
        );
        bff.register(&flux);

        Self {
            flux,
            api,
            session,
            clipboard: memory,
        }
    }

    pub fn sign_in(&self) {
        save_session(
            self.session.as_ref() as &dyn SessionStorage,
            &SessionData {
                token_id: "tok-1".into(),
                user_id: Some("u1".into()),
            },
        )
        .unwrap();
    }
}
