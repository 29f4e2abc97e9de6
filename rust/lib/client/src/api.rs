use async_trait::async_trait;

use crate::model::*;
use crate::{ApiError, CloverClient, urls};

/// Every backend call the client makes.
///
/// [`CloverClient`] implements it over HTTP. State handlers depend on
/// `Arc<dyn CloverApi>` only.
#[async_trait]
pub trait CloverApi: Send + Sync + 'static {
    // Auth
    async fn login(&self, form: &LoginForm) -> Result<LoginData, ApiError>;
    async fn register(&self, form: &RegisterForm) -> Result<(), ApiError>;
    async fn logout(&self, token_id: &str) -> Result<(), ApiError>;

    // Users
    async fn get_user_info(&self) -> Result<UserInfo, ApiError>;
    async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ApiError>;
    async fn update_profile(&self, form: &UpdateProfileForm) -> Result<(), ApiError>;
    async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ApiError>;
    async fn search(&self, keyword: &str) -> Result<SearchResult, ApiError>;
    async fn list_followers(&self, query: &FollowQuery) -> Result<FollowPage, ApiError>;
    async fn list_following(&self, query: &FollowQuery) -> Result<FollowPage, ApiError>;
    /// Follow (`status` 1) or unfollow (`status` 0).
    async fn connect(&self, target_user_id: &str, status: u8) -> Result<(), ApiError>;

    // Feeds
    async fn get_feed_detail(&self, feed_id: &str) -> Result<FeedGroupData, ApiError>;
    async fn get_feed_link(&self, feed_id: &str) -> Result<String, ApiError>;
    async fn post_comment(&self, form: &CommentForm) -> Result<(), ApiError>;
    async fn list_comments(&self, feed_id: &str) -> Result<Vec<CommentItem>, ApiError>;
    async fn check_like(&self, feed_id: &str) -> Result<LikeStatus, ApiError>;
    /// Add (`status` 1) or remove (`status` 0) a like. Returns the new total.
    async fn post_like(&self, feed_id: &str, status: u8) -> Result<u64, ApiError>;

    // Groups
    async fn join_group(&self, group_id: &str) -> Result<(), ApiError>;
    async fn get_group(&self, group_id: &str) -> Result<GroupInfo, ApiError>;
}

#[async_trait]
impl CloverApi for CloverClient {
    async fn login(&self, form: &LoginForm) -> Result<LoginData, ApiError> {
        self.post_json(urls::LOGIN, form).await
    }

    async fn register(&self, form: &RegisterForm) -> Result<(), ApiError> {
        self.post_json_unit(urls::REGISTER, form).await
    }

    async fn logout(&self, token_id: &str) -> Result<(), ApiError> {
        self.delete(urls::LOGOUT, &[("tokenId", token_id)]).await
    }

    async fn get_user_info(&self) -> Result<UserInfo, ApiError> {
        self.get(urls::USER_INFO, &()).await
    }

    async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.get(&urls::user_profile(user_id), &()).await
    }

    async fn update_profile(&self, form: &UpdateProfileForm) -> Result<(), ApiError> {
        self.post_query(urls::UPDATE_PROFILE, form).await
    }

    async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        self.post_multipart(urls::UPDATE_AVATAR, form).await
    }

    async fn search(&self, keyword: &str) -> Result<SearchResult, ApiError> {
        self.get(urls::SEARCH, &[("keyword", keyword)]).await
    }

    async fn list_followers(&self, query: &FollowQuery) -> Result<FollowPage, ApiError> {
        self.get(urls::FOLLOWERS, query).await
    }

    async fn list_following(&self, query: &FollowQuery) -> Result<FollowPage, ApiError> {
        self.get(urls::FOLLOWING, query).await
    }

    async fn connect(&self, target_user_id: &str, status: u8) -> Result<(), ApiError> {
        let form = ConnectForm {
            target_user_id: target_user_id.to_string(),
            status,
        };
        self.post_json_unit(urls::CONNECT, &form).await
    }

    async fn get_feed_detail(&self, feed_id: &str) -> Result<FeedGroupData, ApiError> {
        self.get(urls::FEED_DETAIL, &[("feedId", feed_id)]).await
    }

    async fn get_feed_link(&self, feed_id: &str) -> Result<String, ApiError> {
        self.get(urls::FEED_LINK, &[("feedId", feed_id)]).await
    }

    async fn post_comment(&self, form: &CommentForm) -> Result<(), ApiError> {
        self.post_json_unit(urls::FEED_COMMENT, form).await
    }

    async fn list_comments(&self, feed_id: &str) -> Result<Vec<CommentItem>, ApiError> {
        self.get(urls::FEED_COMMENTS, &[("feedId", feed_id)]).await
    }

    async fn check_like(&self, feed_id: &str) -> Result<LikeStatus, ApiError> {
        self.get(urls::FEED_REACT_CHECK, &[("feedId", feed_id)]).await
    }

    async fn post_like(&self, feed_id: &str, status: u8) -> Result<u64, ApiError> {
        let form = ReactForm {
            feed_id: feed_id.to_string(),
            react_type: ReactKind::Like,
            status,
        };
        self.post_json(urls::FEED_REACT, &form).await
    }

    async fn join_group(&self, group_id: &str) -> Result<(), ApiError> {
        self.post_query(urls::GROUP_JOIN, &[("groupId", group_id)]).await
    }

    async fn get_group(&self, group_id: &str) -> Result<GroupInfo, ApiError> {
        self.get(&urls::group(group_id), &()).await
    }
}
