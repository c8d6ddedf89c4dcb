use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ApiError;

/// Fixed base endpoint of the JSONPlaceholder demo service.
pub const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Blocking client for the `/users` resource collection and its nested
/// posts/comments sub-resources.
///
/// Payloads are untyped `serde_json::Value` objects throughout: whatever the
/// server returns or accepts is passed through verbatim, unknown fields
/// included. The one reusable `reqwest` handle is constructed once and shared
/// by every operation; each call is otherwise stateless.
#[derive(Clone)]
pub struct UserApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl UserApiClient {
    /// Client against the fixed JSONPlaceholder endpoint.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Client against an arbitrary base URL, mainly for tests.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// POST the given object to `/users` and return the decoded response body.
    pub fn create_user(&self, user: &Value) -> Result<Value, ApiError> {
        let url = format!("{}/users", self.base_url);
        debug!(target: "api", "POST {}", url);

        let response = self.client.post(url).json(user).send()?;
        decode_object(response)
    }

    /// PATCH `/users/{id}` with a partial object: only the fields present in
    /// `partial_user` are modified server-side. Returns the decoded response.
    pub fn update_user(&self, user_id: u64, partial_user: &Value) -> Result<Value, ApiError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        debug!(target: "api", "PATCH {}", url);

        let response = self.client.patch(url).json(partial_user).send()?;
        decode_object(response)
    }

    /// DELETE `/users/{id}`. Returns whether the response status was 2xx; a
    /// non-2xx status is the negative answer, not an error.
    pub fn delete_user(&self, user_id: u64) -> Result<bool, ApiError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        debug!(target: "api", "DELETE {}", url);

        let response = self.client.delete(url).send()?;
        Ok(response.status().is_success())
    }

    /// GET `/users`, decoded as an array. Server-provided order is preserved.
    pub fn get_all_users(&self) -> Result<Vec<Value>, ApiError> {
        let url = format!("{}/users", self.base_url);
        debug!(target: "api", "GET {}", url);

        let response = self.client.get(url).send()?;
        decode_array(response)
    }

    /// GET `/users/{id}` and decode whatever body comes back. The status code
    /// is not inspected; the demo API answers 404s with a well-formed `{}`
    /// and that object is returned as-is.
    pub fn get_user_by_id(&self, user_id: u64) -> Result<Value, ApiError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        debug!(target: "api", "GET {}", url);

        let response = self.client.get(url).send()?;
        decode_object(response)
    }

    /// GET `/users?username={username}` and return the first match, or `None`
    /// when the filtered result is empty.
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<Value>, ApiError> {
        let url = format!("{}/users", self.base_url);
        debug!(target: "api", "GET {}?username={}", url, username);

        let response = self
            .client
            .get(url)
            .query(&[("username", username)])
            .send()?;
        let mut users = decode_array(response)?;
        if users.is_empty() {
            Ok(None)
        } else {
            Ok(Some(users.swap_remove(0)))
        }
    }

    /// Fetch the user's posts, take the last one (server order, not highest
    /// id), fetch its comments, and write the raw comment JSON to
    /// `user-{userId}-post-{lastPostId}-comments.json` in the current working
    /// directory. A user with no posts produces no second request and no file.
    pub fn fetch_and_save_comments_for_last_post_of_user(
        &self,
        user_id: u64,
    ) -> Result<(), ApiError> {
        self.fetch_and_save_comments_in(user_id, Path::new("."))
    }

    /// Same as [`Self::fetch_and_save_comments_for_last_post_of_user`] but
    /// writes into `dir` instead of the current working directory.
    pub fn fetch_and_save_comments_in(&self, user_id: u64, dir: &Path) -> Result<(), ApiError> {
        let posts_url = format!("{}/users/{}/posts", self.base_url, user_id);
        debug!(target: "api", "GET {}", posts_url);

        let response = self.client.get(posts_url).send()?;
        let posts = decode_array(response)?;

        let last_post = match posts.last() {
            Some(post) => post,
            None => {
                debug!(target: "api", "user {} has no posts, nothing to save", user_id);
                return Ok(());
            }
        };
        let last_post_id = last_post
            .get("id")
            .and_then(Value::as_u64)
            .ok_or(ApiError::FieldMissing { field: "id" })?;

        let comments_url = format!("{}/posts/{}/comments", self.base_url, last_post_id);
        debug!(target: "api", "GET {}", comments_url);

        // The comment array is persisted verbatim, never parsed. An existing
        // file of the same name is overwritten.
        let comments_body = self.client.get(comments_url).send()?.text()?;
        let file_name = comments_file_name(user_id, last_post_id);
        fs::write(dir.join(&file_name), comments_body)?;

        info!(target: "api", "saved comments for post {} to {}", last_post_id, file_name);
        Ok(())
    }
}

impl Default for UserApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the full body, then parse. Keeps transport failures (body read) and
/// decode failures distinguishable.
fn decode_object(response: reqwest::blocking::Response) -> Result<Value, ApiError> {
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn decode_array(response: reqwest::blocking::Response) -> Result<Vec<Value>, ApiError> {
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn comments_file_name(user_id: u64, post_id: u64) -> String {
    format!("user-{}-post-{}-comments.json", user_id, post_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_file_name_format() {
        assert_eq!(comments_file_name(1, 9), "user-1-post-9-comments.json");
        assert_eq!(comments_file_name(42, 7), "user-42-post-7-comments.json");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = UserApiClient::with_base_url("http://localhost:9999/");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
