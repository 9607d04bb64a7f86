use crate::{
    AuthResponse, Bookmark, LoginRequest, MessageResponse, NewBookmark, Preferences,
    RegisterRequest, SearchEngineCatalog, User,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path template.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token must be attached.
    const AUTHENTICATED: bool = true;

    /// Concrete path for this request. Endpoints with path parameters override it.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Authentication
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/api/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

/// Fetch the profile behind the current token
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = User;
    const PATH: &'static str = "/api/user";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Bookmarks
// =========================================================

/// List all bookmarks of the current user
#[derive(Debug, Serialize, Deserialize)]
pub struct ListBookmarksRequest;

impl ApiRequest for ListBookmarksRequest {
    type Response = Vec<Bookmark>;
    const PATH: &'static str = "/api/bookmarks";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Create a bookmark. The server assigns the id.
impl ApiRequest for NewBookmark {
    type Response = Bookmark;
    const PATH: &'static str = "/api/bookmarks";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Delete a bookmark by id. The id travels in the path, not the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteBookmarkRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteBookmarkRequest {
    type Response = MessageResponse;
    const PATH: &'static str = "/api/bookmarks";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Preferences & reference data
// =========================================================

/// Replace the user's preference set
impl ApiRequest for Preferences {
    type Response = MessageResponse;
    const PATH: &'static str = "/api/user/preferences";
    const METHOD: HttpMethod = HttpMethod::Put;
}

/// Search engine catalog (public)
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSearchEnginesRequest;

impl ApiRequest for ListSearchEnginesRequest {
    type Response = SearchEngineCatalog;
    const PATH: &'static str = "/api/search-engines";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_path_carries_id() {
        let req = DeleteBookmarkRequest { id: "b-42".into() };
        assert_eq!(req.path(), "/api/bookmarks/b-42");
        assert_eq!(ListBookmarksRequest.path(), "/api/bookmarks");
    }

    #[test]
    fn only_auth_and_catalog_are_public() {
        assert!(!LoginRequest::AUTHENTICATED);
        assert!(!RegisterRequest::AUTHENTICATED);
        assert!(!ListSearchEnginesRequest::AUTHENTICATED);
        assert!(CurrentUserRequest::AUTHENTICATED);
        assert!(NewBookmark::AUTHENTICATED);
        assert!(Preferences::AUTHENTICATED);
    }
}
