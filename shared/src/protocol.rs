use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// Endpoint Definitions
// =========================================================

/// Every REST endpoint the catalog backend exposes.
///
/// Path segments are kept unencoded here; the client percent-encodes them
/// when joining onto the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Categories,
    Tools { page: u32, per_page: u32 },
    CategoryTools { slug: String },
    Tool { slug: String },
    Search { query: String, page: u32, per_page: u32 },
    News { page: u32, per_page: u32 },
    NewsItem { slug: String },
    Login,
    CurrentUser,
    Register,
    // Admin
    CreateTool,
    UpdateTool { slug: String },
    DeleteTool { slug: String },
    Inventions,
    Invention { slug: String },
    CreateInvention,
    UpdateInvention { slug: String },
    DeleteInvention { slug: String },
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Login | Self::Register | Self::CreateTool | Self::CreateInvention => {
                HttpMethod::Post
            }
            Self::UpdateTool { .. } => HttpMethod::Patch,
            Self::UpdateInvention { .. } => HttpMethod::Put,
            Self::DeleteTool { .. } | Self::DeleteInvention { .. } => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    /// The URL path below the API base, as raw segments.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Categories => vec!["categories"],
            Self::Tools { .. } | Self::CreateTool => vec!["tools"],
            Self::CategoryTools { slug } => vec!["categories", slug.as_str(), "tools"],
            Self::Tool { slug } | Self::UpdateTool { slug } => vec!["tools", slug.as_str()],
            Self::Search { .. } => vec!["search"],
            Self::News { .. } => vec!["news"],
            Self::NewsItem { slug } => vec!["news", slug.as_str()],
            Self::Login => vec!["auth", "login", "json"],
            Self::CurrentUser => vec!["auth", "me"],
            Self::Register => vec!["auth", "register"],
            Self::DeleteTool { slug } => vec!["admin", "tools", slug.as_str()],
            Self::Inventions | Self::CreateInvention => vec!["admin", "inventions"],
            Self::Invention { slug }
            | Self::UpdateInvention { slug }
            | Self::DeleteInvention { slug } => vec!["admin", "inventions", slug.as_str()],
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Tools { page, per_page } | Self::News { page, per_page } => vec![
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
            Self::Search {
                query,
                page,
                per_page,
            } => vec![
                ("query", query.clone()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("sort_by", "relevance".to_string()),
                ("sort_order", "-1".to_string()),
            ],
            _ => Vec::new(),
        }
    }

    /// Admin endpoints refuse to run without a bearer token.
    pub fn requires_token(&self) -> bool {
        matches!(
            self,
            Self::CreateTool
                | Self::UpdateTool { .. }
                | Self::DeleteTool { .. }
                | Self::Inventions
                | Self::Invention { .. }
                | Self::CreateInvention
                | Self::UpdateInvention { .. }
                | Self::DeleteInvention { .. }
        )
    }

    /// Human-readable path, for logs.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}
