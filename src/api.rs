//! 目录后端的 REST 客户端
//!
//! 每个方法对应一个后端接口：拼 URL、带上令牌、发请求、把原始 JSON 规范化。
//! 不做任何重试；请求失败一律返回错误，由调用方决定如何呈现。

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use crate::storage::TokenStore;
use serde::Serialize;
use serde_json::Value;
use thatnewai_shared::normalize::{
    self, NormalizeError, extract_collection, extract_list, parse_each,
};
use thatnewai_shared::pagination::server_total;
use thatnewai_shared::protocol::Endpoint;
use thatnewai_shared::search::parse_search_response;
use thatnewai_shared::{
    Category, InventionPost, LoginRequest, LoginResponse, NewsItem, PaginatedResponse,
    RegisterRequest, SearchResponse, Tool, ToolDraft, User,
};
use url::Url;

/// 请求使用哪个令牌
#[derive(Debug, Clone, Copy)]
enum Bearer<'a> {
    /// 令牌存储中的令牌（若有）
    Stored,
    /// 显式指定（登录流程中令牌尚未落盘）
    Explicit(&'a str),
}

/// 首页需要的两份数据，各自独立成败
#[derive(Debug)]
pub struct HomeFeed {
    pub categories: ApiResult<Vec<Category>>,
    pub latest: ApiResult<Vec<Tool>>,
}

#[derive(Clone)]
pub struct CatalogApi<C, S> {
    base: Url,
    client: C,
    tokens: S,
}

impl<C: HttpClient, S: TokenStore> CatalogApi<C, S> {
    pub fn new(base_url: &str, client: C, tokens: S) -> ApiResult<Self> {
        let base = Url::parse(base_url).map_err(|e| {
            ApiError::invalid_input(format!("invalid API base URL `{base_url}`: {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::invalid_input(format!(
                "API base URL `{base_url}` cannot carry a path"
            )));
        }
        Ok(Self {
            base,
            client,
            tokens,
        })
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // =========================================================
    // 请求管道
    // =========================================================

    fn url_for<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
        query: &[(&str, String)],
    ) -> ApiResult<String> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::invalid_input("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url.into())
    }

    async fn execute(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<Value>,
        bearer: Bearer<'_>,
    ) -> ApiResult<Value> {
        let token = match bearer {
            Bearer::Stored => self.tokens.get(),
            Bearer::Explicit(token) => Some(token.to_string()),
        };

        let mut req = HttpRequest::new(&url, method).with_header("Accept", "application/json");
        if let Some(token) = token.as_deref().filter(|t| !t.is_empty()) {
            req = req.with_bearer(token);
        }
        if let Some(body) = body {
            req = req.with_body(body);
        }

        tracing::debug!(%method, %url, "api request");
        let resp = self.client.send(req).await?;

        if !resp.is_success() {
            let err = ApiError::from_response(resp.status, &resp.body);
            tracing::debug!(%method, %url, status = resp.status, error = %err, "api request failed");
            return Err(err);
        }
        resp.json_value()
    }

    async fn call(&self, endpoint: &Endpoint, body: Option<Value>) -> ApiResult<Value> {
        if endpoint.requires_token() && self.tokens.get().is_none() {
            return Err(ApiError::unauthorized("authentication required")
                .in_op_with("api.call", endpoint.path()));
        }
        let url = self.url_for(endpoint.segments(), &endpoint.query())?;
        self.execute(endpoint.method(), url, body, Bearer::Stored)
            .await
    }

    /// 通用请求：`path` 相对 API 根路径，例如 `/tools/my-tool`
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let segments = path.split('/').filter(|s| !s.is_empty());
        let url = self.url_for(segments, &[])?;
        self.execute(method, url, body, Bearer::Stored)
            .await
            .map_err(|e| e.in_op_with("api.request", path))
    }

    // =========================================================
    // 公开目录
    // =========================================================

    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        let raw = self.call(&Endpoint::Categories, None).await?;
        let categories = parse_collection(&raw, "category", normalize::parse_category)
            .map_err(|e| e.in_op("api.get_categories"))?;
        Ok(categories)
    }

    pub async fn get_tools(&self, page: u32, per_page: u32) -> ApiResult<PaginatedResponse<Tool>> {
        let endpoint = Endpoint::Tools { page, per_page };
        let raw = self.call(&endpoint, None).await?;

        let items = extract_collection(&raw)
            .map_err(|e| ApiError::from(e).in_op_with("api.get_tools", format!("page={page}")))?;
        let tools = non_empty(parse_each(items, "tool", normalize::parse_tool))
            .map_err(|e| e.in_op("api.get_tools"))?;

        Ok(PaginatedResponse::assemble(
            tools,
            items.len(),
            server_total(&raw),
            page,
            per_page,
        ))
    }

    pub async fn get_tools_by_category(&self, slug: &str) -> ApiResult<Vec<Tool>> {
        let endpoint = Endpoint::CategoryTools {
            slug: slug.to_string(),
        };
        let raw = self.call(&endpoint, None).await?;
        parse_collection(&raw, "tool", normalize::parse_tool)
            .map_err(|e| e.in_op_with("api.get_tools_by_category", slug))
    }

    pub async fn get_tool(&self, slug: &str) -> ApiResult<Tool> {
        let endpoint = Endpoint::Tool {
            slug: slug.to_string(),
        };
        let raw = self.call(&endpoint, None).await?;
        normalize::parse_tool_detail(&raw).map_err(|e| {
            tracing::warn!(slug, error = %e, "invalid tool payload");
            ApiError::from(e).in_op_with("api.get_tool", slug)
        })
    }

    /// 搜索；空白查询不访问后端
    pub async fn search(&self, query: &str, page: u32, per_page: u32) -> ApiResult<SearchResponse> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResponse::empty(query, page, per_page));
        }

        let endpoint = Endpoint::Search {
            query: query.to_string(),
            page,
            per_page,
        };
        let raw = self.call(&endpoint, None).await?;
        parse_search_response(&raw, query, page, per_page)
            .map_err(|e| ApiError::from(e).in_op_with("api.search", query))
    }

    /// 新闻列表；空列表合法（超出末页时页面会退回上一页）
    pub async fn get_news(&self, page: u32, per_page: u32) -> ApiResult<PaginatedResponse<NewsItem>> {
        let endpoint = Endpoint::News { page, per_page };
        let raw = self.call(&endpoint, None).await?;

        let items = extract_list(&raw)
            .map_err(|e| ApiError::from(e).in_op_with("api.get_news", format!("page={page}")))?;
        let news = parse_each(items, "news item", normalize::parse_news_item);

        Ok(PaginatedResponse::assemble(
            news,
            items.len(),
            server_total(&raw),
            page,
            per_page,
        ))
    }

    pub async fn get_news_item(&self, slug: &str) -> ApiResult<NewsItem> {
        let endpoint = Endpoint::NewsItem {
            slug: slug.to_string(),
        };
        let raw = self.call(&endpoint, None).await?;
        normalize::parse_news_detail(&raw)
            .map_err(|e| ApiError::from(e).in_op_with("api.get_news_item", slug))
    }

    /// 首页：分类与最新工具并发获取
    pub async fn home(&self, latest_count: u32) -> HomeFeed {
        let (categories, latest) =
            futures::join!(self.get_categories(), self.get_tools(1, latest_count));
        HomeFeed {
            categories,
            latest: latest.map(|page| page.data),
        }
    }

    // =========================================================
    // 认证
    // =========================================================

    /// 用邮箱密码换取令牌（不落盘）
    pub async fn exchange_credentials(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let body = to_body(credentials)?;
        let raw = self.call(&Endpoint::Login, Some(body)).await?;

        let login: LoginResponse = serde_json::from_value(raw).map_err(|e| {
            ApiError::invalid_data(format!("malformed login response: {e}"))
                .in_op("api.exchange_credentials")
        })?;

        if login.access_token.trim().is_empty() {
            return Err(ApiError::invalid_data("login response carried an empty token")
                .in_op("api.exchange_credentials"));
        }
        if !login.token_type.eq_ignore_ascii_case("bearer") {
            return Err(ApiError::invalid_data(format!(
                "unsupported token type `{}`",
                login.token_type
            ))
            .in_op("api.exchange_credentials"));
        }
        Ok(login)
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        let raw = self.call(&Endpoint::CurrentUser, None).await?;
        parse_user(&raw)
    }

    /// 用尚未保存的令牌获取当前用户
    pub async fn current_user_with_token(&self, token: &str) -> ApiResult<User> {
        let endpoint = Endpoint::CurrentUser;
        let url = self.url_for(endpoint.segments(), &[])?;
        let raw = self
            .execute(endpoint.method(), url, None, Bearer::Explicit(token))
            .await?;
        parse_user(&raw)
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let body = to_body(request)?;
        let raw = self
            .call(&Endpoint::Register, Some(body))
            .await
            .map_err(|e| e.in_op("api.register"))?;
        parse_user(&raw)
    }

    // =========================================================
    // 后台管理 (需要令牌)
    // =========================================================

    pub async fn create_tool(&self, draft: &ToolDraft) -> ApiResult<()> {
        let body = to_body(draft)?;
        self.call(&Endpoint::CreateTool, Some(body))
            .await
            .map_err(|e| e.in_op_with("api.create_tool", draft.slug.as_str()))?;
        Ok(())
    }

    /// 编辑表单回填
    pub async fn get_tool_draft(&self, slug: &str) -> ApiResult<ToolDraft> {
        let endpoint = Endpoint::Tool {
            slug: slug.to_string(),
        };
        let raw = self.call(&endpoint, None).await?;
        normalize::parse_tool_draft(&raw)
            .map_err(|e| ApiError::from(e).in_op_with("api.get_tool_draft", slug))
    }

    pub async fn update_tool(&self, slug: &str, draft: &ToolDraft) -> ApiResult<()> {
        let body = to_body(draft)?;
        let endpoint = Endpoint::UpdateTool {
            slug: slug.to_string(),
        };
        self.call(&endpoint, Some(body))
            .await
            .map_err(|e| e.in_op_with("api.update_tool", slug))?;
        Ok(())
    }

    pub async fn delete_tool(&self, slug: &str) -> ApiResult<()> {
        let endpoint = Endpoint::DeleteTool {
            slug: slug.to_string(),
        };
        self.call(&endpoint, None)
            .await
            .map_err(|e| e.in_op_with("api.delete_tool", slug))?;
        Ok(())
    }

    pub async fn get_posts(&self) -> ApiResult<Vec<InventionPost>> {
        let raw = self.call(&Endpoint::Inventions, None).await?;
        let items = extract_list(&raw).map_err(|e| ApiError::from(e).in_op("api.get_posts"))?;
        Ok(parse_each(items, "invention post", normalize::parse_invention_post))
    }

    pub async fn get_post(&self, slug: &str) -> ApiResult<InventionPost> {
        let endpoint = Endpoint::Invention {
            slug: slug.to_string(),
        };
        let raw = self.call(&endpoint, None).await?;
        normalize::parse_invention_post(&raw)
            .map_err(|e| ApiError::from(e).in_op_with("api.get_post", slug))
    }

    pub async fn create_post(&self, post: &InventionPost) -> ApiResult<()> {
        let body = to_body(post)?;
        self.call(&Endpoint::CreateInvention, Some(body))
            .await
            .map_err(|e| e.in_op_with("api.create_post", post.slug.as_str()))?;
        Ok(())
    }

    pub async fn update_post(&self, slug: &str, post: &InventionPost) -> ApiResult<()> {
        let body = to_body(post)?;
        let endpoint = Endpoint::UpdateInvention {
            slug: slug.to_string(),
        };
        self.call(&endpoint, Some(body))
            .await
            .map_err(|e| e.in_op_with("api.update_post", slug))?;
        Ok(())
    }

    pub async fn delete_post(&self, slug: &str) -> ApiResult<()> {
        let endpoint = Endpoint::DeleteInvention {
            slug: slug.to_string(),
        };
        self.call(&endpoint, None)
            .await
            .map_err(|e| e.in_op_with("api.delete_post", slug))?;
        Ok(())
    }
}

// =========================================================
// 辅助函数
// =========================================================

fn to_body<T: Serialize>(payload: &T) -> ApiResult<Value> {
    Ok(serde_json::to_value(payload)?)
}

/// 逐项宽松解析后若一项都没留下，同样视为格式错误
fn non_empty<T>(items: Vec<T>) -> ApiResult<Vec<T>> {
    if items.is_empty() {
        tracing::warn!("every item in the collection was malformed");
        return Err(NormalizeError::EmptyCollection.into());
    }
    Ok(items)
}

fn parse_collection<T>(
    raw: &Value,
    what: &'static str,
    parse: impl Fn(&Value) -> normalize::NormalizeResult<T>,
) -> ApiResult<Vec<T>> {
    let items = extract_collection(raw).map_err(|e| {
        tracing::warn!(error = %e, "invalid {what} collection");
        ApiError::from(e)
    })?;
    non_empty(parse_each(items, what, parse))
}

fn parse_user(raw: &Value) -> ApiResult<User> {
    normalize::parse_user(raw).map_err(|e| {
        // 认证接口返回的用户缺 id 不是 "未找到"，而是数据不合法
        ApiError::invalid_data(e.to_string()).in_op("api.parse_user")
    })
}

#[cfg(test)]
mod tests;
