use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use tabhome_shared::protocol::HttpMethod;

#[cfg(test)]
use futures::channel::oneshot;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 传输层错误
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    /// 请求构建失败
    #[error("request build failed: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    Network(String),
    /// 响应体读取失败
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// HTTP 客户端特性 (Trait)
/// 浏览器环境下 fetch 的 Future 不是 Send 的，所以使用 (?Send)
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: reqwest 客户端 (native)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &req.url);

        for (k, v) in req.headers {
            builder = builder.header(k, v);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            if e.is_builder() {
                HttpError::RequestBuild(e.to_string())
            } else {
                HttpError::Network(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

/// 记录下来的请求
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[cfg(test)]
impl RecordedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        self.body
            .as_deref()
            .map(|b| serde_json::from_str(b).unwrap())
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
type RouteKey = (HttpMethod, String);

/// 可克隆的假客户端：所有克隆共享同一份响应表与请求记录
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockHttpClient {
    // (Method, URL) -> (Status, Response Body)
    responses: Rc<RefCell<HashMap<RouteKey, (u16, String)>>>,
    // 模拟网络失败的路由
    failures: Rc<RefCell<HashMap<RouteKey, String>>>,
    // 挂起中的路由：收到放行信号后才返回
    gates: Rc<RefCell<HashMap<RouteKey, oneshot::Receiver<()>>>>,
    pub requests: Rc<RefCell<Vec<RecordedRequest>>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert((method, url.to_string()), (status, body.to_string()));
    }

    pub fn mock_network_failure(&self, method: HttpMethod, url: &str) {
        self.failures
            .borrow_mut()
            .insert((method, url.to_string()), "connection refused".to_string());
    }

    /// 让下一次匹配的请求挂起，直到返回的 Sender 被触发
    pub fn hold(&self, method: HttpMethod, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert((method, url.to_string()), rx);
        tx
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn requests_to(&self, method: HttpMethod, url: &str) -> Vec<RecordedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: req.method,
            url: req.url.clone(),
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        let key = (req.method, req.url.clone());

        let gate = self.gates.borrow_mut().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(reason) = self.failures.borrow().get(&key) {
            return Err(HttpError::Network(reason.clone()));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            })
        }
    }
}
