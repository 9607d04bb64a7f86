//! HTTP 客户端实现
//!
//! 基于 `gloo-net` 的 fetch 封装，实现核心层的 `HttpClient` trait。

use gloo_net::http::{Method, RequestBuilder};
use tabhome::request::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttpClient;

fn method(m: HttpMethod) -> Method {
    match m {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for GlooHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = RequestBuilder::new(&req.url).method(method(req.method));
        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuild(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| HttpError::Body(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
