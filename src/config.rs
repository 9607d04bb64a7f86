// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 默认值：未提供对应变量时使用
/// 空字符串表示与页面同源，请求路径直接以 `/api/...` 发出
pub const DEFAULT_API_BASE_URL: &str = "";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "tabhome_token";

pub const API_URL_VAR: &str = "TABHOME_API_URL";
pub const TOKEN_KEY_VAR: &str = "TABHOME_TOKEN_KEY";

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub token_storage_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// 通过查找函数读取配置，读不到或为空就用默认值
    ///
    /// 浏览器端传入编译期的 `option_env!`，本地环境传入进程环境变量。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: read(API_URL_VAR, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            token_storage_key: read(TOKEN_KEY_VAR, DEFAULT_TOKEN_STORAGE_KEY),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
