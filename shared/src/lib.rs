use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod date;
pub mod protocol;
pub mod serde_helper;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

pub const DEFAULT_BOOKMARK_ICON: &str = "🔗";
pub const DEFAULT_BOOKMARK_CATEGORY: &str = "general";

/// 添加书签表单中可选的固定分类
pub const BOOKMARK_CATEGORIES: [&str; 10] = [
    "general",
    "search",
    "social",
    "entertainment",
    "education",
    "tools",
    "news",
    "shopping",
    "email",
    "work",
];

/// 添加书签表单中的常用图标
pub const COMMON_ICONS: [&str; 20] = [
    "🔗", "🔍", "📧", "🎵", "🎮", "📚", "🛒", "📰", "💼", "🌐", "⚡", "🚀", "💡", "🎯", "🔥", "⭐",
    "🎨", "📱", "💻", "🎪",
];

// =========================================================
// 偏好设置 (Preferences)
// =========================================================

/// 枚举值解析失败时返回的错误，携带原始输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// 为偏好枚举生成 `as_str` / `FromStr` / `Display`，保证线上字符串唯一
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

wire_enum!(Theme { Dark => "dark", Light => "light" });

/// 设置面板中可选的默认搜索引擎（目录中其余引擎只出现在搜索框里）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngineKey {
    #[default]
    Google,
    Bing,
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    #[serde(rename = "youtube")]
    YouTube,
    Wikipedia,
}

wire_enum!(SearchEngineKey {
    Google => "google",
    Bing => "bing",
    DuckDuckGo => "duckduckgo",
    YouTube => "youtube",
    Wikipedia => "wikipedia",
});

impl SearchEngineKey {
    pub fn label(&self) -> &'static str {
        match self {
            SearchEngineKey::Google => "Google",
            SearchEngineKey::Bing => "Bing",
            SearchEngineKey::DuckDuckGo => "DuckDuckGo",
            SearchEngineKey::YouTube => "YouTube",
            SearchEngineKey::Wikipedia => "Wikipedia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

wire_enum!(ClockFormat { TwelveHour => "12h", TwentyFourHour => "24h" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Bn,
    En,
}

wire_enum!(Language { Bn => "bn", En => "en" });

/// 用户偏好
///
/// 后端返回的 `preferences` 可能为空对象或包含未知取值，
/// 每个字段解析失败时都回退到默认值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, deserialize_with = "serde_helper::parse_or_default")]
    pub theme: Theme,
    #[serde(default, deserialize_with = "serde_helper::parse_or_default")]
    pub default_search_engine: SearchEngineKey,
    #[serde(default, deserialize_with = "serde_helper::parse_or_default")]
    pub clock_format: ClockFormat,
    #[serde(default, deserialize_with = "serde_helper::parse_or_default")]
    pub language: Language,
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default, deserialize_with = "serde_helper::null_as_default")]
    pub preferences: Preferences,
}

impl User {
    /// 用户菜单头像上显示的首字母（大写）
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// 创建书签的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub icon: String,
    pub category: String,
}

impl Default for NewBookmark {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            icon: default_icon(),
            category: default_category(),
        }
    }
}

fn default_icon() -> String {
    DEFAULT_BOOKMARK_ICON.to_string()
}

fn default_category() -> String {
    DEFAULT_BOOKMARK_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngine {
    pub name: String,
    /// 查询前缀，直接拼接编码后的查询词
    pub url: String,
}

/// 搜索引擎目录：引擎 key -> 引擎信息
pub type SearchEngineCatalog = std::collections::BTreeMap<String, SearchEngine>;

// =========================================================
// 认证 (Authentication)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// 登录 / 注册的响应
///
/// 原后端只返回 `access_token`，此时 `user` 为空，需要再请求 `/api/user`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub user: Option<User>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// 通用确认响应，如 `{"message": "Bookmark deleted successfully"}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// 错误响应体，兼容 `{"detail": ...}` 与 `{"message": ...}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.message.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_fall_back_per_field() {
        let prefs: Preferences = serde_json::from_str(
            r#"{"theme":"light","default_search_engine":"translate_bn","clock_format":null}"#,
        )
        .unwrap();

        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.default_search_engine, SearchEngineKey::Google);
        assert_eq!(prefs.clock_format, ClockFormat::TwelveHour);
        assert_eq!(prefs.language, Language::Bn);
    }

    #[test]
    fn preferences_use_wire_strings() {
        let prefs = Preferences {
            theme: Theme::Light,
            default_search_engine: SearchEngineKey::DuckDuckGo,
            clock_format: ClockFormat::TwentyFourHour,
            language: Language::En,
        };
        let value = serde_json::to_value(prefs).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "theme": "light",
                "default_search_engine": "duckduckgo",
                "clock_format": "24h",
                "language": "en"
            })
        );
    }

    #[test]
    fn user_without_preferences_gets_defaults() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","name":"rahim","email":"r@example.com","preferences":{},"created_at":"2024-03-01T10:00:00.123000"}"#,
        )
        .unwrap();

        assert_eq!(user.preferences, Preferences::default());
        assert!(user.created_at.is_some());
        assert_eq!(user.initial(), "R");
    }

    #[test]
    fn bookmark_defaults_icon_and_category() {
        let bookmark: Bookmark =
            serde_json::from_str(r#"{"id":"b1","title":"X","url":"https://x.dev"}"#).unwrap();
        assert_eq!(bookmark.icon, DEFAULT_BOOKMARK_ICON);
        assert_eq!(bookmark.category, DEFAULT_BOOKMARK_CATEGORY);
    }

    #[test]
    fn auth_response_accepts_token_alias() {
        let resp: AuthResponse = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.token_type, "bearer");
        assert!(resp.user.is_none());
    }

    #[test]
    fn error_body_prefers_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Email already registered"}"#).unwrap();
        assert_eq!(body.text(), Some("Email already registered"));
        assert_eq!(ErrorBody::default().text(), None);
    }
}
