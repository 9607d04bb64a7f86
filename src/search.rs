use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tabhome_shared::{SearchEngineCatalog, SearchEngineKey, User};

/// 与浏览器 `encodeURIComponent` 保留相同的字符
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, URI_COMPONENT).to_string()
}

/// 搜索框初始选中的引擎
pub fn default_engine(user: Option<&User>) -> SearchEngineKey {
    user.map(|u| u.preferences.default_search_engine)
        .unwrap_or_default()
}

/// 拼接搜索结果地址
///
/// 查询为空或引擎不在目录中时返回 None，调用方什么都不做。
pub fn build_search_url(catalog: &SearchEngineCatalog, engine: &str, query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    let engine = catalog.get(engine)?;
    Some(format!("{}{}", engine.url, encode_query(query)))
}
