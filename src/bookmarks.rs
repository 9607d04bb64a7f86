//! 书签面板
//!
//! 持有书签列表、搜索引擎目录与分类筛选，所有修改都在请求成功之后才应用到本地。
//! 失败时只设置面板上的错误文本，同时把错误返回给调用方（用于会话过期处理）。

use crate::api::HomepageApi;
use crate::error::{ErrorKind, HomeError, HomeResult};
use crate::request::HttpClient;
use crate::watch::Observable;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Display;
use std::rc::Rc;
use tabhome_shared::{Bookmark, NewBookmark, SearchEngineCatalog};

pub const FETCH_FAILED: &str = "Failed to fetch bookmarks";
pub const ADD_FAILED: &str = "Failed to add bookmark";
pub const DELETE_FAILED: &str = "Failed to delete bookmark";

// =========================================================
// 分类筛选 (Category Filter)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub const ALL_KEY: &'static str = "all";

    pub fn from_key(key: &str) -> Self {
        if key == Self::ALL_KEY {
            Self::All
        } else {
            Self::Named(key.to_string())
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => Self::ALL_KEY,
            Self::Named(name) => name,
        }
    }

    pub fn matches(&self, bookmark: &Bookmark) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => bookmark.category == *name,
        }
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =========================================================
// 面板状态 (Board State)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub bookmarks: Vec<Bookmark>,
    pub engines: SearchEngineCatalog,
    pub selected: CategoryFilter,
    /// 首次加载书签完成前为 true
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            bookmarks: Vec::new(),
            engines: SearchEngineCatalog::new(),
            selected: CategoryFilter::All,
            loading: true,
            error: None,
        }
    }
}

impl BoardState {
    /// `all` 加上按首次出现顺序排列的所有分类
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut seen = HashSet::new();
        let mut out = vec![CategoryFilter::All];
        for bookmark in &self.bookmarks {
            if seen.insert(bookmark.category.as_str()) {
                out.push(CategoryFilter::Named(bookmark.category.clone()));
            }
        }
        out
    }

    /// 当前筛选下可见的书签，保持原有相对顺序
    pub fn visible(&self) -> Vec<Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| self.selected.matches(b))
            .cloned()
            .collect()
    }
}

// =========================================================
// 进行中的请求 (In-flight Tracking)
// =========================================================

#[derive(Debug, Default)]
struct InFlight {
    adding: bool,
    deleting: HashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Pending {
    Add,
    Delete(String),
}

/// 请求结束（包括 future 被丢弃）时自动释放占用
struct PendingGuard {
    in_flight: Rc<RefCell<InFlight>>,
    pending: Pending,
}

impl PendingGuard {
    fn acquire(in_flight: &Rc<RefCell<InFlight>>, pending: Pending) -> Option<Self> {
        let acquired = {
            let mut state = in_flight.borrow_mut();
            match &pending {
                Pending::Add => !std::mem::replace(&mut state.adding, true),
                Pending::Delete(id) => state.deleting.insert(id.clone()),
            }
        };
        acquired.then(|| Self {
            in_flight: in_flight.clone(),
            pending,
        })
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut state = self.in_flight.borrow_mut();
        match &self.pending {
            Pending::Add => state.adding = false,
            Pending::Delete(id) => {
                state.deleting.remove(id);
            }
        }
    }
}

// =========================================================
// 书签面板 (Bookmark Board)
// =========================================================

pub struct BookmarkBoard<C> {
    api: HomepageApi<C>,
    state: Observable<BoardState>,
    in_flight: Rc<RefCell<InFlight>>,
}

impl<C: Clone> Clone for BookmarkBoard<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<C: HttpClient + Clone + 'static> BookmarkBoard<C> {
    pub fn new(api: HomepageApi<C>) -> Self {
        Self {
            api,
            state: Observable::new(BoardState::default()),
            in_flight: Rc::new(RefCell::new(InFlight::default())),
        }
    }

    pub fn state(&self) -> BoardState {
        self.state.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&BoardState) + 'static) {
        self.state.subscribe(listener);
    }

    pub fn categories(&self) -> Vec<CategoryFilter> {
        self.state.with(BoardState::categories)
    }

    pub fn visible(&self) -> Vec<Bookmark> {
        self.state.with(BoardState::visible)
    }

    pub fn select_category(&self, filter: CategoryFilter) {
        self.state.update(|s| s.selected = filter);
    }

    pub fn dismiss_error(&self) {
        self.state.update(|s| s.error = None);
    }

    /// 只在当前错误仍是 `message` 时清除，返回是否清除
    ///
    /// 延迟关闭提示时使用，避免清掉之后出现的新错误。
    pub fn dismiss_error_if(&self, message: &str) -> bool {
        if self.state.with(|s| s.error.as_deref() != Some(message)) {
            return false;
        }
        self.state.update(|s| s.error = None);
        true
    }

    /// 挂载时加载书签与搜索引擎目录
    ///
    /// 搜索引擎失败只记日志，返回的是书签请求的结果。
    pub async fn load(&self) -> HomeResult<()> {
        let (bookmarks, _) = futures::join!(self.fetch_bookmarks(), self.fetch_search_engines());
        bookmarks
    }

    pub async fn fetch_bookmarks(&self) -> HomeResult<()> {
        let result = self.api.list_bookmarks().await;
        match result {
            Ok(list) => {
                log::debug!("[bookmarks] loaded {} bookmarks", list.len());
                self.state.update(|s| {
                    s.bookmarks = list;
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                log::error!("[bookmarks] fetch failed: {}", e);
                self.state.update(|s| {
                    s.error = Some(FETCH_FAILED.to_string());
                    s.loading = false;
                });
                Err(e.in_op("bookmarks.fetch"))
            }
        }
    }

    pub async fn fetch_search_engines(&self) {
        match self.api.search_engines().await {
            Ok(engines) => self.state.update(|s| s.engines = engines),
            Err(e) => log::error!("[bookmarks] failed to fetch search engines: {}", e),
        }
    }

    /// 添加书签；成功后把服务端返回的记录追加到列表末尾
    pub async fn add_bookmark(&self, bookmark: NewBookmark) -> HomeResult<Bookmark> {
        let Some(_guard) = PendingGuard::acquire(&self.in_flight, Pending::Add) else {
            return Err(HomeError::busy("bookmarks.add"));
        };

        match self.api.create_bookmark(&bookmark).await {
            Ok(created) => {
                log::info!("[bookmarks] added {} ({})", created.title, created.id);
                self.state.update(|s| s.bookmarks.push(created.clone()));
                Ok(created)
            }
            Err(e) => {
                log::error!("[bookmarks] add failed: {}", e);
                self.state.update(|s| s.error = Some(ADD_FAILED.to_string()));
                Err(e.in_op("bookmarks.add"))
            }
        }
    }

    /// 删除书签：请求成功之后才从本地列表移除
    pub async fn delete_bookmark(&self, id: &str) -> HomeResult<()> {
        let Some(_guard) = PendingGuard::acquire(&self.in_flight, Pending::Delete(id.to_string()))
        else {
            log::debug!("[bookmarks] delete {} already in flight", id);
            return Err(HomeError::busy("bookmarks.delete"));
        };

        match self.api.delete_bookmark(id).await {
            Ok(_) => {
                log::info!("[bookmarks] deleted {}", id);
                self.state.update(|s| s.bookmarks.retain(|b| b.id != id));
                Ok(())
            }
            Err(e) => {
                log::error!("[bookmarks] delete {} failed: {}", id, e);
                self.state.update(|s| s.error = Some(DELETE_FAILED.to_string()));
                Err(e.in_op_with("bookmarks.delete", id))
            }
        }
    }
}

// =========================================================
// 添加书签表单 (Add Bookmark Form)
// =========================================================

/// 缺少 scheme 时补上 `https://`
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddBookmarkForm {
    draft: NewBookmark,
    submitting: bool,
    error: Option<String>,
}

impl AddBookmarkForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &NewBookmark {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.draft.title = value.into();
        self.error = None;
    }

    pub fn set_url(&mut self, value: impl Into<String>) {
        self.draft.url = value.into();
        self.error = None;
    }

    pub fn set_icon(&mut self, value: impl Into<String>) {
        self.draft.icon = value.into();
        self.error = None;
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.draft.category = value.into();
        self.error = None;
    }

    pub fn validate(&self) -> HomeResult<()> {
        if self.draft.title.trim().is_empty() {
            return Err(HomeError::validation("Title is required"));
        }
        if self.draft.url.trim().is_empty() {
            return Err(HomeError::validation("URL is required"));
        }
        Ok(())
    }

    /// 标记为提交中并返回要在后台提交的副本；已在提交中时返回 None
    pub fn begin_submit(&mut self) -> Option<Self> {
        if self.submitting {
            return None;
        }
        let pending = self.clone();
        self.submitting = true;
        self.error = None;
        Some(pending)
    }

    /// 提交草稿
    ///
    /// 请求体使用输入时的 URL；规范化后的 URL 只写回草稿。
    pub async fn submit<C>(&mut self, board: &BookmarkBoard<C>) -> HomeResult<Bookmark>
    where
        C: HttpClient + Clone + 'static,
    {
        self.error = None;
        if let Err(e) = self.validate() {
            self.error = Some(e.message().to_string());
            return Err(e);
        }

        let payload = self.draft.clone();
        self.draft.url = normalize_url(&self.draft.url);

        self.submitting = true;
        let result = board.add_bookmark(payload).await;
        self.submitting = false;

        if let Err(e) = &result {
            self.error = Some(match e.kind() {
                ErrorKind::Busy => e.message().to_string(),
                _ => ADD_FAILED.to_string(),
            });
        }
        result
    }
}

#[cfg(test)]
mod tests;
