//! 偏好设置编辑器

use crate::error::HomeError;
use crate::request::HttpClient;
use crate::session::SessionStore;
use crate::storage::TokenStore;
use tabhome_shared::{ClockFormat, Language, Preferences, SearchEngineKey, Theme, User};

pub const SAVE_FAILED: &str = "Failed to update preferences";

#[derive(Debug, Clone)]
pub enum SaveOutcome {
    /// 调用方随后关闭编辑器
    Saved,
    /// 编辑器保持打开并显示 `message`，允许重试
    Failed { message: String, error: HomeError },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SaveOutcome::Saved => None,
            SaveOutcome::Failed { message, .. } => Some(message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceEditor {
    draft: Preferences,
    saving: bool,
    error: Option<String>,
}

impl PreferenceEditor {
    /// 用用户已保存的偏好初始化草稿，没有用户时使用默认值
    pub fn new(user: Option<&User>) -> Self {
        Self {
            draft: user.map(|u| u.preferences).unwrap_or_default(),
            saving: false,
            error: None,
        }
    }

    pub fn draft(&self) -> Preferences {
        self.draft
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.draft.theme = theme;
        self.error = None;
    }

    pub fn set_search_engine(&mut self, engine: SearchEngineKey) {
        self.draft.default_search_engine = engine;
        self.error = None;
    }

    pub fn set_clock_format(&mut self, format: ClockFormat) {
        self.draft.clock_format = format;
        self.error = None;
    }

    pub fn set_language(&mut self, language: Language) {
        self.draft.language = language;
        self.error = None;
    }

    /// 标记为保存中并返回要在后台保存的副本；已在保存中时返回 None
    ///
    /// 副本保存完成后写回，覆盖这里的标记。
    pub fn begin_save(&mut self) -> Option<Self> {
        if self.saving {
            return None;
        }
        let pending = self.clone();
        self.saving = true;
        self.error = None;
        Some(pending)
    }

    /// 一次 PUT 提交完整草稿
    pub async fn save<C, S>(&mut self, session: &SessionStore<C, S>) -> SaveOutcome
    where
        C: HttpClient + Clone + 'static,
        S: TokenStore + 'static,
    {
        self.saving = true;
        self.error = None;
        let result = session.api().update_preferences(&self.draft).await;
        self.saving = false;

        match result {
            Ok(_) => {
                log::info!("[preferences] saved {:?}", self.draft);
                session.apply_preferences(self.draft);
                SaveOutcome::Saved
            }
            Err(e) => {
                log::error!("[preferences] failed to update preferences: {}", e);
                self.error = Some(SAVE_FAILED.to_string());
                SaveOutcome::Failed {
                    message: SAVE_FAILED.to_string(),
                    error: e.in_op("preferences.save"),
                }
            }
        }
    }
}
