//! UI strings in the two supported languages.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Lang {
    #[default]
    Zh,
    En,
}

impl Lang {
    pub fn toggled(self) -> Self {
        match self {
            Lang::Zh => Lang::En,
            Lang::En => Lang::Zh,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::Zh => &ZH,
            Lang::En => &EN,
        }
    }
}

pub struct Strings {
    pub title: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
    pub saved: &'static str,
    pub auto_save_failed: &'static str,
    pub reloaded: &'static str,
    pub providers: &'static str,
    pub no_providers: &'static str,
    pub confirm_delete: &'static str,
    pub provider_key: &'static str,
    pub provider_name: &'static str,
    pub adapter: &'static str,
    pub base_url: &'static str,
    pub api_key: &'static str,
    pub env_set: &'static str,
    pub env_unset: &'static str,
    pub env_saved: &'static str,
    pub env_failed: &'static str,
    pub models: &'static str,
    pub no_models: &'static str,
    pub model_key: &'static str,
    pub key_exists: &'static str,
    pub edit_rejected: &'static str,
    pub sidebar_hints: &'static str,
    pub form_hints: &'static str,
    pub edit_hints: &'static str,
    pub language: &'static str,
}

static ZH: Strings = Strings {
    title: "Opencode 管理器",
    loading: "加载中...",
    error: "错误",
    saved: "已保存",
    auto_save_failed: "自动保存失败",
    reloaded: "已重新加载",
    providers: "供应商",
    no_providers: "暂无供应商，按 a 添加",
    confirm_delete: "确定要删除该供应商吗？(y/n)",
    provider_key: "供应商标识",
    provider_name: "供应商名称",
    adapter: "适配器 (npm)",
    base_url: "基础 URL (Base URL)",
    api_key: "API 密钥",
    env_set: "已设置",
    env_unset: "未设置",
    env_saved: "环境变量已写入",
    env_failed: "写入环境变量失败",
    models: "模型列表",
    no_models: "暂无模型，按 a 添加",
    model_key: "模型标识 (完整名)",
    key_exists: "该标识已存在",
    edit_rejected: "修改未生效",
    sidebar_hints: " ↑↓: 选择 │ Tab/Enter: 编辑 │ a: 添加 │ d: 删除 │ l: English │ Ctrl+S: 保存 │ Ctrl+R: 重新加载 │ q: 退出",
    form_hints: " ↑↓: 移动 │ Enter: 编辑 │ e: 模型名称 │ a: 添加模型 │ d: 删除 │ Tab: 返回列表 │ Ctrl+S: 保存",
    edit_hints: " Enter: 确认 │ Esc: 取消",
    language: "中文",
};

static EN: Strings = Strings {
    title: "Opencode Manager",
    loading: "Loading...",
    error: "Error",
    saved: "Saved",
    auto_save_failed: "Auto-save failed",
    reloaded: "Reloaded",
    providers: "Providers",
    no_providers: "No providers yet, press a to add one",
    confirm_delete: "Are you sure you want to delete this provider? (y/n)",
    provider_key: "Provider Key",
    provider_name: "Provider Name",
    adapter: "Adapter (npm)",
    base_url: "Base URL",
    api_key: "API Key",
    env_set: "set",
    env_unset: "not set",
    env_saved: "Environment variable written",
    env_failed: "Failed to write environment variable",
    models: "Models",
    no_models: "No models yet, press a to add one",
    model_key: "Model Key (Full Name)",
    key_exists: "This key already exists",
    edit_rejected: "Edit rejected",
    sidebar_hints: " ↑↓: Select │ Tab/Enter: Edit │ a: Add │ d: Delete │ l: 中文 │ Ctrl+S: Save │ Ctrl+R: Reload │ q: Quit",
    form_hints: " ↑↓: Move │ Enter: Edit │ e: Model name │ a: Add model │ d: Delete │ Tab: Back │ Ctrl+S: Save",
    edit_hints: " Enter: Confirm │ Esc: Cancel",
    language: "English",
};
