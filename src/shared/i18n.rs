//! Static key -> string table for the two console languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    pub fn is_zh(&self) -> bool {
        matches!(self, Language::Zh)
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Zh
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

const ZH: &[(&str, &str)] = &[
    ("app_name", "DevPilot 开发者控制台"),
    ("role_admin", "管理员"),
    ("role_engineer", "工程师"),
    ("role_label", "当前角色"),
    ("status_active", "进行中"),
    ("status_queued", "排队中"),
    ("status_ended", "已结束"),
    ("no_sessions", "未找到相关会话"),
    ("nav_chat", "在线会话"),
    ("nav_my_tickets", "我的工单"),
    ("nav_all_tickets", "工单列表"),
    ("no_tickets", "没有找到工单"),
    ("ticket_not_found", "工单不存在"),
    ("call_panel_title", "外呼中心"),
    ("btn_call", "呼叫"),
    ("btn_hangup", "挂断"),
    ("calling_status", "正在呼叫..."),
    ("call_associated_with", "关联至"),
    ("call_post_process", "后补关联"),
    ("call_post_desc", "本次通话未关联客户，请选择："),
    ("btn_skip", "跳过"),
    ("btn_link", "关联"),
    ("toast_audio_verifying", "正在检测音频设备..."),
    ("toast_audio_success", "音频系统已就绪"),
    ("toast_audio_failed", "无法播放音频，请检查权限"),
    ("toast_audio_guide", "请点击麦克风图标以激活音频"),
    ("end_card_title", "工程师请求结束会话"),
    ("end_card_desc", "您的问题是否已得到解决？"),
    ("btn_solved", "确认解决"),
    ("btn_unsolved", "还未解决"),
    ("auto_confirm_hint", "无操作，系统将于 {seconds}s 后自动确认解决"),
    ("end_status_solved", "用户已确认解决，会话结束。"),
    ("end_status_unsolved", "用户反馈问题未解决，请继续服务。"),
    ("end_status_auto", "系统自动确认解决，会话结束。"),
    ("ticket_status_all", "全部状态"),
    ("ticket_status_open", "待处理"),
    ("ticket_status_in_progress", "处理中"),
    ("ticket_status_resolved", "已解决"),
    ("ticket_status_closed", "已关闭"),
    ("priority_all", "全部优先级"),
    ("priority_low", "低"),
    ("priority_medium", "中"),
    ("priority_high", "高"),
    ("priority_critical", "紧急"),
    ("unassigned", "未分配"),
];

const EN: &[(&str, &str)] = &[
    ("app_name", "DevPilot Console"),
    ("role_admin", "Admin"),
    ("role_engineer", "Engineer"),
    ("role_label", "Role"),
    ("status_active", "Active"),
    ("status_queued", "Queued"),
    ("status_ended", "Ended"),
    ("no_sessions", "No sessions found"),
    ("nav_chat", "Live Chat"),
    ("nav_my_tickets", "My Tickets"),
    ("nav_all_tickets", "All Tickets"),
    ("no_tickets", "No tickets found"),
    ("ticket_not_found", "Ticket not found"),
    ("call_panel_title", "Dialer"),
    ("btn_call", "Call"),
    ("btn_hangup", "Hangup"),
    ("calling_status", "Calling..."),
    ("call_associated_with", "Linked to"),
    ("call_post_process", "Post-Call Association"),
    ("call_post_desc", "Call was unlinked. Select customer:"),
    ("btn_skip", "Skip"),
    ("btn_link", "Link"),
    ("toast_audio_verifying", "Verifying audio system..."),
    ("toast_audio_success", "Audio system ready"),
    ("toast_audio_failed", "Playback failed. Check permissions."),
    ("toast_audio_guide", "Please click the microphone to enable audio."),
    ("end_card_title", "Request to End Session"),
    ("end_card_desc", "Has your issue been resolved?"),
    ("btn_solved", "Solved"),
    ("btn_unsolved", "Not Solved"),
    ("auto_confirm_hint", "Auto-confirm in {seconds}s"),
    ("end_status_solved", "User confirmed solved. Session ended."),
    ("end_status_unsolved", "User marked as not solved. Please continue."),
    ("end_status_auto", "System auto-confirmed. Session ended."),
    ("ticket_status_all", "All Status"),
    ("ticket_status_open", "Open"),
    ("ticket_status_in_progress", "In Progress"),
    ("ticket_status_resolved", "Resolved"),
    ("ticket_status_closed", "Closed"),
    ("priority_all", "All Priorities"),
    ("priority_low", "Low"),
    ("priority_medium", "Medium"),
    ("priority_high", "High"),
    ("priority_critical", "Critical"),
    ("unassigned", "Unassigned"),
];

/// Look up `key`; unknown keys come back unchanged.
pub fn translate(language: Language, key: &str) -> &str {
    let table = match language {
        Language::Zh => ZH,
        Language::En => EN,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(key)
}

/// Substitute `{name}` placeholders
pub fn translate_with(language: Language, key: &str, args: &[(&str, String)]) -> String {
    args.iter()
        .fold(translate(language, key).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
}
