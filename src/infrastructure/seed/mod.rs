//! Demo data for the console, regenerated on every language switch.

use crate::domain::entities::{
    ConsultationForm, Customer, CustomerExtendedInfo, Message, MessageKind, Priority, Session,
    SessionStatus, Ticket, TicketStatus, User, UserRole,
};
use crate::shared::i18n::Language;
use chrono::{DateTime, Duration, Utc};

pub const CURRENT_USER_ID: &str = "eng-001";

#[derive(Debug, Clone)]
pub struct Dataset {
    pub current_user: User,
    pub staff: Vec<User>,
    pub customers: Vec<Customer>,
    pub sessions: Vec<Session>,
    pub messages: Vec<Message>,
    pub tickets: Vec<Ticket>,
}

fn pick(language: Language, zh: &str, en: &str) -> String {
    let text = if language.is_zh() { zh } else { en };
    text.to_string()
}

fn avatar(id: u32) -> String {
    format!("https://picsum.photos/id/{}/200/200", id)
}

fn staff(language: Language) -> (User, User) {
    let current = User {
        id: CURRENT_USER_ID.to_string(),
        name: pick(language, "陈阿列克斯", "Alex Chen"),
        avatar: avatar(1005),
        role: UserRole::Admin,
    };
    let other = User {
        id: "eng-002".to_string(),
        name: pick(language, "莎拉·史密斯", "Sarah Smith"),
        avatar: avatar(1027),
        role: UserRole::Engineer,
    };
    (current, other)
}

fn customers(language: Language) -> Vec<Customer> {
    let l = language;
    vec![
        Customer {
            id: "cust-001".to_string(),
            name: pick(l, "莎拉·康纳", "Sarah Connor"),
            email: "sarah.c@skynet.com".to_string(),
            avatar: avatar(237),
            tenant_type: pick(l, "企业版", "Enterprise"),
            account_type: pick(l, "付费", "Paid"),
            tier: "VIP".to_string(),
            phone: "+1 555-0199".to_string(),
            company: pick(l, "赛博达因系统", "Cyberdyne Systems"),
            extended: CustomerExtendedInfo {
                certificate_level: Some(pick(l, "大师级", "Master")),
                customer_status: Some(pick(l, "活跃", "Active")),
                partnership_type: Some(pick(l, "金牌合作伙伴", "Gold Partner")),
                region: Some(pick(l, "北美", "NA")),
                service_group: Some(pick(l, "RPA 核心组", "RPA Core")),
                signed_year: Some("2021".to_string()),
            },
        },
        Customer {
            id: "cust-002".to_string(),
            name: pick(l, "李约翰", "John Doe"),
            email: "john.d@acme.inc".to_string(),
            avatar: avatar(1025),
            tenant_type: pick(l, "中小企业", "SME"),
            account_type: pick(l, "试用", "Trial"),
            tier: "L1".to_string(),
            phone: "+1 555-0123".to_string(),
            company: pick(l, "阿克梅公司", "Acme Corp"),
            extended: CustomerExtendedInfo {
                certificate_level: Some(pick(l, "专业级", "Professional")),
                customer_status: Some(pick(l, "新客", "New")),
                partnership_type: Some(pick(l, "直销", "Direct")),
                region: Some(pick(l, "欧洲中东非洲", "EMEA")),
                service_group: Some(pick(l, "云集成", "Cloud Integration")),
                signed_year: Some("2023".to_string()),
            },
        },
    ]
}

fn sessions(language: Language, customers: &[Customer], now: DateTime<Utc>) -> Vec<Session> {
    let l = language;
    vec![
        Session {
            id: "sess-001".to_string(),
            status: SessionStatus::Active,
            customer: customers[0].clone(),
            start_time: now - Duration::minutes(15),
            duration: "00:15:23".to_string(),
            source: pick(l, "IDE 插件", "IDE Plugin"),
            handler_id: CURRENT_USER_ID.to_string(),
            last_message: pick(
                l,
                "选择器在登录页面失效了。",
                "The selector is failing on the login screen.",
            ),
            unread_count: 1,
            consultation_form: ConsultationForm {
                product_module: pick(l, "Web 自动化", "Web Automation"),
                environment: pick(l, "生产环境", "Production"),
                severity: pick(l, "严重", "Critical"),
                description: pick(
                    l,
                    "v2.4 更新后机器人停止工作，找不到选择器。",
                    "Bot stops working after update v2.4. Selectors are not found.",
                ),
                version: "2.4.1".to_string(),
                phone: None,
            },
        },
        Session {
            id: "sess-002".to_string(),
            status: SessionStatus::Queued,
            customer: customers[1].clone(),
            start_time: now - Duration::minutes(2),
            duration: "00:02:00".to_string(),
            source: pick(l, "Web 门户", "Web Portal"),
            handler_id: String::new(),
            last_message: pick(l, "我该如何重置 API 密钥？", "How do I reset my API key?"),
            unread_count: 0,
            consultation_form: ConsultationForm {
                product_module: pick(l, "API 网关", "API Gateway"),
                environment: pick(l, "开发环境", "Dev"),
                severity: pick(l, "轻微", "Minor"),
                description: pick(l, "需要帮助轮换密钥。", "Need help rotating keys."),
                version: "N/A".to_string(),
                phone: None,
            },
        },
        Session {
            id: "sess-003".to_string(),
            status: SessionStatus::Ended,
            customer: customers[1].clone(),
            start_time: now - Duration::hours(24),
            duration: "00:45:00".to_string(),
            source: pick(l, "Web 门户", "Web Portal"),
            handler_id: CURRENT_USER_ID.to_string(),
            last_message: pick(l, "谢谢你的帮助！", "Thank you for your help!"),
            unread_count: 0,
            consultation_form: ConsultationForm {
                product_module: pick(l, "计费", "Billing"),
                environment: pick(l, "生产环境", "Production"),
                severity: pick(l, "主要", "Major"),
                description: pick(l, "发票金额差异。", "Invoice discrepancy."),
                version: "N/A".to_string(),
                phone: None,
            },
        },
    ]
}

fn messages(language: Language, now: DateTime<Utc>) -> Vec<Message> {
    let l = language;
    let lines = [
        (
            "msg-1",
            "cust-001",
            14,
            pick(
                l,
                "你好，更新后我的 Chrome 扩展程序出问题了。",
                "Hi, I am having trouble with the Chrome extension after the latest update.",
            ),
        ),
        (
            "msg-2",
            CURRENT_USER_ID,
            12,
            pick(
                l,
                "你好莎拉，我来帮你处理。请问你看到的具体错误代码是什么？",
                "Hello Sarah, I can certainly help with that. Could you please provide the specific error code you are seeing?",
            ),
        ),
        (
            "msg-3",
            "cust-001",
            10,
            pick(
                l,
                "第 45 行显示 \"SelectorNotFoundException\"。",
                "It says \"SelectorNotFoundException\" on line 45.",
            ),
        ),
        (
            "msg-4",
            CURRENT_USER_ID,
            8,
            pick(
                l,
                "我明白了。请尝试使用 UI Spy 模式重新捕获该元素。",
                "I see. Please try re-capturing the element using UI Spy mode.",
            ),
        ),
    ];

    lines
        .into_iter()
        .map(|(id, sender, minutes_ago, content)| Message {
            id: id.to_string(),
            session_id: "sess-001".to_string(),
            sender_id: sender.to_string(),
            content,
            timestamp: now - Duration::minutes(minutes_ago),
            kind: MessageKind::Text,
            is_deleted: false,
            reply_to_id: None,
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn ticket(
    id: &str,
    subject: String,
    description: String,
    status: TicketStatus,
    priority: Priority,
    customer: &Customer,
    assignee: Option<&User>,
    cc: Vec<User>,
    collaborators: Vec<User>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: &[&str],
) -> Ticket {
    Ticket {
        id: id.to_string(),
        subject,
        description,
        description_rpa_dsl: None,
        status,
        priority,
        customer: customer.clone(),
        assignee: assignee.cloned(),
        cc,
        collaborators,
        created_at,
        updated_at,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        timeline: Vec::new(),
    }
}

fn tickets(
    language: Language,
    customers: &[Customer],
    current: &User,
    other: &User,
    now: DateTime<Utc>,
) -> Vec<Ticket> {
    let l = language;
    vec![
        ticket(
            "TIC-1024",
            pick(l, "生产环境数据库连接超时", "Production DB Connection Timeout"),
            pick(
                l,
                "每晚2点备份期间出现间歇性连接超时。",
                "Intermittent connection timeouts occurring during nightly backup at 2 AM.",
            ),
            TicketStatus::Open,
            Priority::High,
            &customers[0],
            Some(current),
            vec![],
            vec![other.clone()],
            now - Duration::days(2),
            now - Duration::hours(5),
            &["Database", "Production"],
        ),
        ticket(
            "TIC-1025",
            pick(l, "功能请求：暗黑模式", "Feature Request: Dark Mode"),
            pick(
                l,
                "许多用户在社区论坛请求此功能。",
                "Many users are requesting this in the community forum.",
            ),
            TicketStatus::InProgress,
            Priority::Low,
            &customers[1],
            Some(current),
            vec![],
            vec![],
            now - Duration::days(5),
            now - Duration::days(1),
            &["UI/UX", "Feature"],
        ),
        ticket(
            "TIC-1026",
            pick(
                l,
                "导出 PDF 中文字符乱码",
                "Chinese characters corrupted in PDF export",
            ),
            pick(
                l,
                "使用旧版字体渲染引擎时出现此问题。",
                "Issue occurs when using legacy font rendering engine.",
            ),
            TicketStatus::Resolved,
            Priority::Medium,
            &customers[0],
            None,
            vec![],
            vec![],
            now - Duration::days(10),
            now - Duration::days(3),
            &["Bug", "PDF"],
        ),
        // CC'd but not assigned
        ticket(
            "TIC-1027",
            pick(l, "[CC] 支付网关 502 错误", "[CC] Payment Gateway 502 Error"),
            pick(
                l,
                "客户报告在结账时偶尔出现 502 Bad Gateway 错误。",
                "Customer reporting occasional 502 Bad Gateway errors during checkout.",
            ),
            TicketStatus::Open,
            Priority::Critical,
            &customers[1],
            Some(other),
            vec![current.clone()],
            vec![],
            now - Duration::hours(4),
            now - Duration::hours(1),
            &["Payment", "API"],
        ),
        // Unrelated to the current user
        ticket(
            "TIC-1028",
            pick(l, "移动端登录界面偏移", "Mobile Login UI Misaligned"),
            pick(
                l,
                "iPhone 13 Mini 上登录按钮超出屏幕边缘。",
                "Login button pushed off screen on iPhone 13 Mini.",
            ),
            TicketStatus::Open,
            Priority::Medium,
            &customers[1],
            Some(other),
            vec![],
            vec![],
            now - Duration::hours(48),
            now - Duration::hours(24),
            &["Mobile", "UI"],
        ),
    ]
}

pub fn mock_dataset(language: Language, now: DateTime<Utc>) -> Dataset {
    let (current_user, other) = staff(language);
    let customers = customers(language);
    let sessions = sessions(language, &customers, now);
    let messages = messages(language, now);
    let tickets = tickets(language, &customers, &current_user, &other, now);

    Dataset {
        staff: vec![current_user.clone(), other],
        current_user,
        customers,
        sessions,
        messages,
        tickets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_ids_stable_across_languages() {
        let now = Utc::now();
        let zh = mock_dataset(Language::Zh, now);
        let en = mock_dataset(Language::En, now);
        let zh_ids: Vec<_> = zh.tickets.iter().map(|t| t.id.clone()).collect();
        let en_ids: Vec<_> = en.tickets.iter().map(|t| t.id.clone()).collect();
        assert_eq!(zh_ids, en_ids);
        assert_ne!(zh.current_user.name, en.current_user.name);
    }

    #[test]
    fn test_messages_reference_existing_sessions() {
        let data = mock_dataset(Language::En, Utc::now());
        for message in &data.messages {
            assert!(data.sessions.iter().any(|s| s.id == message.session_id));
        }
    }
}
