use serde::{Deserialize, Serialize};

/// Customer snapshot owned by the session or ticket that references it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub tenant_type: String,
    pub account_type: String,
    pub tier: String,
    pub phone: String,
    pub company: String,
    /// Admin-only account details
    #[serde(default, flatten)]
    pub extended: CustomerExtendedInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerExtendedInfo {
    pub certificate_level: Option<String>,
    pub customer_status: Option<String>,
    pub partnership_type: Option<String>,
    pub region: Option<String>,
    pub service_group: Option<String>,
    pub signed_year: Option<String>,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            avatar: String::new(),
            tenant_type: String::new(),
            account_type: String::new(),
            tier: String::new(),
            phone: String::new(),
            company: String::new(),
            extended: CustomerExtendedInfo::default(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}
