use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum MaritalStatus {
    Single,
    Married,
    Widowed,
    Divorced,
    Other(String),
}

impl MaritalStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Solteiro" => Self::Single,
            "Casado" => Self::Married,
            "Viúvo" => Self::Widowed,
            "Divorciado" => Self::Divorced,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Single => "Solteiro",
            Self::Married => "Casado",
            Self::Widowed => "Viúvo",
            Self::Divorced => "Divorciado",
            Self::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccountKind {
    Checking,
    Savings,
    Other(String),
}

impl AccountKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "corrente" => Self::Checking,
            "poupanca" => Self::Savings,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Checking => "Conta corrente",
            Self::Savings => "Poupança",
            Self::Other(s) => s,
        }
    }
}

/// A bank customer. `None` in a coerced field means the sheet value could not
/// be converted and is displayed as unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: String,
    pub tax_id: String,
    pub national_id: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub name: String,
    pub social_name: Option<String>,
    pub email: String,
    pub address: String,
    pub annual_income: Option<f64>,
    pub net_worth: Option<f64>,
    pub marital_status: MaritalStatus,
    pub branch_code: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub client_tax_id: String,
    pub kind: AccountKind,
    pub balance: Option<f64>,
    pub credit_limit: Option<f64>,
    pub available_credit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: String,
    pub code: Option<i64>,
    pub name: String,
    pub address: String,
}

/// The three record sets loaded once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub clients: Vec<Client>,
    pub accounts: Vec<Account>,
    pub branches: Vec<Branch>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty() && self.accounts.is_empty() && self.branches.is_empty()
    }
}
