//! Presentation state derived from the loaded records.
//!
//! Everything here is recomputed from (records, filter, page) on each
//! interaction; nothing is cached between calls.

use crate::fmt;
use crate::models::{Account, Branch, Client, Dataset};

pub const PAGE_SIZE: usize = 10;

pub const NO_CLIENTS: &str = "Nenhum cliente encontrado.";
pub const NO_ACCOUNTS: &str = "Este cliente não possui contas bancárias.";
pub const NO_BRANCH: &str = "Agência não encontrada.";

/// Name (case-insensitive) and tax id substring filters, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub name: String,
    pub tax_id: String,
}

impl Filter {
    pub fn matches(&self, client: &Client) -> bool {
        let name_ok = self.name.is_empty()
            || client.name.to_lowercase().contains(&self.name.to_lowercase());
        let tax_ok = self.tax_id.is_empty() || client.tax_id.contains(&self.tax_id);
        name_ok && tax_ok
    }
}

pub fn filter_clients<'a>(clients: &'a [Client], filter: &Filter) -> Vec<&'a Client> {
    clients.iter().filter(|c| filter.matches(c)).collect()
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PAGE_SIZE)
}

/// The 1-based `page` of `items`. Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Filter values plus the current page. Changing a filter always returns to
/// page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    filter: Filter,
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            page: 1,
        }
    }
}

impl ListState {
    pub fn new(filter: Filter) -> Self {
        Self { filter, page: 1 }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_name_filter(&mut self, value: impl Into<String>) {
        self.filter.name = value.into();
        self.page = 1;
    }

    pub fn set_tax_id_filter(&mut self, value: impl Into<String>) {
        self.filter.tax_id = value.into();
        self.page = 1;
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self, pages: usize) -> bool {
        pages > 0 && self.page < pages
    }

    pub fn prev_page(&mut self) {
        if self.can_prev() {
            self.page -= 1;
        }
    }

    pub fn next_page(&mut self, pages: usize) {
        if self.can_next(pages) {
            self.page += 1;
        }
    }

    /// Jump to a numbered page. Returns false when `page` is not in
    /// `1..=pages`.
    pub fn goto_page(&mut self, page: usize, pages: usize) -> bool {
        if page >= 1 && page <= pages {
            self.page = page;
            true
        } else {
            false
        }
    }
}

/// One page of the filtered client list.
#[derive(Debug)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Client>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn derive_page<'a>(clients: &'a [Client], state: &ListState) -> PageView<'a> {
    let filtered = filter_clients(clients, &state.filter);
    let rows = page_slice(&filtered, state.page).to_vec();
    PageView {
        rows,
        page: state.page,
        page_count: page_count(filtered.len()),
        total: filtered.len(),
    }
}

/// Look a client up by id or tax id (raw or digits only).
pub fn find_client<'a>(clients: &'a [Client], key: &str) -> Option<&'a Client> {
    let key = key.trim();
    let digits: String = key.chars().filter(|c| c.is_ascii_digit()).collect();
    clients.iter().find(|c| c.id == key).or_else(|| {
        clients.iter().find(|c| {
            c.tax_id == key
                || (!digits.is_empty()
                    && c.tax_id.chars().filter(|ch| ch.is_ascii_digit()).collect::<String>() == digits)
        })
    })
}

// ---------------------------------------------------------------------------
// List / detail
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    List,
    Detail(Client),
}

impl Screen {
    pub fn select(&mut self, client: &Client) {
        *self = Screen::Detail(client.clone());
    }

    pub fn back(&mut self) {
        *self = Screen::List;
    }
}

pub struct ClientDetail<'a> {
    pub client: &'a Client,
    pub accounts: Vec<&'a Account>,
    pub branch: Option<&'a Branch>,
}

impl<'a> ClientDetail<'a> {
    pub fn build(client: &'a Client, data: &'a Dataset) -> Self {
        let accounts = data
            .accounts
            .iter()
            .filter(|a| a.client_tax_id == client.tax_id)
            .collect();
        let branch = client
            .branch_code
            .and_then(|code| data.branches.iter().find(|b| b.code == Some(code)));
        Self {
            client,
            accounts,
            branch,
        }
    }

    pub fn sections(&self) -> Vec<Section> {
        let c = self.client;
        let mut personal = vec![
            Field::new("ID", c.id.clone()),
            Field::new("Nome", c.name.clone()),
        ];
        if let Some(ref social) = c.social_name {
            personal.push(Field::new("Nome Social", social.clone()));
        }
        personal.push(Field::new("CPF/CNPJ", fmt::tax_id(&c.tax_id)));
        if let Some(ref rg) = c.national_id {
            personal.push(Field::new("RG", rg.clone()));
        }
        personal.push(Field::new("Data de Nascimento", fmt::date(c.birth_date)));
        personal.push(Field::new("Email", c.email.clone()));
        personal.push(Field::new("Estado Civil", c.marital_status.label().to_string()));

        let mut sections = vec![
            Section::new("Informações Pessoais", personal),
            Section::new(
                "Informações Financeiras",
                vec![
                    Field::new("Endereço", c.address.clone()),
                    Field::new("Renda Anual", fmt::money(c.annual_income)),
                    Field::new("Patrimônio", fmt::money(c.net_worth)),
                ],
            ),
        ];

        if self.accounts.is_empty() {
            sections.push(Section::note("Contas Bancárias", NO_ACCOUNTS));
        }
        for a in &self.accounts {
            sections.push(Section::new(
                format!("Conta {}", a.id),
                vec![
                    Field::new("Tipo", a.kind.label().to_string()),
                    Field::new("Saldo", fmt::money(a.balance)),
                    Field::new("Limite de Crédito", fmt::money(a.credit_limit)),
                    Field::new("Crédito Disponível", fmt::money(a.available_credit)),
                ],
            ));
        }

        sections.push(match self.branch {
            Some(b) => Section::new(
                "Agência",
                vec![
                    Field::new("Código", fmt::code(b.code)),
                    Field::new("Nome", b.name.clone()),
                    Field::new("Endereço", b.address.clone()),
                ],
            ),
            None => Section::note("Agência", NO_BRANCH),
        });
        sections
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// A titled block of the detail view. Blocks with nothing to show carry a
/// `note` instead of fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub fields: Vec<Field>,
    pub note: Option<&'static str>,
}

impl Section {
    fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
            note: None,
        }
    }

    fn note(title: impl Into<String>, note: &'static str) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            note: Some(note),
        }
    }
}
