//! Fetches the three sheets concurrently and maps their rows into records.

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::coerce::{optional_text, parse_code, parse_currency, parse_date};
use crate::error::{AppError, Result};
use crate::models::{Account, AccountKind, Branch, Client, Dataset, MaritalStatus};

const SHEET_BASE: &str =
    "https://docs.google.com/spreadsheets/d/1PBN_HQOi5ZpKDd63mouxttFvvCwtmY97Tb5if5_cdBA/gviz/tq?tqx=out:csv&sheet=";

pub fn default_clients_url() -> String {
    format!("{SHEET_BASE}clientes")
}

pub fn default_accounts_url() -> String {
    format!("{SHEET_BASE}contas")
}

pub fn default_branches_url() -> String {
    format!("{SHEET_BASE}agencias")
}

/// Locations of the three sheets. A location is either an `http(s)://` URL
/// or a local file path.
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub clients: String,
    pub accounts: String,
    pub branches: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            clients: default_clients_url(),
            accounts: default_accounts_url(),
            branches: default_branches_url(),
        }
    }
}

/// Retrieves the raw text behind a source location.
pub trait Fetch: Sync {
    fn fetch(&self, location: &str) -> Result<String>;
}

/// HTTP for URLs, the filesystem for everything else.
pub struct SourceFetcher {
    client: reqwest::blocking::Client,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for SourceFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for SourceFetcher {
    fn fetch(&self, location: &str) -> Result<String> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let body = self
                .client
                .get(location)
                .send()?
                .error_for_status()?
                .text()?;
            Ok(body)
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            Ok(std::fs::read_to_string(path)?)
        }
    }
}

// ---------------------------------------------------------------------------
// Sheet rows as they appear in the CSV export
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ClientRow {
    id: String,
    #[serde(rename = "cpfCnpj")]
    cpf_cnpj: String,
    #[serde(default)]
    rg: Option<String>,
    #[serde(rename = "dataNascimento")]
    data_nascimento: String,
    nome: String,
    #[serde(rename = "nomeSocial", default)]
    nome_social: Option<String>,
    email: String,
    endereco: String,
    #[serde(rename = "rendaAnual")]
    renda_anual: String,
    patrimonio: String,
    #[serde(rename = "estadoCivil")]
    estado_civil: String,
    #[serde(rename = "codigoAgencia")]
    codigo_agencia: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            tax_id: row.cpf_cnpj,
            national_id: optional_text(row.rg),
            birth_date: parse_date(&row.data_nascimento),
            name: row.nome,
            social_name: optional_text(row.nome_social),
            email: row.email,
            address: row.endereco,
            annual_income: parse_currency(&row.renda_anual),
            net_worth: parse_currency(&row.patrimonio),
            marital_status: MaritalStatus::parse(&row.estado_civil),
            branch_code: parse_code(&row.codigo_agencia),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    id: String,
    #[serde(rename = "cpfCnpjCliente")]
    cpf_cnpj_cliente: String,
    tipo: String,
    saldo: String,
    #[serde(rename = "limiteCredito")]
    limite_credito: String,
    #[serde(rename = "creditoDisponivel")]
    credito_disponivel: String,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            client_tax_id: row.cpf_cnpj_cliente,
            kind: AccountKind::parse(&row.tipo),
            balance: parse_currency(&row.saldo),
            credit_limit: parse_currency(&row.limite_credito),
            available_credit: parse_currency(&row.credito_disponivel),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BranchRow {
    id: String,
    codigo: String,
    nome: String,
    endereco: String,
}

impl From<BranchRow> for Branch {
    fn from(row: BranchRow) -> Self {
        Branch {
            id: row.id,
            code: parse_code(&row.codigo),
            name: row.nome,
            address: row.endereco,
        }
    }
}

fn parse_sheet<R, T>(text: &str) -> Result<Vec<T>>
where
    R: for<'de> Deserialize<'de>,
    T: From<R>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut out = Vec::new();
    for result in rdr.deserialize::<R>() {
        out.push(T::from(result?));
    }
    Ok(out)
}

pub fn parse_clients(text: &str) -> Result<Vec<Client>> {
    parse_sheet::<ClientRow, Client>(text)
}

pub fn parse_accounts(text: &str) -> Result<Vec<Account>> {
    parse_sheet::<AccountRow, Account>(text)
}

pub fn parse_branches(text: &str) -> Result<Vec<Branch>> {
    parse_sheet::<BranchRow, Branch>(text)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Fetch all three sheets concurrently and parse them. The first failure in
/// any of them fails the whole load.
pub fn try_load(sources: &Sources, fetcher: &dyn Fetch) -> Result<Dataset> {
    info!("loading sheets");
    let (clients, accounts, branches) = std::thread::scope(|s| {
        let clients = s.spawn(|| fetcher.fetch(&sources.clients));
        let accounts = s.spawn(|| fetcher.fetch(&sources.accounts));
        let branches = s.spawn(|| fetcher.fetch(&sources.branches));
        (clients.join(), accounts.join(), branches.join())
    });
    let worker_panicked = |_| AppError::Other("fetch worker panicked".into());
    let clients = clients.map_err(worker_panicked)??;
    let accounts = accounts.map_err(worker_panicked)??;
    let branches = branches.map_err(worker_panicked)??;
    debug!(
        clients_bytes = clients.len(),
        accounts_bytes = accounts.len(),
        branches_bytes = branches.len(),
        "sheets fetched"
    );

    let data = Dataset {
        clients: parse_clients(&clients)?,
        accounts: parse_accounts(&accounts)?,
        branches: parse_branches(&branches)?,
    };
    info!(
        clients = data.clients.len(),
        accounts = data.accounts.len(),
        branches = data.branches.len(),
        "sheets loaded"
    );
    Ok(data)
}

/// Result of a load that never fails: on error the dataset is empty and
/// `error` carries the cause for the caller to show.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub dataset: Dataset,
    pub error: Option<String>,
}

impl LoadOutcome {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

pub fn load(sources: &Sources, fetcher: &dyn Fetch) -> LoadOutcome {
    match try_load(sources, fetcher) {
        Ok(dataset) => LoadOutcome {
            dataset,
            error: None,
        },
        Err(e) => {
            warn!("failed to fetch or parse sheets: {e}");
            LoadOutcome {
                dataset: Dataset::default(),
                error: Some(e.to_string()),
            }
        }
    }
}
