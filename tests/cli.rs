use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CLIENTS_CSV: &str = "\
id,cpfCnpj,rg,dataNascimento,nome,nomeSocial,email,endereco,rendaAnual,patrimonio,estadoCivil,codigoAgencia
1,12345678901,MG-12.345,1990-05-17,Ana Souza,,ana@example.com,Rua A 1,\"R$ 1.234,56\",\"R$ 10.000,00\",Solteiro,10
2,12345678901234,,17/05/1985,Empresa Beta,Beta,beta@example.com,Av B 2,abc,\"R$ 0,00\",Casado,20
3,12345,,sem data,Carlos Lima,,carlos@example.com,Rua C 3,\"R$ 50,00\",,Viúvo,
";

const ACCOUNTS_CSV: &str = "\
id,cpfCnpjCliente,tipo,saldo,limiteCredito,creditoDisponivel
a1,12345678901,corrente,\"R$ 1.000,00\",\"R$ 500,00\",\"R$ 250,00\"
a2,12345678901,poupanca,\"R$ 2.500,75\",\"R$ 0,00\",\"R$ 0,00\"
";

const BRANCHES_CSV: &str = "\
id,codigo,nome,endereco
b1,10,Agência Centro,Praça Central 100
";

struct Fixture {
    home: TempDir,
    data: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            home: tempfile::tempdir().unwrap(),
            data: tempfile::tempdir().unwrap(),
        };
        std::fs::write(fixture.path("clientes.csv"), CLIENTS_CSV).unwrap();
        std::fs::write(fixture.path("contas.csv"), ACCOUNTS_CSV).unwrap();
        std::fs::write(fixture.path("agencias.csv"), BRANCHES_CSV).unwrap();
        fixture
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.data.path().join(name)
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("clientes").unwrap();
        cmd.env("HOME", self.home.path());
        cmd
    }

    fn cmd_with_sources(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--clients")
            .arg(self.path("clientes.csv"))
            .arg("--accounts")
            .arg(self.path("contas.csv"))
            .arg("--branches")
            .arg(self.path("agencias.csv"));
        cmd
    }
}

#[test]
fn test_list_formats_tax_ids() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("123.456.789-01"))
        .stdout(predicate::str::contains("12.345.678/9012-34"))
        .stdout(predicate::str::contains("12345"))
        .stdout(predicate::str::contains("Página 1 de 1 (3 clientes)"));
}

#[test]
fn test_list_filters_combine() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["list", "--name", "ANA", "--tax-id", "901"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Souza"))
        .stdout(predicate::str::contains("Empresa Beta").not());
}

#[test]
fn test_list_without_matches_prints_none_found() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["list", "--name", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhum cliente encontrado."));
}

#[test]
fn test_list_clamps_page() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["list", "--page", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Página 1 de 1"));
}

#[test]
fn test_show_client_with_accounts_and_branch() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Conta a1"))
        .stdout(predicate::str::contains("Conta a2"))
        .stdout(predicate::str::contains("Agência Centro"))
        .stdout(predicate::str::contains("R$ 1.234,56"))
        .stdout(predicate::str::contains("17/05/1990"));
}

#[test]
fn test_show_client_without_accounts() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["show", "12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Este cliente não possui contas bancárias."))
        .stdout(predicate::str::contains("Agência não encontrada."))
        .stdout(predicate::str::contains("Indisponível"));
}

#[test]
fn test_show_unknown_client_fails() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["show", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client not found: 999"));
}

#[test]
fn test_missing_source_fails_the_load() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("--clients")
        .arg(fx.path("clientes.csv"))
        .arg("--accounts")
        .arg(fx.path("nope.csv"))
        .arg("--branches")
        .arg(fx.path("agencias.csv"))
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load clients"));
}

#[test]
fn test_status_counts_records() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clientes:   3"))
        .stdout(predicate::str::contains("Contas:     2"))
        .stdout(predicate::str::contains("Agências:   1"));
}

#[test]
fn test_status_fails_when_a_source_is_missing() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("--clients")
        .arg(fx.path("clientes.csv"))
        .arg("--accounts")
        .arg(fx.path("nope.csv"))
        .arg("--branches")
        .arg(fx.path("agencias.csv"))
        .arg("status")
        .assert()
        .failure()
        .stdout(predicate::str::contains("nope.csv"))
        .stderr(predicate::str::contains("Error: Failed to load clients"))
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_show_blank_money_cell_reads_as_zero() {
    let fx = Fixture::new();
    // Carlos has an empty patrimonio cell.
    fx.cmd_with_sources()
        .args(["show", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("R$ 0,00"));
}

#[test]
fn test_sources_set_persists_locations() {
    let fx = Fixture::new();
    fx.cmd_with_sources()
        .args(["sources", "set"])
        .assert()
        .success();
    let settings = fx.home.path().join(".config/clientes/settings.json");
    assert!(Path::new(&settings).exists());

    // Later runs pick the stored locations up without flags.
    fx.cmd()
        .args(["show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nome Social"));
}

#[test]
fn test_sources_set_requires_a_location() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["sources", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to set"));
}
