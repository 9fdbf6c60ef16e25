//! [`ChainClient`] backed by the `secretcli` binary and an LCD endpoint.
//!
//! Signing and the encryption of contract messages are left to `secretcli`;
//! this module only builds its invocations and reads back the JSON it prints.

use std::{
    path::PathBuf,
    process::{Output, Stdio},
};

use anyhow::{anyhow, bail, ensure, Context};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tokio::{io::AsyncWriteExt, process::Command, time::sleep};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use super::{ChainClient, Coin, ExecuteRequest, InstantiateRequest, QueryRequest, StoreCodeRequest};
use crate::{
    config::ChainNetworkConfig,
    types::tx::{Event, TxResponse},
    wallet::Credentials,
};

pub struct SecretNetworkClient {
    config: ChainNetworkConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct CodeHashResponse {
    code_hash: String,
}

/// Output of `secretcli q compute tx`, i.e. the tx as decrypted by the sender.
#[derive(Deserialize)]
struct ComputeTxOutput {
    #[serde(default, alias = "output_logs")]
    output_log: Vec<Event>,
    #[serde(default)]
    plaintext_error: String,
}

impl SecretNetworkClient {
    pub fn new(config: ChainNetworkConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &ChainNetworkConfig {
        &self.config
    }

    /// Makes sure the keyring holds `key_name` for exactly this wallet,
    /// recovering it from the mnemonic if it is missing.
    pub async fn import_key(&self, credentials: &Credentials) -> anyhow::Result<()> {
        match self.key_address().await? {
            Some(address) if address == credentials.address() => {
                debug!(key = %self.config.key_name, "keyring entry already present");
                Ok(())
            }
            Some(address) => bail!(
                "keyring entry '{}' belongs to {address}, expected {}",
                self.config.key_name,
                credentials.address()
            ),
            None => {
                info!(key = %self.config.key_name, "recovering key into secretcli keyring");
                self.recover_key(credentials).await
            }
        }
    }

    async fn key_address(&self) -> anyhow::Result<Option<String>> {
        let output = self
            .command()
            .args(["keys", "show", self.config.key_name.as_str(), "-a"])
            .args(["--keyring-backend", self.config.keyring_backend.as_str()])
            .output()
            .await
            .with_context(|| format!("failed to launch {}", self.config.secretcli))?;

        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_owned()))
    }

    async fn recover_key(&self, credentials: &Credentials) -> anyhow::Result<()> {
        let mut child = self
            .command()
            .args(["keys", "add", self.config.key_name.as_str(), "--recover"])
            .args(["--keyring-backend", self.config.keyring_backend.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to launch {}", self.config.secretcli))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(format!("{}\n", credentials.mnemonic()).as_bytes())
                .await?;
        }

        let output = child.wait_with_output().await?;
        ensure!(
            output.status.success(),
            "secretcli keys add failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );

        match self.key_address().await? {
            Some(address) if address == credentials.address() => Ok(()),
            other => bail!(
                "recovered key has address {:?}, expected {}",
                other,
                credentials.address()
            ),
        }
    }

    fn command(&self) -> Command {
        Command::new(&self.config.secretcli)
    }

    async fn run(&self, args: &[String]) -> anyhow::Result<Output> {
        debug!(?args, "running secretcli");

        self.command()
            .args(args)
            .output()
            .await
            .with_context(|| format!("failed to launch {}", self.config.secretcli))
    }

    async fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> anyhow::Result<T> {
        let output = self.run(args).await?;

        if !output.status.success() {
            bail!(
                "secretcli {} failed: {}",
                args.iter().take(3).cloned().collect::<Vec<_>>().join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        parse_stdout(&output)
    }

    fn tx_flags(&self, gas_limit: u64) -> Vec<String> {
        let gas = gas_limit.to_string();
        [
            "--from",
            self.config.key_name.as_str(),
            "--gas",
            gas.as_str(),
            "--chain-id",
            self.config.chain_id.as_str(),
            "--node",
            self.config.rpc_url.as_str(),
            "--keyring-backend",
            self.config.keyring_backend.as_str(),
            "-y",
            "--output",
            "json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn query_flags(&self) -> Vec<String> {
        vec!["--node".to_owned(), self.config.rpc_url.clone()]
    }

    /// Broadcasts and waits until the transaction is included in a block.
    ///
    /// The included transaction is returned even when its execution failed.
    async fn broadcast(&self, mut args: Vec<String>, gas_limit: u64) -> anyhow::Result<TxResponse> {
        args.extend(self.tx_flags(gas_limit));

        let broadcast: TxResponse = self.run_json(&args).await?;
        if !broadcast.is_success() {
            bail!(
                "transaction {} rejected on broadcast (code {}): {}",
                broadcast.txhash,
                broadcast.code,
                broadcast.raw_log
            );
        }
        info!(txhash = %broadcast.txhash, "transaction broadcast");

        self.wait_for_tx(&broadcast.txhash).await
    }

    async fn wait_for_tx(&self, txhash: &str) -> anyhow::Result<TxResponse> {
        let mut args = vec!["q".to_owned(), "tx".to_owned(), txhash.to_owned()];
        args.extend(self.query_flags());
        args.extend(["--output".to_owned(), "json".to_owned()]);

        for attempt in 1..=self.config.max_polls {
            sleep(self.config.poll_interval).await;

            let output = self.run(&args).await?;
            if output.status.success() {
                return parse_stdout(&output);
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.to_lowercase().contains("not found") {
                bail!("secretcli q tx {txhash} failed: {}", stderr.trim());
            }
            debug!(attempt, "transaction not found yet");
        }

        bail!(
            "transaction {txhash} not included after {} polls",
            self.config.max_polls
        )
    }

    /// Contract output is encrypted on chain; only the sender can read it back.
    ///
    /// A failed transaction is turned into an error carrying the decrypted
    /// contract error when there is one, the raw log otherwise.
    async fn with_decrypted_output(&self, mut tx: TxResponse) -> anyhow::Result<TxResponse> {
        let mut args = vec![
            "q".to_owned(),
            "compute".to_owned(),
            "tx".to_owned(),
            tx.txhash.clone(),
        ];
        args.extend(self.query_flags());

        if !tx.is_success() {
            let reason = match self.run_json::<ComputeTxOutput>(&args).await {
                Ok(output) if !output.plaintext_error.is_empty() => output.plaintext_error,
                Ok(_) => tx.raw_log,
                Err(err) => {
                    warn!(txhash = %tx.txhash, %err, "could not decrypt failed transaction");
                    tx.raw_log
                }
            };
            bail!("transaction {} failed (code {}): {reason}", tx.txhash, tx.code);
        }

        let output: ComputeTxOutput = self.run_json(&args).await?;
        if !output.plaintext_error.is_empty() {
            bail!("contract error: {}", output.plaintext_error);
        }

        tx.replace_wasm_events(output.output_log);
        Ok(tx)
    }

    fn code_hash_url(&self, code_id: u64) -> anyhow::Result<Url> {
        let base = format!("{}/", self.config.lcd_url.trim_end_matches('/'));
        Ok(Url::parse(&base)?.join(&format!("compute/v1beta1/code_hash/by_code_id/{code_id}"))?)
    }
}

fn parse_stdout<T: DeserializeOwned>(output: &Output) -> anyhow::Result<T> {
    serde_json::from_slice(&output.stdout).with_context(|| {
        format!(
            "unexpected secretcli output: {}",
            String::from_utf8_lossy(&output.stdout).trim()
        )
    })
}

fn delivered(tx: TxResponse) -> anyhow::Result<TxResponse> {
    ensure!(
        tx.is_success(),
        "transaction {} failed (code {}): {}",
        tx.txhash,
        tx.code,
        tx.raw_log
    );
    Ok(tx)
}

fn amount_flag(funds: &[Coin]) -> Option<String> {
    if funds.is_empty() {
        return None;
    }
    Some(
        funds
            .iter()
            .map(|coin| format!("{}{}", coin.amount, coin.denom))
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[async_trait]
impl ChainClient for SecretNetworkClient {
    async fn store_code(&self, request: StoreCodeRequest) -> anyhow::Result<TxResponse> {
        let wasm_path: PathBuf =
            std::env::temp_dir().join(format!("secret-business-card-{}.wasm", Uuid::new_v4()));
        tokio::fs::write(&wasm_path, &request.wasm_byte_code)
            .await
            .with_context(|| format!("could not stage bytecode at {}", wasm_path.display()))?;

        let mut args = vec![
            "tx".to_owned(),
            "compute".to_owned(),
            "store".to_owned(),
            wasm_path.to_string_lossy().into_owned(),
        ];
        if !request.source.is_empty() {
            args.extend(["--source".to_owned(), request.source]);
        }
        if !request.builder.is_empty() {
            args.extend(["--builder".to_owned(), request.builder]);
        }

        let result = self.broadcast(args, request.gas_limit).await.and_then(delivered);

        if let Err(err) = tokio::fs::remove_file(&wasm_path).await {
            warn!(path = %wasm_path.display(), %err, "could not remove staged bytecode");
        }
        result
    }

    async fn code_hash_by_code_id(&self, code_id: u64) -> anyhow::Result<String> {
        let url = self.code_hash_url(code_id)?;
        debug!(%url, "fetching code hash");

        let response: CodeHashResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        ensure!(!response.code_hash.is_empty(), "no code hash for code id {code_id}");
        Ok(response.code_hash)
    }

    async fn instantiate_contract(&self, request: InstantiateRequest) -> anyhow::Result<TxResponse> {
        // secretcli looks the code hash up itself
        debug!(code_id = request.code_id, code_hash = ?request.code_hash, "instantiating");

        let mut args = vec![
            "tx".to_owned(),
            "compute".to_owned(),
            "instantiate".to_owned(),
            request.code_id.to_string(),
            serde_json::to_string(&request.init_msg)?,
            "--label".to_owned(),
            request.label,
        ];
        if let Some(amount) = amount_flag(&request.init_funds) {
            args.extend(["--amount".to_owned(), amount]);
        }

        let tx = self.broadcast(args, request.gas_limit).await?;
        self.with_decrypted_output(tx).await
    }

    async fn execute_contract(&self, request: ExecuteRequest) -> anyhow::Result<TxResponse> {
        debug!(contract = %request.contract_address, code_hash = ?request.code_hash, "executing");

        let mut args = vec![
            "tx".to_owned(),
            "compute".to_owned(),
            "execute".to_owned(),
            request.contract_address,
            serde_json::to_string(&request.msg)?,
        ];
        if let Some(amount) = amount_flag(&request.sent_funds) {
            args.extend(["--amount".to_owned(), amount]);
        }

        let tx = self.broadcast(args, request.gas_limit).await?;
        self.with_decrypted_output(tx).await
    }

    async fn query_contract(&self, request: QueryRequest) -> anyhow::Result<Value> {
        debug!(contract = %request.contract_address, code_hash = ?request.code_hash, "querying");

        let mut args = vec![
            "q".to_owned(),
            "compute".to_owned(),
            "query".to_owned(),
            request.contract_address,
            serde_json::to_string(&request.query)?,
        ];
        args.extend(self.query_flags());

        self.run_json(&args)
            .await
            .map_err(|err| anyhow!("contract query failed: {err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Mutex, MutexGuard},
        time::Duration,
    };

    use super::*;

    fn test_config(secretcli: &str) -> ChainNetworkConfig {
        ChainNetworkConfig {
            chain_id: "pulsar-2".to_owned(),
            lcd_url: "https://api.pulsar.scrttestnet.com".to_owned(),
            rpc_url: "https://rpc.pulsar.scrttestnet.com".to_owned(),
            secretcli: secretcli.to_owned(),
            key_name: "business-card-demo".to_owned(),
            keyring_backend: "test".to_owned(),
            poll_interval: Duration::from_millis(1),
            max_polls: 3,
        }
    }

    #[test]
    fn test_code_hash_url() {
        let client = SecretNetworkClient::new(test_config("secretcli"));
        assert_eq!(
            client.code_hash_url(20855).unwrap().as_str(),
            "https://api.pulsar.scrttestnet.com/compute/v1beta1/code_hash/by_code_id/20855"
        );

        let mut config = test_config("secretcli");
        config.lcd_url = "http://localhost:1317/lcd/".to_owned();
        let client = SecretNetworkClient::new(config);
        assert_eq!(
            client.code_hash_url(7).unwrap().as_str(),
            "http://localhost:1317/lcd/compute/v1beta1/code_hash/by_code_id/7"
        );
    }

    #[test]
    fn test_tx_flags() {
        let client = SecretNetworkClient::new(test_config("secretcli"));
        let flags = client.tx_flags(4_000_000);

        assert_eq!(
            flags,
            vec![
                "--from",
                "business-card-demo",
                "--gas",
                "4000000",
                "--chain-id",
                "pulsar-2",
                "--node",
                "https://rpc.pulsar.scrttestnet.com",
                "--keyring-backend",
                "test",
                "-y",
                "--output",
                "json",
            ]
        );
    }

    #[test]
    fn test_amount_flag() {
        assert_eq!(amount_flag(&[]), None);

        let funds = vec![
            Coin {
                denom: "uscrt".to_owned(),
                amount: "100".to_owned(),
            },
            Coin {
                denom: "ibc/ABC".to_owned(),
                amount: "5".to_owned(),
            },
        ];
        assert_eq!(amount_flag(&funds).as_deref(), Some("100uscrt,5ibc/ABC"));
    }

    #[test]
    fn test_compute_tx_output_parses() {
        let output: ComputeTxOutput = serde_json::from_str(
            r#"{
                "input": "{\"generate_viewing_key\":{\"index\":0}}",
                "output_data": "",
                "output_data_as_string": "",
                "output_log": [
                    {"type": "wasm", "attributes": [
                        {"key": "contract_address", "value": "secret152ez4w3mmzwr288a2vu47txtpkzvdqcpemh2xc"},
                        {"key": "viewing_key", "value": "6TmfcXaZYjoP8DBn+I8LvPdjGCzLFZomydWqntoOzIQ="}
                    ]}
                ],
                "output_error": {},
                "plaintext_error": ""
            }"#,
        )
        .unwrap();

        assert_eq!(output.output_log.len(), 1);
        assert_eq!(output.output_log[0].attributes[1].key, "viewing_key");
        assert!(output.plaintext_error.is_empty());
    }

    // one fake at a time, so no other test forks while a script is still open for writing
    #[cfg(unix)]
    static FAKE_SECRETCLI: Mutex<()> = Mutex::new(());

    /// Writes an executable shell script standing in for `secretcli`.
    #[cfg(unix)]
    fn fake_secretcli(script: &str) -> (MutexGuard<'static, ()>, PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let guard = FAKE_SECRETCLI.lock().unwrap_or_else(|e| e.into_inner());
        let path = std::env::temp_dir().join(format!("fake-secretcli-{}", Uuid::new_v4()));
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        (guard, path)
    }

    #[cfg(unix)]
    fn execute_request() -> ExecuteRequest {
        ExecuteRequest {
            sender: "secret1sender".to_owned(),
            contract_address: "secret1contract".to_owned(),
            code_hash: None,
            msg: serde_json::json!({"generate_viewing_key": {"index": 0}}),
            sent_funds: vec![],
            gas_limit: 4_000_000,
        }
    }

    #[cfg(unix)]
    const TEST_MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    #[cfg(unix)]
    #[tokio::test]
    async fn test_execute_against_fake_secretcli() {
        let script = r#"#!/bin/sh
case "$1 $2 $3" in
  "tx compute execute")
    echo '{"txhash":"ABCDEF","code":0,"raw_log":"[]"}' ;;
  "q tx ABCDEF")
    echo '{"txhash":"ABCDEF","code":0,"logs":[{"msg_index":0,"events":[{"type":"message","attributes":[{"key":"contract_address","value":"secret1contract"}]},{"type":"wasm","attributes":[{"key":"Y2lwaGVy","value":"Y2lwaGVy"}]}]}]}' ;;
  "q compute tx")
    echo '{"output_log":[{"type":"wasm","attributes":[{"key":"viewing_key","value":"decrypted-key"}]}],"plaintext_error":""}' ;;
  "q compute query")
    echo '{"card":{"name":"Theo","address":"6969 Cool St","phone":"7032201994"}}' ;;
  *)
    echo "unexpected: $*" >&2
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let tx = client.execute_contract(execute_request()).await.unwrap();

        let entries = tx.log_entries();
        assert_eq!(tx.txhash, "ABCDEF");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].event_type, "wasm");
        assert_eq!(entries[1].value, "decrypted-key");

        let card = client
            .query_contract(QueryRequest {
                contract_address: "secret1contract".to_owned(),
                code_hash: None,
                query: serde_json::json!({"get_card": {"wallet": "secret1sender", "viewing_key": "decrypted-key", "index": 0}}),
            })
            .await
            .unwrap();
        assert_eq!(card["card"]["name"], "Theo");

        let err = client
            .instantiate_contract(InstantiateRequest {
                sender: "secret1sender".to_owned(),
                code_id: 1,
                code_hash: None,
                init_msg: serde_json::json!({"entropy": "x"}),
                label: "label".to_owned(),
                init_funds: vec![],
                gas_limit: 4_000_000,
            })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unexpected"));

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_execute_reports_decrypted_error() {
        let script = r#"#!/bin/sh
case "$1 $2 $3" in
  "tx compute execute")
    echo '{"txhash":"AA","code":0,"raw_log":"[]"}' ;;
  "q tx AA")
    echo '{"txhash":"AA","code":3,"raw_log":"encrypted: ZW5jcnlwdGVkIGVycm9y","logs":[]}' ;;
  "q compute tx")
    echo '{"output_log":[],"plaintext_error":"Generic error: no card at index 0"}' ;;
  *)
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let err = client.execute_contract(execute_request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("AA failed (code 3)"), "{message}");
        assert!(message.contains("Generic error: no card at index 0"), "{message}");
        assert!(!message.contains("ZW5jcnlwdGVkIGVycm9y"), "{message}");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_execute_without_plaintext_keeps_raw_log() {
        let script = r#"#!/bin/sh
case "$1 $2 $3" in
  "tx compute execute")
    echo '{"txhash":"AA","code":0,"raw_log":"[]"}' ;;
  "q tx AA")
    echo '{"txhash":"AA","code":11,"raw_log":"out of gas in location: WriteFlat","logs":[]}' ;;
  *)
    echo "no compute tx" >&2
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let err = client.execute_contract(execute_request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("AA failed (code 11)"), "{message}");
        assert!(message.contains("out of gas"), "{message}");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_broadcast_rejection() {
        let script = r#"#!/bin/sh
case "$1 $2 $3" in
  "tx compute execute")
    echo '{"txhash":"BB","code":13,"raw_log":"insufficient fees"}' ;;
  *)
    echo "should not poll" >&2
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let err = client.execute_contract(execute_request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("BB rejected on broadcast (code 13)"), "{message}");
        assert!(message.contains("insufficient fees"), "{message}");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_store_reports_raw_log() {
        let script = r#"#!/bin/sh
case "$1 $2 $3" in
  "tx compute store")
    echo '{"txhash":"CC","code":0,"raw_log":"[]"}' ;;
  "q tx CC")
    echo '{"txhash":"CC","code":5,"raw_log":"uploaded wasm is not valid","logs":[]}' ;;
  *)
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let err = client
            .store_code(StoreCodeRequest {
                sender: "secret1sender".to_owned(),
                wasm_byte_code: b"\0asm".to_vec(),
                source: String::new(),
                builder: String::new(),
                gas_limit: 4_000_000,
            })
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("CC failed (code 5)"), "{message}");
        assert!(message.contains("uploaded wasm is not valid"), "{message}");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_wait_for_tx_gives_up_after_max_polls() {
        let script = r#"#!/bin/sh
case "$1 $2" in
  "q tx")
    echo "Error: tx ($3) not found" >&2
    exit 1 ;;
  *)
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let err = client.wait_for_tx("DD").await.unwrap_err();
        assert_eq!(err.to_string(), "transaction DD not included after 3 polls");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_wait_for_tx_stops_on_malformed_output() {
        let script = r#"#!/bin/sh
case "$1 $2" in
  "q tx")
    echo 'height: "123"' ;;
  *)
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        let err = client.wait_for_tx("EE").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unexpected secretcli output"), "{message}");
        assert!(message.contains("height"), "{message}");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_import_key_rejects_foreign_keyring_entry() {
        let script = r#"#!/bin/sh
case "$1 $2" in
  "keys show")
    echo "secret1someoneelse" ;;
  *)
    echo "must not recover over an existing key" >&2
    exit 1 ;;
esac
"#;
        let (_guard, path) = fake_secretcli(script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));
        let credentials = Credentials::from_mnemonic(TEST_MNEMONIC).unwrap();

        let err = client.import_key(&credentials).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("belongs to secret1someoneelse"), "{message}");
        assert!(message.contains(credentials.address()), "{message}");

        std::fs::remove_file(&path).ok();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_import_key_recovers_missing_key() {
        let credentials = Credentials::from_mnemonic(TEST_MNEMONIC).unwrap();
        let recovered =
            std::env::temp_dir().join(format!("recovered-mnemonic-{}", Uuid::new_v4()));

        let script = r#"#!/bin/sh
case "$1 $2" in
  "keys show")
    if [ -f "@RECOVERED@" ]; then
      echo "@ADDRESS@"
    else
      echo "Error: business-card-demo is not a valid name or address: key not found" >&2
      exit 1
    fi ;;
  "keys add")
    cat > "@RECOVERED@" ;;
  *)
    exit 1 ;;
esac
"#
        .replace("@RECOVERED@", recovered.to_str().unwrap())
        .replace("@ADDRESS@", credentials.address());
        let (_guard, path) = fake_secretcli(&script);
        let client = SecretNetworkClient::new(test_config(path.to_str().unwrap()));

        client.import_key(&credentials).await.unwrap();

        let mnemonic = std::fs::read_to_string(&recovered).unwrap();
        assert_eq!(mnemonic.trim(), TEST_MNEMONIC);

        // already present now, nothing to recover
        client.import_key(&credentials).await.unwrap();

        std::fs::remove_file(&path).ok();
        std::fs::remove_file(&recovered).ok();
    }
}
