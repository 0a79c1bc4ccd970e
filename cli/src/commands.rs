//! Subcommand implementations. Each returns the text printed on stdout.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::json;

use fairroll_crypto::{
    address_from_private, generate_private_key, solidity_sha3, to_checksum, Identity, LocalIdentity,
};
use fairroll_ledger::{
    get_balances, wait_for_confirmations, Erc20, JsonRpcLedger, LedgerConfig,
};
use fairroll_rng::{audit_round, derive_draws, derive_draws_from_signature, play_round, RoundRecord};
use fairroll_types::hash::decode_hex;
use fairroll_utils::add_0x;
use fairroll_types::{Address, DrawBatch, RangeSpec, Seed, Signature, TokenAmount, TypedValue, H256};

pub fn seed() -> anyhow::Result<String> {
    Ok(fairroll_rng::make_seed()?.to_hex())
}

pub fn random_hash() -> anyhow::Result<String> {
    Ok(fairroll_rng::random_hash()?)
}

pub fn keygen() -> anyhow::Result<String> {
    let key = generate_private_key()?;
    let address = address_from_private(&key)?;
    Ok(serde_json::to_string_pretty(&json!({
        "private_key": add_0x(&hex::encode(key.as_bytes())),
        "address": to_checksum(&address),
    }))?)
}

pub fn hash(values: &[TypedValue]) -> anyhow::Result<String> {
    Ok(solidity_sha3(values)?.to_hex())
}

pub fn sign(key: &str, digest: &H256) -> anyhow::Result<String> {
    let identity = LocalIdentity::from_hex(key).context("parsing private key")?;
    Ok(identity.sign_digest(digest)?.to_hex())
}

pub fn recover(digest: &H256, signature: &Signature) -> anyhow::Result<String> {
    Ok(to_checksum(&fairroll_crypto::recover(digest, signature)?))
}

/// Draws from a 32-byte source, or from a full signature after compression.
pub fn draw_batch(signature: &str, ranges: &[RangeSpec]) -> anyhow::Result<DrawBatch> {
    let bytes = decode_hex(signature).context("decoding signature")?;
    let batch = match bytes.len() {
        65 => derive_draws_from_signature(&Signature::from_slice(&bytes)?, ranges)?,
        _ => derive_draws(&bytes, ranges)?,
    };
    Ok(batch)
}

pub fn draw(signature: &str, ranges: &[RangeSpec]) -> anyhow::Result<String> {
    Ok(serde_json::to_string(&draw_batch(signature, ranges)?)?)
}

pub fn play(key: &str, seed: Option<Seed>, ranges: &[RangeSpec]) -> anyhow::Result<String> {
    let identity = LocalIdentity::from_hex(key).context("parsing private key")?;
    let seed = match seed {
        Some(seed) => seed,
        None => fairroll_rng::make_seed()?,
    };
    let record = play_round(&identity, &seed, ranges)?;
    Ok(serde_json::to_string_pretty(&record)?)
}

fn read_record(path: &Path) -> anyhow::Result<RoundRecord> {
    let mut text = String::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    serde_json::from_str(&text).context("parsing round record")
}

pub fn audit(path: &Path, signer: &Address) -> anyhow::Result<String> {
    let record = read_record(path)?;
    audit_round(&record, signer)?;
    Ok(format!(
        "ok: {} draws by {}",
        record.draws.len(),
        to_checksum(&record.signer)
    ))
}

pub async fn balance(config: &LedgerConfig, address: &Address) -> anyhow::Result<String> {
    let ledger = JsonRpcLedger::new(config.rpc_url())?;
    let balances = get_balances(&ledger, &config.token_address()?, address).await?;
    Ok(serde_json::to_string_pretty(&json!({
        "address": to_checksum(address),
        "eth": balances.eth.amount.to_decimal_string(),
        "bet": balances.bet.amount.to_decimal_string(),
        "updated_ms": balances.eth.updated_ms,
    }))?)
}

pub async fn approve(
    config: &LedgerConfig,
    from: &Address,
    spender: &Address,
    amount: &TokenAmount,
) -> anyhow::Result<String> {
    let ledger = JsonRpcLedger::new(config.rpc_url())?;
    let erc20 = Erc20::new(&ledger, config.token_address()?);
    let receipts = erc20
        .approve_safe(from, spender, amount, &config.gas, &config.confirm_policy())
        .await?;
    if receipts.is_empty() {
        return Ok(format!("allowance already covers {amount}"));
    }
    Ok(serde_json::to_string_pretty(&receipts)?)
}

pub async fn payout(
    config: &LedgerConfig,
    from: &Address,
    to: &Address,
    amount: &TokenAmount,
) -> anyhow::Result<String> {
    if amount.is_zero() {
        bail!("refusing to pay out zero tokens");
    }
    let ledger = JsonRpcLedger::new(config.rpc_url())?;
    let erc20 = Erc20::new(&ledger, config.token_address()?);
    let tx = erc20.transfer(from, to, amount, &config.gas).await?;
    let receipt = wait_for_confirmations(&ledger, &tx, &config.confirm_policy()).await?;
    Ok(serde_json::to_string_pretty(&receipt)?)
}
