use std::time::Duration;

use fairroll_ledger::{get_balances, ConfirmPolicy, Erc20, GasConfig, LedgerClient, LedgerError};
use fairroll_nullables::NullLedger;
use fairroll_types::{Address, TokenAmount, Uint};

const TOKEN: Address = Address::new([0xBE; 20]);
const PLAYER: Address = Address::new([0x01; 20]);
const CASINO: Address = Address::new([0x02; 20]);

fn fast_policy() -> ConfirmPolicy {
    ConfirmPolicy {
        confirmations: 1,
        poll_interval: Duration::from_millis(1),
        timeout: Duration::from_millis(200),
    }
}

fn tokens(n: u64) -> TokenAmount {
    TokenAmount::from_whole(n)
}

#[tokio::test]
async fn balance_and_allowance_reads() {
    let ledger = NullLedger::new();
    ledger.set_token_balance(TOKEN, PLAYER, tokens(12).base_units().clone());
    ledger.set_allowance(TOKEN, PLAYER, CASINO, tokens(3).base_units().clone());

    let erc20 = Erc20::new(&ledger, TOKEN);
    assert_eq!(erc20.balance_of(&PLAYER).await.unwrap(), tokens(12));
    assert_eq!(erc20.allowance(&PLAYER, &CASINO).await.unwrap(), tokens(3));
    assert_eq!(erc20.allowance(&CASINO, &PLAYER).await.unwrap(), TokenAmount::zero());
}

#[tokio::test]
async fn approve_safe_skips_when_allowance_suffices() {
    let ledger = NullLedger::new();
    ledger.set_allowance(TOKEN, PLAYER, CASINO, tokens(10).base_units().clone());

    let receipts = Erc20::new(&ledger, TOKEN)
        .approve_safe(&PLAYER, &CASINO, &tokens(10), &GasConfig::default(), &fast_policy())
        .await
        .unwrap();
    assert!(receipts.is_empty());
    assert!(ledger.sent().is_empty());
}

#[tokio::test]
async fn approve_safe_from_zero_approves_once() {
    let ledger = NullLedger::new();
    ledger.deploy_token(TOKEN);

    let receipts = Erc20::new(&ledger, TOKEN)
        .approve_safe(&PLAYER, &CASINO, &tokens(5), &GasConfig::default(), &fast_policy())
        .await
        .unwrap();
    assert_eq!(receipts.len(), 1);
    assert_eq!(ledger.sent().len(), 1);
    assert_eq!(ledger.token_allowance(&TOKEN, &PLAYER, &CASINO), *tokens(5).base_units());
}

#[tokio::test]
async fn approve_safe_resets_partial_allowance_first() {
    let ledger = NullLedger::new();
    ledger.set_allowance(TOKEN, PLAYER, CASINO, tokens(2).base_units().clone());

    let receipts = Erc20::new(&ledger, TOKEN)
        .approve_safe(&PLAYER, &CASINO, &tokens(5), &GasConfig::default(), &fast_policy())
        .await
        .unwrap();
    assert_eq!(receipts.len(), 2);

    let sent = ledger.sent();
    assert_eq!(sent.len(), 2);
    // approve(spender, 0) then approve(spender, 5 tokens)
    assert_eq!(&sent[0].data[4..36], &CASINO.to_word());
    assert_eq!(&sent[0].data[36..], &[0u8; 32]);
    assert_eq!(&sent[1].data[36..], &tokens(5).base_units().to_be_bytes32().unwrap());
    assert_eq!(ledger.token_allowance(&TOKEN, &PLAYER, &CASINO), *tokens(5).base_units());
}

#[tokio::test]
async fn approvals_carry_configured_gas() {
    let ledger = NullLedger::new();
    ledger.deploy_token(TOKEN);
    let gas = GasConfig {
        price: Uint::from(7u64),
        limit: 90_000,
    };

    Erc20::new(&ledger, TOKEN)
        .approve(&PLAYER, &CASINO, &tokens(1), &gas)
        .await
        .unwrap();
    let sent = ledger.sent();
    assert_eq!(sent[0].gas_limit, Some(90_000));
    assert_eq!(sent[0].gas_price, Some(Uint::from(7u64)));
    assert_eq!(sent[0].to, TOKEN);
    assert_eq!(sent[0].from, PLAYER);
}

#[tokio::test]
async fn transfer_pays_out() {
    let ledger = NullLedger::new();
    ledger.set_token_balance(TOKEN, CASINO, tokens(100).base_units().clone());

    let erc20 = Erc20::new(&ledger, TOKEN);
    let tx = erc20
        .transfer(&CASINO, &PLAYER, &tokens(30), &GasConfig::default())
        .await
        .unwrap();
    assert!(ledger.receipt(&tx).await.unwrap().unwrap().status);
    assert_eq!(erc20.balance_of(&PLAYER).await.unwrap(), tokens(30));
    assert_eq!(erc20.balance_of(&CASINO).await.unwrap(), tokens(70));
}

#[tokio::test]
async fn sending_from_zero_address_is_rejected() {
    let ledger = NullLedger::new();
    ledger.deploy_token(TOKEN);
    let err = Erc20::new(&ledger, TOKEN)
        .transfer(&Address::ZERO, &PLAYER, &tokens(1), &GasConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::MissingAddress("sender")));
}

#[tokio::test]
async fn balances_snapshot_both_assets() {
    let ledger = NullLedger::new();
    ledger.set_balance(PLAYER, tokens(2).base_units().clone());
    ledger.set_token_balance(TOKEN, PLAYER, tokens(40).base_units().clone());

    let balances = get_balances(&ledger, &TOKEN, &PLAYER).await.unwrap();
    assert_eq!(balances.eth.amount, tokens(2));
    assert_eq!(balances.bet.amount, tokens(40));
    assert!(balances.eth.updated_ms > 0);
    assert!(balances.bet.updated_ms <= balances.eth.updated_ms);
}

#[tokio::test]
async fn balances_of_zero_address_are_refused() {
    let ledger = NullLedger::new();
    ledger.deploy_token(TOKEN);
    assert!(matches!(
        get_balances(&ledger, &TOKEN, &Address::ZERO).await,
        Err(LedgerError::MissingAddress(_))
    ));
}

#[tokio::test]
async fn transport_failures_surface() {
    let ledger = NullLedger::new();
    ledger.deploy_token(TOKEN);
    ledger.set_offline(true);
    assert!(matches!(
        Erc20::new(&ledger, TOKEN).balance_of(&PLAYER).await,
        Err(LedgerError::Transport(_))
    ));
}
