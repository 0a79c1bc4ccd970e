//! Point-in-time balance snapshots.

use fairroll_types::{Address, TokenAmount};
use fairroll_utils::now_millis;
use serde::{Deserialize, Serialize};

use crate::{Erc20, LedgerClient, LedgerError};

/// A balance and when it was read, in Unix milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: TokenAmount,
    pub updated_ms: u64,
}

/// Native and token balances of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub eth: Balance,
    pub bet: Balance,
}

fn require_owner(address: &Address) -> Result<(), LedgerError> {
    if address.is_zero() {
        return Err(LedgerError::MissingAddress("balance owner"));
    }
    Ok(())
}

/// Native balance. Wei and the token both use 18 decimals.
pub async fn get_eth_balance<L: LedgerClient>(
    ledger: &L,
    address: &Address,
) -> Result<Balance, LedgerError> {
    require_owner(address)?;
    let wei = ledger.balance(address).await?;
    Ok(Balance {
        amount: TokenAmount::from_base_units(wei),
        updated_ms: now_millis(),
    })
}

pub async fn get_bet_balance<L: LedgerClient>(
    ledger: &L,
    token: &Address,
    address: &Address,
) -> Result<Balance, LedgerError> {
    require_owner(address)?;
    let amount = Erc20::new(ledger, *token).balance_of(address).await?;
    Ok(Balance {
        amount,
        updated_ms: now_millis(),
    })
}

/// Both balances of `address`, token first.
pub async fn get_balances<L: LedgerClient>(
    ledger: &L,
    token: &Address,
    address: &Address,
) -> Result<Balances, LedgerError> {
    let bet = get_bet_balance(ledger, token, address).await?;
    let eth = get_eth_balance(ledger, address).await?;
    Ok(Balances { eth, bet })
}
