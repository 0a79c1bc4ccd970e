//! Nullable ledger: an in-memory chain with native balances and ERC20 tokens.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use fairroll_crypto::{function_selector, keccak256_multi};
use fairroll_ledger::{LedgerClient, LedgerError, TxReceipt, TxRequest};
use fairroll_types::{Address, TxHash, Uint};

const BASE_GAS: u64 = 21_000;

#[derive(Default)]
struct TokenState {
    balances: HashMap<Address, Uint>,
    allowances: HashMap<(Address, Address), Uint>,
}

#[derive(Default)]
struct State {
    height: u64,
    manual_mining: bool,
    offline: bool,
    nonce: u64,
    native: HashMap<Address, Uint>,
    tokens: HashMap<Address, TokenState>,
    sent: Vec<TxRequest>,
    pending: Vec<(TxHash, TxRequest)>,
    receipts: HashMap<TxHash, TxReceipt>,
}

/// A test ledger that executes transactions in memory.
///
/// Every submitted transaction is mined into its own block immediately unless
/// manual mining is switched on, in which case it stays pending until
/// [`NullLedger::mine`]. Tokens understand `balanceOf`, `allowance`,
/// `approve` and `transfer`; anything else reverts.
#[derive(Default)]
pub struct NullLedger {
    state: Mutex<State>,
}

enum TokenOp {
    Approve { spender: Address, amount: Uint },
    Transfer { to: Address, amount: Uint },
}

fn words(data: &[u8]) -> Option<([u8; 4], Vec<[u8; 32]>)> {
    if data.len() < 4 || (data.len() - 4) % 32 != 0 {
        return None;
    }
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&data[..4]);
    let args = data[4..]
        .chunks_exact(32)
        .map(|c| {
            let mut word = [0u8; 32];
            word.copy_from_slice(c);
            word
        })
        .collect();
    Some((selector, args))
}

fn word_address(word: &[u8; 32]) -> Option<Address> {
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Address::from_slice(&word[12..]).ok()
}

fn decode_token_op(data: &[u8]) -> Option<TokenOp> {
    let (selector, args) = words(data)?;
    if args.len() != 2 {
        return None;
    }
    let target = word_address(&args[0])?;
    let amount = Uint::from_be_bytes(&args[1]);
    if selector == function_selector("approve(address,uint256)") {
        Some(TokenOp::Approve { spender: target, amount })
    } else if selector == function_selector("transfer(address,uint256)") {
        Some(TokenOp::Transfer { to: target, amount })
    } else {
        None
    }
}

impl State {
    /// Apply `tx` atomically; `false` means it reverted with no effect.
    fn execute(&mut self, tx: &TxRequest) -> bool {
        let native_from = self.native.get(&tx.from).cloned().unwrap_or_default();
        if native_from < tx.value {
            return false;
        }

        let op = match self.tokens.get(&tx.to) {
            Some(_) if tx.data.is_empty() => None,
            Some(_) => match decode_token_op(&tx.data) {
                Some(op) => Some(op),
                None => return false,
            },
            None => None,
        };

        if let (Some(TokenOp::Transfer { amount, .. }), Some(token)) = (&op, self.tokens.get(&tx.to)) {
            if token.balances.get(&tx.from).cloned().unwrap_or_default() < *amount {
                return false;
            }
        }

        if !tx.value.is_zero() {
            self.native.insert(tx.from, &native_from - &tx.value);
            let to = self.native.entry(tx.to).or_default();
            *to = &*to + &tx.value;
        }

        if let (Some(op), Some(token)) = (op, self.tokens.get_mut(&tx.to)) {
            match op {
                TokenOp::Approve { spender, amount } => {
                    token.allowances.insert((tx.from, spender), amount);
                }
                TokenOp::Transfer { to, amount } => {
                    let from_balance = token.balances.get(&tx.from).cloned().unwrap_or_default();
                    token.balances.insert(tx.from, &from_balance - &amount);
                    let dst = token.balances.entry(to).or_default();
                    *dst = &*dst + &amount;
                }
            }
        }
        true
    }

    fn mine_block(&mut self) {
        self.height += 1;
        let block = self.height;
        for (hash, tx) in std::mem::take(&mut self.pending) {
            let status = self.execute(&tx);
            let receipt = TxReceipt {
                tx_hash: hash,
                block_number: block,
                status,
                gas_used: BASE_GAS + 16 * tx.data.len() as u64,
            };
            self.receipts.insert(hash, receipt);
        }
    }
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn online(&self) -> Result<MutexGuard<'_, State>, LedgerError> {
        let state = self.state();
        if state.offline {
            return Err(LedgerError::Transport("null ledger is offline".into()));
        }
        Ok(state)
    }

    /// Set the native balance of `address` in wei.
    pub fn set_balance(&self, address: Address, wei: impl Into<Uint>) {
        self.state().native.insert(address, wei.into());
    }

    /// Register a token contract at `token`.
    pub fn deploy_token(&self, token: Address) {
        self.state().tokens.entry(token).or_default();
    }

    /// Set a token balance in base units, deploying the token if needed.
    pub fn set_token_balance(&self, token: Address, owner: Address, amount: impl Into<Uint>) {
        self.state()
            .tokens
            .entry(token)
            .or_default()
            .balances
            .insert(owner, amount.into());
    }

    pub fn set_allowance(&self, token: Address, owner: Address, spender: Address, amount: impl Into<Uint>) {
        self.state()
            .tokens
            .entry(token)
            .or_default()
            .allowances
            .insert((owner, spender), amount.into());
    }

    pub fn token_balance(&self, token: &Address, owner: &Address) -> Uint {
        self.state()
            .tokens
            .get(token)
            .and_then(|t| t.balances.get(owner).cloned())
            .unwrap_or_default()
    }

    pub fn token_allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Uint {
        self.state()
            .tokens
            .get(token)
            .and_then(|t| t.allowances.get(&(*owner, *spender)).cloned())
            .unwrap_or_default()
    }

    /// Keep submitted transactions pending until [`NullLedger::mine`].
    pub fn set_manual_mining(&self, manual: bool) {
        self.state().manual_mining = manual;
    }

    /// Fail every ledger call with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Mine `blocks` blocks; the first includes every pending transaction.
    pub fn mine(&self, blocks: u64) {
        let mut state = self.state();
        for _ in 0..blocks {
            state.mine_block();
        }
    }

    pub fn height(&self) -> u64 {
        self.state().height
    }

    /// Every transaction submitted so far, in order (for assertions).
    pub fn sent(&self) -> Vec<TxRequest> {
        self.state().sent.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.state().pending.len()
    }
}

impl LedgerClient for NullLedger {
    async fn balance(&self, address: &Address) -> Result<Uint, LedgerError> {
        Ok(self.online()?.native.get(address).cloned().unwrap_or_default())
    }

    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, LedgerError> {
        let state = self.online()?;
        let Some(token) = state.tokens.get(to) else {
            return Ok(Vec::new());
        };
        let reverted = || LedgerError::Rpc {
            code: -32000,
            message: "execution reverted".into(),
        };
        let (selector, args) = words(data).ok_or_else(reverted)?;

        let value = if selector == function_selector("balanceOf(address)") && args.len() == 1 {
            let owner = word_address(&args[0]).ok_or_else(reverted)?;
            token.balances.get(&owner).cloned().unwrap_or_default()
        } else if selector == function_selector("allowance(address,address)") && args.len() == 2 {
            let owner = word_address(&args[0]).ok_or_else(reverted)?;
            let spender = word_address(&args[1]).ok_or_else(reverted)?;
            token.allowances.get(&(owner, spender)).cloned().unwrap_or_default()
        } else {
            return Err(reverted());
        };
        Ok(value.to_be_bytes32()?.to_vec())
    }

    async fn send_transaction(&self, request: &TxRequest) -> Result<TxHash, LedgerError> {
        let mut state = self.online()?;
        state.nonce += 1;
        let hash = TxHash::new(keccak256_multi(&[
            &state.nonce.to_be_bytes(),
            request.from.as_bytes(),
            request.to.as_bytes(),
            &request.data,
        ]));
        state.sent.push(request.clone());
        state.pending.push((hash, request.clone()));
        if !state.manual_mining {
            state.mine_block();
        }
        Ok(hash)
    }

    async fn receipt(&self, tx: &TxHash) -> Result<Option<TxReceipt>, LedgerError> {
        Ok(self.online()?.receipts.get(tx).cloned())
    }

    async fn block_number(&self) -> Result<u64, LedgerError> {
        Ok(self.online()?.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairroll_crypto::encode_call;

    fn addr(b: u8) -> Address {
        Address::new([b; 20])
    }

    fn transfer_data(to: Address, amount: u64) -> Vec<u8> {
        encode_call(
            "transfer(address,uint256)",
            &[to.to_word(), Uint::from(amount).to_be_bytes32().unwrap()],
        )
    }

    #[tokio::test]
    async fn native_transfer_moves_value() {
        let ledger = NullLedger::new();
        ledger.set_balance(addr(1), 100u64);
        let mut tx = TxRequest::call(addr(1), addr(2), vec![]);
        tx.value = Uint::from(40u64);
        let hash = ledger.send_transaction(&tx).await.unwrap();

        assert_eq!(ledger.balance(&addr(1)).await.unwrap(), Uint::from(60u64));
        assert_eq!(ledger.balance(&addr(2)).await.unwrap(), Uint::from(40u64));
        let receipt = ledger.receipt(&hash).await.unwrap().unwrap();
        assert!(receipt.status);
        assert_eq!(receipt.block_number, 1);
    }

    #[tokio::test]
    async fn overdrawn_token_transfer_reverts_without_effect() {
        let ledger = NullLedger::new();
        let token = addr(9);
        ledger.set_token_balance(token, addr(1), 5u64);
        let tx = TxRequest::call(addr(1), token, transfer_data(addr(2), 6));
        let hash = ledger.send_transaction(&tx).await.unwrap();

        assert!(!ledger.receipt(&hash).await.unwrap().unwrap().status);
        assert_eq!(ledger.token_balance(&token, &addr(1)), Uint::from(5u64));
        assert_eq!(ledger.token_balance(&token, &addr(2)), Uint::zero());
    }

    #[tokio::test]
    async fn manual_mining_keeps_tx_pending() {
        let ledger = NullLedger::new();
        ledger.set_manual_mining(true);
        let hash = ledger
            .send_transaction(&TxRequest::call(addr(1), addr(2), vec![]))
            .await
            .unwrap();
        assert!(ledger.receipt(&hash).await.unwrap().is_none());
        assert_eq!(ledger.pending_count(), 1);

        ledger.mine(3);
        assert_eq!(ledger.receipt(&hash).await.unwrap().unwrap().block_number, 1);
        assert_eq!(ledger.block_number().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn unknown_selector_on_token_reverts() {
        let ledger = NullLedger::new();
        let token = addr(9);
        ledger.deploy_token(token);
        let err = ledger.call(&token, &[0xde, 0xad, 0xbe, 0xef]).await.unwrap_err();
        assert!(matches!(err, LedgerError::Rpc { code: -32000, .. }));
    }

    #[tokio::test]
    async fn offline_ledger_fails_every_call() {
        let ledger = NullLedger::new();
        ledger.set_offline(true);
        assert!(matches!(ledger.block_number().await, Err(LedgerError::Transport(_))));
        assert!(ledger
            .send_transaction(&TxRequest::call(addr(1), addr(2), vec![]))
            .await
            .is_err());
        assert!(ledger.sent().is_empty());
    }

    #[tokio::test]
    async fn tx_hashes_are_unique() {
        let ledger = NullLedger::new();
        let tx = TxRequest::call(addr(1), addr(2), vec![]);
        let a = ledger.send_transaction(&tx).await.unwrap();
        let b = ledger.send_transaction(&tx).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(ledger.sent().len(), 2);
    }
}
