//! In-memory wallet that executes token calls against a simulated ledger.

use crate::TokenClient;
use alloy_primitives::{address, Address, Bytes, B256, U256};
use alloy_sol_types::{SolInterface, SolValue};
use binding::token::IERC20::IERC20Calls;
use config::TokenConfig;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};
use wallet::{CallRequest, Receipt, Wallet, WalletError, WalletSession};

/// Account the mock authorizes and funds.
pub const HOLDER: Address = address!("1111111111111111111111111111111111111111");

const WEI_PER_TOKEN: u64 = 1_000_000_000_000_000_000;

/// A write the mock received, accepted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentCall {
    Transfer {
        from: Address,
        to: Address,
        amount: U256,
    },
    Approve {
        owner: Address,
        spender: Address,
        amount: U256,
    },
    Burn {
        holder: Address,
        amount: U256,
    },
}

/// Simulated ledger. `None` metadata fields fail their read.
pub struct MockState {
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub total_supply: Option<U256>,
    pub balances: HashMap<Address, U256>,
    pub allowances: HashMap<(Address, Address), U256>,
    /// Fail every `balanceOf` / `allowance` read
    pub fail_reads: bool,
    /// Indices (in send order) the user declines to sign
    pub reject_sends: HashSet<usize>,
    pub sent: Vec<SentCall>,
}

impl MockState {
    fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Apply a write; false means the contract reverted.
    fn execute(&mut self, call: &SentCall) -> bool {
        match *call {
            SentCall::Transfer { from, to, amount } => {
                let balance = self.balance(from);
                if balance < amount {
                    return false;
                }
                self.balances.insert(from, balance - amount);
                let received = self.balance(to) + amount;
                self.balances.insert(to, received);
                true
            }
            SentCall::Approve {
                owner,
                spender,
                amount,
            } => {
                self.allowances.insert((owner, spender), amount);
                true
            }
            SentCall::Burn { holder, amount } => {
                let balance = self.balance(holder);
                if balance < amount {
                    return false;
                }
                self.balances.insert(holder, balance - amount);
                self.total_supply = self.total_supply.map(|supply| supply - amount);
                true
            }
        }
    }
}

pub struct MockWallet {
    accounts: Vec<Address>,
    state: Mutex<MockState>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockWallet {
    /// "MyToken", 18 decimals, 1M supply, 100 tokens held by `account`.
    pub fn new(account: Address) -> Self {
        let one_token = U256::from(WEI_PER_TOKEN);
        Self {
            accounts: vec![account],
            state: Mutex::new(MockState {
                name: Some("MyToken".to_string()),
                decimals: Some(18),
                total_supply: Some(U256::from(1_000_000) * one_token),
                balances: HashMap::from([(account, U256::from(100) * one_token)]),
                allowances: HashMap::new(),
                fail_reads: false,
                reject_sends: HashSet::new(),
                sent: Vec::new(),
            }),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Most sends ever observed in progress at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn read(&self, input: &[u8]) -> Result<Bytes, WalletError> {
        let call = IERC20Calls::abi_decode(input).map_err(|e| WalletError::Rpc(e.to_string()))?;
        let state = self.state();
        let unavailable = || WalletError::Rpc("execution failed".to_string());

        let output = match call {
            IERC20Calls::name(_) => state.name.clone().ok_or_else(unavailable)?.abi_encode(),
            IERC20Calls::decimals(_) => U256::from(state.decimals.ok_or_else(unavailable)?).abi_encode(),
            IERC20Calls::totalSupply(_) => state.total_supply.ok_or_else(unavailable)?.abi_encode(),
            IERC20Calls::balanceOf(c) if !state.fail_reads => state.balance(c.account).abi_encode(),
            IERC20Calls::allowance(c) if !state.fail_reads => state
                .allowances
                .get(&(c.owner, c.spender))
                .copied()
                .unwrap_or_default()
                .abi_encode(),
            _ => return Err(unavailable()),
        };
        Ok(output.into())
    }

    fn write(&self, request: &CallRequest) -> Result<Receipt, WalletError> {
        let from = request.from.ok_or(WalletError::NotConnected)?;
        let call = IERC20Calls::abi_decode(&request.input)
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        let sent = match call {
            IERC20Calls::transfer(c) => SentCall::Transfer {
                from,
                to: c.recipient,
                amount: c.amount,
            },
            IERC20Calls::approve(c) => SentCall::Approve {
                owner: from,
                spender: c.spender,
                amount: c.amount,
            },
            IERC20Calls::burn(c) => SentCall::Burn {
                holder: c.account,
                amount: c.amount,
            },
            _ => return Err(WalletError::Rpc("not a state-changing call".to_string())),
        };

        let mut state = self.state();
        let index = state.sent.len();
        state.sent.push(sent.clone());

        if state.reject_sends.contains(&index) {
            return Err(WalletError::Rejected(
                "User denied transaction signature.".to_string(),
            ));
        }

        let success = state.execute(&sent);
        Ok(Receipt {
            tx_hash: B256::with_last_byte(index as u8 + 1),
            block_number: Some(index as u64 + 1),
            gas_used: 21_000,
            success,
        })
    }
}

impl Wallet for MockWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.accounts.clone())
    }

    async fn call(&self, request: CallRequest) -> Result<Bytes, WalletError> {
        tokio::task::yield_now().await;
        self.read(&request.input)
    }

    async fn send(&self, request: CallRequest) -> Result<Receipt, WalletError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Give any concurrently polled send a chance to start
        tokio::task::yield_now().await;

        let result = self.write(&request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Connect a session over `wallet` and bind a client with the default config.
pub async fn connected_client(wallet: MockWallet) -> TokenClient<MockWallet> {
    let session = Arc::new(WalletSession::new(Some(wallet)));
    session.connect().await.unwrap();
    TokenClient::new(session, &TokenConfig::default()).unwrap()
}
