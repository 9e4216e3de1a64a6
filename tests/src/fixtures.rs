//! Test chain driver.

use bk_02_asset::{AccountBalance, AssetMsg, IssueMsg, MintMsg, Params, Token};
use node_runtime::{App, AppGenesis, CommitResult, NodeConfig, TxResult, UpgradeHeights};
use serde::de::DeserializeOwned;
use shared_types::{Address, BlockHeight, Coins, SdkError, FEE_COLLECTOR_NAME, NATIVE_DENOM};

pub fn addr(seed: &str) -> Address {
    Address::hash_of(seed.as_bytes())
}

pub fn fee_collector() -> Address {
    Address::for_module(FEE_COLLECTOR_NAME)
}

pub fn native(amount: u128) -> Coins {
    Coins::single(NATIVE_DENOM, amount).unwrap()
}

pub fn issue(
    from: Address,
    name: &str,
    symbol: &str,
    total_supply: i64,
    mintable: bool,
    decimal: i8,
    description: &str,
) -> AssetMsg {
    IssueMsg::new(from, name, symbol, total_supply, mintable, decimal, description).into()
}

pub fn mint(from: Address, symbol: &str, amount: i64) -> AssetMsg {
    MintMsg::new(from, symbol, amount).into()
}

/// An application plus the bookkeeping to drive it block by block.
pub struct TestChain {
    pub app: App,
}

impl TestChain {
    /// Genesis with the given native balances.
    pub fn new(heights: UpgradeHeights, funded: &[(Address, u128)]) -> Self {
        let genesis = AppGenesis {
            balances: funded
                .iter()
                .map(|(address, amount)| AccountBalance {
                    address: *address,
                    coins: native(*amount),
                })
                .collect(),
            ..AppGenesis::default()
        };
        Self::with_genesis(heights, &genesis)
    }

    pub fn with_genesis(heights: UpgradeHeights, genesis: &AppGenesis) -> Self {
        let mut config = NodeConfig::default();
        config.upgrade = heights;
        let mut app = App::new(&config).unwrap();
        app.init_chain(genesis).unwrap();
        Self { app }
    }

    pub fn height(&self) -> BlockHeight {
        self.app.last_height()
    }

    /// Runs one full block containing `msgs`, in order.
    pub fn block(&mut self, msgs: &[AssetMsg]) -> (Vec<TxResult>, CommitResult) {
        let height = self.height() + 1;
        self.app.begin_block(height).unwrap();
        let results = msgs
            .iter()
            .map(|msg| self.app.deliver_tx(msg).unwrap())
            .collect();
        self.app.end_block().unwrap();
        let commit = self.app.commit().unwrap();
        (results, commit)
    }

    /// Runs a one-message block and returns that message's result.
    pub fn deliver(&mut self, msg: AssetMsg) -> TxResult {
        let (mut results, _) = self.block(&[msg]);
        results.remove(0)
    }

    /// Runs empty blocks until `height` is committed.
    pub fn advance_to(&mut self, height: BlockHeight) {
        while self.height() < height {
            self.block(&[]);
        }
    }

    pub fn query<T: DeserializeOwned>(&mut self, path: &str, data: &[u8]) -> Result<T, SdkError> {
        let raw = self.app.query(path, data)?;
        Ok(serde_json::from_slice(&raw).unwrap())
    }

    pub fn params(&mut self) -> Params {
        self.query("custom/asset/params", &[]).unwrap()
    }

    pub fn token(&mut self, symbol: &str) -> Option<Token> {
        self.app.token(symbol)
    }

    pub fn balance_of(&mut self, who: &Address, denom: &str) -> u128 {
        self.app.balance(who).amount_of(denom)
    }

    pub fn supply_of(&mut self, denom: &str) -> u128 {
        self.app.total_supply().amount_of(denom)
    }
}
