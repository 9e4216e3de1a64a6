//! # Application
//!
//! The block lifecycle driver. A consensus engine calls, per block:
//!
//! ```text
//! begin_block(h) → deliver_tx(msg)* → end_block() → commit()
//! ```
//!
//! ## State layering
//!
//! - `committed`: durable state as of the last commit
//! - block write set: pending writes of the open block, layered over
//!   `committed` and merged only on `commit`
//! - per message: the handler's own cache view, merged into the block write
//!   set only when the message succeeds
//!
//! ## App hash
//!
//! SHA-256 over every store whose `StoreCheck` passes at the committed
//! height, in [`StoreName::ALL`] order. For each store: its name, then every
//! `(key, value)` pair length-prefixed. A store that is not active yet never
//! contributes, so scheduling an upgrade cannot change the hash of earlier
//! blocks.

use std::fmt;

use bk_02_asset::{export_genesis, init_genesis, AssetMsg, Token};
use bk_telemetry::{
    metric_inc, BK_ASSET_MINT_OPERATIONS, BK_ASSET_REJECTIONS, BK_ASSET_TOKENS_ISSUED,
    BK_CHAIN_HEIGHT, BK_TXS_DELIVERED, BK_TX_DELIVER_DURATION, BK_UPGRADE_HOOKS_FIRED,
};
use bk_01_upgrade_registry::{BlockPhase, UpgradeRegistry};
use sha2::{Digest, Sha256};
use shared_types::{
    Address, BlockHeight, CacheStore, Coins, Context, Event, KvRead, MemStore, SdkError, StoreName,
    WriteSet,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::container::{ConfigError, ModuleContainer, NodeConfig};
use crate::genesis::{AppGenesis, AppGenesisError};
use crate::handlers::{deliver_msg, route_query, TxResult};

/// Lifecycle errors. These are driver misuse or bad genesis input, never
/// message rejections; those are reported through [`TxResult`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Chain is already initialized")]
    AlreadyInitialized,

    #[error("Chain is not initialized")]
    NotInitialized,

    #[error("Block {0} is still open")]
    BlockInProgress(BlockHeight),

    #[error("No block is open")]
    NoOpenBlock,

    #[error("Block height {got} does not follow last committed height {last}")]
    UnexpectedHeight { last: BlockHeight, got: BlockHeight },

    #[error("Node halted at height {0}")]
    Halted(BlockHeight),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Genesis(#[from] AppGenesisError),

    #[error("Genesis funding failed: {0}")]
    Funding(#[from] SdkError),
}

/// Commitment to the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AppHash(pub [u8; 32]);

impl fmt::Display for AppHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitResult {
    pub height: BlockHeight,
    pub app_hash: AppHash,
    /// The configured halt height was reached; no further blocks are accepted.
    pub halted: bool,
}

struct OpenBlock {
    height: BlockHeight,
    writes: WriteSet,
}

pub struct App {
    chain_id: String,
    halt_height: BlockHeight,
    modules: ModuleContainer,
    committed: MemStore,
    block: Option<OpenBlock>,
    last_height: BlockHeight,
    last_app_hash: AppHash,
    initialized: bool,
    halted: bool,
}

impl App {
    /// Validates `config` and wires every module.
    pub fn new(config: &NodeConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            chain_id: config.chain_id.clone(),
            halt_height: config.halt_height,
            modules: ModuleContainer::new(config),
            committed: MemStore::new(),
            block: None,
            last_height: 0,
            last_app_hash: AppHash::default(),
            initialized: false,
            halted: false,
        })
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn registry(&self) -> &UpgradeRegistry {
        &self.modules.registry
    }

    pub fn last_height(&self) -> BlockHeight {
        self.last_height
    }

    pub fn last_app_hash(&self) -> AppHash {
        self.last_app_hash
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Validates `genesis`, loads it and commits height 0.
    #[instrument(skip(self, genesis), fields(chain_id = %self.chain_id))]
    pub fn init_chain(&mut self, genesis: &AppGenesis) -> Result<CommitResult, AppError> {
        if self.initialized {
            return Err(AppError::AlreadyInitialized);
        }
        self.modules.registry.set_block_height(0);
        genesis.validate(&self.chain_id)?;

        let mut cache = CacheStore::new(&mut self.committed);
        {
            let mut ctx = Context::new(&mut cache, 0);
            for balance in &genesis.balances {
                self.modules
                    .supply
                    .add_coins(&mut ctx, &balance.address, &balance.coins)?;
            }
            init_genesis(&mut ctx, &self.modules.keeper, &genesis.asset);
        }
        cache.commit();

        self.initialized = true;
        self.last_height = 0;
        self.last_app_hash = self.compute_app_hash();
        info!(
            accounts = genesis.balances.len(),
            tokens = genesis.asset.tokens.len(),
            app_hash = %self.last_app_hash,
            "Chain initialized"
        );
        Ok(CommitResult {
            height: 0,
            app_hash: self.last_app_hash,
            halted: false,
        })
    }

    /// Opens block `height`, which must directly follow the last committed
    /// one, and runs the begin-block hooks scheduled for it.
    pub fn begin_block(&mut self, height: BlockHeight) -> Result<Vec<Event>, AppError> {
        if !self.initialized {
            return Err(AppError::NotInitialized);
        }
        if self.halted {
            return Err(AppError::Halted(self.last_height));
        }
        if let Some(open) = &self.block {
            return Err(AppError::BlockInProgress(open.height));
        }
        if self.last_height.checked_add(1) != Some(height) {
            return Err(AppError::UnexpectedHeight {
                last: self.last_height,
                got: height,
            });
        }

        self.modules.registry.set_block_height(height);
        BK_CHAIN_HEIGHT.set(height as f64);
        self.block = Some(OpenBlock {
            height,
            writes: WriteSet::new(),
        });

        let ((first, last), events) = self.in_block(|modules, ctx| {
            let first = modules.registry.begin_blockers_first(ctx);
            // Module begin-block work would run here; no module has any.
            let last = modules.registry.begin_blockers_last(ctx);
            (first, last)
        })?;
        record_hooks(BlockPhase::BeginFirst, first);
        record_hooks(BlockPhase::BeginLast, last);
        debug!(height, "Block opened");
        Ok(events)
    }

    /// Gates and applies one message against the open block.
    pub fn deliver_tx(&mut self, msg: &AssetMsg) -> Result<TxResult, AppError> {
        let _timer = bk_telemetry::time_histogram!(BK_TX_DELIVER_DURATION);
        let (result, _) = self.in_block(|modules, ctx| deliver_msg(modules, ctx, msg))?;
        record_tx(msg, &result);
        Ok(result)
    }

    /// Runs the end-block hooks scheduled for the open block.
    pub fn end_block(&mut self) -> Result<Vec<Event>, AppError> {
        let ((first, last), events) = self.in_block(|modules, ctx| {
            let first = modules.registry.end_blockers_first(ctx);
            let last = modules.registry.end_blockers_last(ctx);
            (first, last)
        })?;
        record_hooks(BlockPhase::EndFirst, first);
        record_hooks(BlockPhase::EndLast, last);
        Ok(events)
    }

    /// Merges the open block into durable state and returns the new app hash.
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> Result<CommitResult, AppError> {
        let block = self.block.take().ok_or(AppError::NoOpenBlock)?;
        CacheStore::with_writes(&mut self.committed, block.writes).commit();

        self.last_height = block.height;
        self.last_app_hash = self.compute_app_hash();
        self.halted = self.halt_height != 0 && self.halt_height == block.height;

        info!(height = block.height, app_hash = %self.last_app_hash, "Block committed");
        if self.halted {
            warn!(height = block.height, "Halt height reached");
        }
        Ok(CommitResult {
            height: block.height,
            app_hash: self.last_app_hash,
            halted: self.halted,
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Answers `path` from committed state.
    pub fn query(&mut self, path: &str, data: &[u8]) -> Result<Vec<u8>, SdkError> {
        self.read(|modules, ctx| route_query(modules, ctx, path, data))
    }

    /// Every balance plus the asset section, as of the last commit.
    pub fn export_genesis(&mut self) -> Result<AppGenesis, AppError> {
        if let Some(open) = &self.block {
            return Err(AppError::BlockInProgress(open.height));
        }
        let chain_id = self.chain_id.clone();
        let genesis = self.read(|modules, ctx| AppGenesis {
            chain_id,
            balances: modules.supply.balances(ctx),
            asset: export_genesis(ctx, &modules.keeper),
        });
        info!(
            height = self.last_height,
            accounts = genesis.balances.len(),
            tokens = genesis.asset.tokens.len(),
            "Genesis exported"
        );
        Ok(genesis)
    }

    pub fn balance(&mut self, addr: &Address) -> Coins {
        self.read(|modules, ctx| modules.supply.get_balance(ctx, addr))
    }

    /// Total supply of every denom, as tracked by the supply ledger.
    pub fn total_supply(&mut self) -> Coins {
        self.read(|modules, ctx| modules.supply.get_supply(ctx))
    }

    pub fn token(&mut self, symbol: &str) -> Option<Token> {
        self.read(|modules, ctx| modules.keeper.get_token(ctx, symbol))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Runs `f` over the open block's state and keeps its writes.
    fn in_block<T>(
        &mut self,
        f: impl FnOnce(&ModuleContainer, &mut Context<'_>) -> T,
    ) -> Result<(T, Vec<Event>), AppError> {
        let block = self.block.as_mut().ok_or(AppError::NoOpenBlock)?;
        let writes = std::mem::take(&mut block.writes);
        let mut cache = CacheStore::with_writes(&mut self.committed, writes);
        let mut ctx = Context::new(&mut cache, block.height);
        let out = f(&self.modules, &mut ctx);
        let events = ctx.into_events();
        block.writes = cache.into_writes();
        Ok((out, events))
    }

    /// Runs `f` over committed state. Writes, if any, are discarded.
    fn read<T>(&mut self, f: impl FnOnce(&ModuleContainer, &Context<'_>) -> T) -> T {
        let mut cache = CacheStore::new(&mut self.committed);
        let ctx = Context::new(&mut cache, self.last_height);
        f(&self.modules, &ctx)
    }

    fn compute_app_hash(&self) -> AppHash {
        let mut hasher = Sha256::new();
        for store in StoreName::ALL {
            if !self.modules.registry.store_check(store) {
                continue;
            }
            let prefix = store.key_prefix();
            hasher.update(store.as_str().as_bytes());
            for (key, value) in self.committed.prefix_iter(&prefix) {
                let key = &key[prefix.len()..];
                hasher.update((key.len() as u64).to_le_bytes());
                hasher.update(key);
                hasher.update((value.len() as u64).to_le_bytes());
                hasher.update(&value);
            }
        }
        AppHash(hasher.finalize().into())
    }
}

fn record_hooks(phase: BlockPhase, fired: usize) {
    if fired > 0 {
        BK_UPGRADE_HOOKS_FIRED
            .with_label_values(&[phase.as_str()])
            .inc_by(fired as f64);
    }
}

fn record_tx(msg: &AssetMsg, result: &TxResult) {
    if result.is_ok() {
        metric_inc!(BK_TXS_DELIVERED, &["ok"]);
        match msg {
            AssetMsg::Issue(_) => BK_ASSET_TOKENS_ISSUED.inc(),
            AssetMsg::Mint(_) => BK_ASSET_MINT_OPERATIONS.inc(),
        }
    } else {
        let code = result.code.to_string();
        metric_inc!(BK_TXS_DELIVERED, &["rejected"]);
        metric_inc!(BK_ASSET_REJECTIONS, &[code.as_str()]);
    }
}
