//! Transaction message routing.
//!
//! A message passes three gates in order, and the first failure decides the
//! result code:
//!
//! 1. `MsgCheck`: the message kind must be active at this height (code 6)
//! 2. `validate_basic`: stateless, height-gated field checks
//! 3. The module handler, which runs atomically

use bk_02_asset::AssetMsg;
use serde::Serialize;
use shared_types::{CodedError, Context, ErrorCode, Event, SdkError, CODE_OK};
use tracing::debug;

use crate::container::ModuleContainer;

/// Outcome of delivering one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxResult {
    pub code: ErrorCode,
    pub codespace: String,
    pub log: String,
    pub events: Vec<Event>,
}

impl TxResult {
    pub fn ok(events: Vec<Event>) -> Self {
        Self {
            code: CODE_OK,
            codespace: String::new(),
            log: String::new(),
            events,
        }
    }

    pub fn rejected(err: &dyn CodedError) -> Self {
        Self {
            code: err.code(),
            codespace: err.codespace().to_string(),
            log: err.to_string(),
            events: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// Gates and applies `msg`. A rejected message leaves `ctx` untouched.
pub fn deliver_msg(modules: &ModuleContainer, ctx: &mut Context<'_>, msg: &AssetMsg) -> TxResult {
    let registry = modules.registry.as_ref();
    let msg_type = msg.msg_type();

    if !registry.msg_check(msg_type) {
        let err = SdkError::UnknownRequest(format!(
            "msg type {msg_type} is not supported at height {}",
            registry.block_height()
        ));
        debug!(%msg_type, height = registry.block_height(), "Message kind not yet active");
        return TxResult::rejected(&err);
    }

    if let Err(err) = msg.validate_basic(registry) {
        debug!(%msg_type, error = %err, "Message failed basic validation");
        return TxResult::rejected(&err);
    }

    let before = ctx.events().len();
    match modules.handler.handle(ctx, msg) {
        Ok(()) => TxResult::ok(ctx.events()[before..].to_vec()),
        Err(err) => TxResult::rejected(&err),
    }
}
