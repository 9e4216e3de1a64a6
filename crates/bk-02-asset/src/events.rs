//! Events emitted by successful asset operations.
//!
//! Both operations report under the generic `message` event type, with one
//! attribute whose value is the minted coins (e.g. `21000000btc`).

use shared_types::{events::EVENT_TYPE_MESSAGE, Coin, Event};

pub const ATTRIBUTE_ISSUE_TOKEN: &str = "issue_token";
pub const ATTRIBUTE_MINT_TOKEN: &str = "mint_token";

pub fn issue_token_event(minted: &Coin) -> Event {
    Event::new(EVENT_TYPE_MESSAGE).with_attribute(ATTRIBUTE_ISSUE_TOKEN, minted.to_string())
}

pub fn mint_token_event(minted: &Coin) -> Event {
    Event::new(EVENT_TYPE_MESSAGE).with_attribute(ATTRIBUTE_MINT_TOKEN, minted.to_string())
}
