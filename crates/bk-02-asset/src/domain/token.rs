//! Token record and its stored encoding.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// A user-issued token. `symbol` is the immutable, lowercase key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "decimals")]
    pub decimal: i8,
    pub total_supply: i64,
    pub mintable: bool,
    pub description: String,
    pub owner: Address,
}

impl Token {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimal: i8,
        total_supply: i64,
        mintable: bool,
        description: impl Into<String>,
        owner: Address,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            decimal,
            total_supply,
            mintable,
            description: description.into(),
            owner,
        }
    }

    /// Length-prefixed binary form: `u64` little-endian body length, then the
    /// bincode body.
    pub fn encode(&self) -> Vec<u8> {
        let body = match bincode::serialize(self) {
            Ok(body) => body,
            Err(e) => panic!("token {} is not encodable: {}", self.symbol, e),
        };
        let mut out = Vec::with_capacity(8 + body.len());
        out.extend_from_slice(&(body.len() as u64).to_le_bytes());
        out.extend_from_slice(&body);
        out
    }

    /// Inverse of [`Token::encode`]. Stored bytes are written only by the
    /// keeper, so anything malformed is corruption and panics.
    pub fn decode(raw: &[u8]) -> Self {
        if raw.len() < 8 {
            panic!("malformed token record: {} bytes", raw.len());
        }
        let (prefix, body) = raw.split_at(8);
        let mut len = [0u8; 8];
        len.copy_from_slice(prefix);
        let declared = u64::from_le_bytes(len);
        if declared != body.len() as u64 {
            panic!(
                "malformed token record: declared {} bytes, found {}",
                declared,
                body.len()
            );
        }
        match bincode::deserialize(body) {
            Ok(token) => token,
            Err(e) => panic!("malformed token record: {}", e),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Token:")?;
        writeln!(f, "  Name:         {}", self.name)?;
        writeln!(f, "  Symbol:       {}", self.symbol)?;
        writeln!(f, "  Decimal:      {}", self.decimal)?;
        writeln!(f, "  TotalSupply:  {}", self.total_supply)?;
        writeln!(f, "  Mintable:     {}", self.mintable)?;
        writeln!(f, "  Owner:        {}", self.owner)?;
        write!(f, "  Description:  {}", self.description)
    }
}
