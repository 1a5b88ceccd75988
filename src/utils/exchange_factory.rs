use crate::core::{config::ConfigStore, errors::ExchangeError, traits::ExchangeConnector};
use crate::exchanges::bittrex;
use std::str::FromStr;
use std::sync::Arc;

/// Supported exchange types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeType {
    Bittrex,
}

impl ExchangeType {
    pub const ALL: [Self; 1] = [Self::Bittrex];

    /// Numeric id stored alongside trades and transfers.
    pub const fn id(self) -> u32 {
        match self {
            Self::Bittrex => bittrex::ID,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|exchange| exchange.id() == id)
    }
}

impl std::fmt::Display for ExchangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bittrex => write!(f, "Bittrex"),
        }
    }
}

impl FromStr for ExchangeType {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bittrex" => Ok(Self::Bittrex),
            other => Err(ExchangeError::InvalidParameters(format!(
                "Unknown exchange: {}",
                other
            ))),
        }
    }
}

/// Factory for creating exchange connectors
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create a connector for the given exchange type, reading its
    /// credentials from `config`.
    pub fn create_connector(
        exchange_type: ExchangeType,
        config: Arc<ConfigStore>,
    ) -> Result<Box<dyn ExchangeConnector>, ExchangeError> {
        match exchange_type {
            ExchangeType::Bittrex => Ok(Box::new(bittrex::build_connector(config)?)),
        }
    }
}
