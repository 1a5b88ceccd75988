pub mod core;
pub mod exchanges;
pub mod utils;

pub use crate::core::{
    config::ConfigStore, errors::ExchangeError, traits::ExchangeConnector, types::*,
};
pub use exchanges::bittrex::BittrexConnector;
pub use utils::{ExchangeFactory, ExchangeType};
