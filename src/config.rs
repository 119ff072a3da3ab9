//! Service configuration from flags, environment, and `.env`.

use std::net::SocketAddr;

use clap::Parser;

use crate::exchange::Market;

#[derive(Debug, Clone, Parser)]
#[command(name = "limit-exchange", about = "Limit order book exchange over HTTP/JSON")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "EXCHANGE_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Comma-separated market identifiers, one order book each
    #[arg(long, env = "EXCHANGE_MARKETS", value_delimiter = ',', default_value = "ETH")]
    pub markets: Vec<String>,

    /// Resting orders to pre-allocate per book
    #[arg(long, env = "EXCHANGE_ORDER_CAPACITY", default_value_t = 10_000)]
    pub order_capacity: usize,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "EXCHANGE_LOG", default_value = "info")]
    pub log: String,
}

impl Config {
    pub fn markets(&self) -> impl Iterator<Item = Market> + '_ {
        self.markets
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .map(Market::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "limit-exchange",
            "--bind",
            "127.0.0.1:8080",
            "--markets",
            "ETH, BTC,,SOL",
            "--order-capacity",
            "500",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.order_capacity, 500);
        assert_eq!(config.log, "debug");
        let markets: Vec<_> = config.markets().map(|m| m.to_string()).collect();
        assert_eq!(markets, vec!["ETH", "BTC", "SOL"]);
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        assert!(Config::try_parse_from(["limit-exchange", "--bind", "not-an-addr"]).is_err());
    }
}
