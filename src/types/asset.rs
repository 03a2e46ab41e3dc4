use serde::Serialize;

/// A tracked asset and the exchange pair its candles come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub symbol: &'static str,
    pub name: &'static str,
    pub pair: &'static str,
}

/// Assets served by the API.
pub const SUPPORTED_ASSETS: &[Asset] = &[
    Asset {
        symbol: "BTC",
        name: "Bitcoin",
        pair: "BTCUSDT",
    },
    Asset {
        symbol: "ETH",
        name: "Ethereum",
        pair: "ETHUSDT",
    },
    Asset {
        symbol: "SOL",
        name: "Solana",
        pair: "SOLUSDT",
    },
    Asset {
        symbol: "XRP",
        name: "XRP",
        pair: "XRPUSDT",
    },
];

impl Asset {
    /// Look up a supported asset by symbol, case-insensitively.
    pub fn find(symbol: &str) -> Option<&'static Asset> {
        let upper = symbol.to_uppercase();
        SUPPORTED_ASSETS.iter().find(|a| a.symbol == upper)
    }
}
