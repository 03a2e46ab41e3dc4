pub mod binance;
pub mod forecast;

pub use binance::BinanceClient;
pub use forecast::ForecastClient;
