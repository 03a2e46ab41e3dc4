//! Technical indicator implementations.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod macd;
pub mod pivot;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volume;

pub use adx::Adx;
pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use ema::{ema, Ema};
pub use fibonacci::Fibonacci;
pub use macd::{Macd, MacdSeries};
pub use pivot::pivot_levels;
pub use rsi::Rsi;
pub use sma::{sma, Sma};
pub use stochastic::Stochastic;
pub use volume::VolumeRatio;
