pub mod asset;
pub mod candle;
pub mod signals;

pub use asset::*;
pub use candle::*;
pub use signals::*;
