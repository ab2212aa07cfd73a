//! Time bookkeeping and easing for instructions.

pub mod timing;
pub mod transfer;
