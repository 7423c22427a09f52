pub mod lottosheli;

pub use lottosheli::*;
