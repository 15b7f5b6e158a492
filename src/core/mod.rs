// Core primitives: quote tracking, line assembly and field tokenizing

pub mod assembler;
pub mod field;
pub mod quote;
pub mod scanner;

pub use assembler::{LineAssembler, LogicalLine};
pub use field::*;
pub use quote::{QuoteState, SmartQuote, SmartQuoteBalance};
pub use scanner::*;
