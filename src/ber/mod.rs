//! Basic Encoding Rules (BER) objects, decoder and encoder

mod class;
mod header;
pub(crate) mod integer;
mod length;
mod object;
mod parser;
mod print;
mod serialize;
mod tag;

pub use crate::ber::class::*;
pub use crate::ber::header::*;
pub use crate::ber::integer::{biguint_to_der_bytes, trim_integer};
pub use crate::ber::length::*;
pub use crate::ber::object::*;
pub use crate::ber::parser::*;
pub use crate::ber::print::*;
pub use crate::ber::serialize::*;
pub use crate::ber::tag::*;
pub use crate::error::{BerError, BerResult};
