#[macro_use]
extern crate cfg_if;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate serde;

mod cursor;
mod entity;
mod env;
mod error;
mod executor;
mod filter;
mod observe;
mod page;
mod paginator;
mod query;
mod request;
mod value;

pub mod entities;

pub use crate::cursor::*;
pub use crate::entity::*;
pub use crate::env::*;
pub use crate::error::*;
pub use crate::executor::*;
pub use crate::filter::*;
pub use crate::observe::*;
pub use crate::page::*;
pub use crate::paginator::*;
pub use crate::query::*;
pub use crate::request::*;
pub use crate::value::*;

cfg_if! { if #[cfg(feature = "diesel")] {
    mod diesel;
    pub use crate::diesel::*;
} }
