//! Core invoice record types, rule sets and validation.
//!
//! This module provides the record model for commercial import invoices,
//! the locale-tolerant number and date recognizers, the header and line item
//! rule sets, and total reconciliation.

pub mod dates;
mod error;
mod header;
pub mod incoterms;
mod items;
pub mod numeric;
mod reconcile;
mod record;
mod types;
mod validation;

pub use dates::{is_valid_date, recognize_date};
pub use error::*;
pub use header::*;
pub use incoterms::is_known_incoterm;
pub use items::*;
pub use numeric::parse_numeric;
pub use reconcile::*;
pub use record::*;
pub use types::*;
pub use validation::*;
