//! Invoice domain entities.

pub mod line_item;
pub mod model;

pub use line_item::InvoiceLineItem;
pub use model::Invoice;
