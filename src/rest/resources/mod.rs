//! ActiveCampaign resource kinds.
//!
//! Each kind implements [`Resource`](crate::rest::Resource) for the generic
//! CRUD operations and, where it has a natural key,
//! [`Resolve`](crate::rest::Resolve) so it can be referenced by that key.
//!
//! | Kind | Wire name | Natural key |
//! |------|-----------|-------------|
//! | [`Contact`] | `contact` | email |
//! | [`ContactsList`] | `list` | name |
//! | [`Connection`] | `connection` | service |
//! | [`Customer`] | `ecomCustomer` | email |
//! | [`Order`] | `ecomOrder` | none |
//! | [`Tag`] | `tag` | none |
//! | [`Automation`] | `automation` | none |
//!
//! # Example
//!
//! ```rust,ignore
//! use activecampaign::rest::Resource;
//! use activecampaign::rest::resources::{hydrate_order, Order};
//!
//! if let Some(order) = Order::fetch(&client, 44).await? {
//!     let order = hydrate_order(&client, order).await?;
//!     println!("{} line items", order.order_products.len());
//! }
//! ```

mod automation;
mod connection;
mod contact;
mod contacts_list;
mod customer;
mod order;
mod tag;

pub use automation::{Automation, ContactAutomation};
pub use connection::Connection;
pub use contact::{Contact, JoinRecord};
pub use contacts_list::{slugify, ContactsList, DEFAULT_SENDER_REMINDER};
pub use customer::Customer;
pub use order::{
    build_order_payload, hydrate_order, DiscountType, Order, OrderDate, OrderDiscount,
    OrderProduct,
};
pub use tag::{ContactTag, Tag};
