//! Domain models for the plant shop.
//!
//! Row types double as response payloads where the wire shape matches the
//! table; everything else has a dedicated view type.

pub mod cart;
pub mod plant;
pub mod user;

pub use cart::{CartItem, CartLine, NewCartItem};
pub use plant::{NewPlant, Plant};
pub use user::{NewUser, User, UserProfile};
