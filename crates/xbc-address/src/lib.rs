//! Account address text forms for the XAH binary codec.
//!
//! Two encodings exist, both base58check over the ripple alphabet:
//!
//! - **classic** (`r...`): version byte `0x00` followed by the 20-byte id
//! - **X-address** (`X...` / `T...`): network prefix, id, tag flag and a
//!   little-endian tag, so one string carries both the account and its tag
//!
//! The codec reaches addresses only through the [`AddressCodec`] trait.

pub mod codec;
pub mod error;
pub mod x_address;

pub use codec::{AddressCodec, Base58AddressCodec};
pub use error::{AddressError, AddressResult};
pub use x_address::{ClassicAddress, XAddress};
