use std::fmt;

use xbc_address::{AddressCodec, Base58AddressCodec};
use xbc_definitions::Definitions;

static BASE58: Base58AddressCodec = Base58AddressCodec;

/// The registry and address codec an encode or decode runs against.
#[derive(Clone, Copy)]
pub struct CodecContext<'a> {
    pub definitions: &'a Definitions,
    pub addresses: &'a dyn AddressCodec,
}

impl<'a> CodecContext<'a> {
    pub fn new(definitions: &'a Definitions, addresses: &'a dyn AddressCodec) -> Self {
        Self {
            definitions,
            addresses,
        }
    }
}

impl CodecContext<'static> {
    /// Bundled definitions with base58 addresses.
    pub fn standard() -> Self {
        Self::new(Definitions::global(), &BASE58)
    }
}

impl Default for CodecContext<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CodecContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecContext")
            .field("fields", &self.definitions.fields().count())
            .finish_non_exhaustive()
    }
}
