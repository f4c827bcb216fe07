pub mod codec;
pub mod entities;
pub mod errors;
pub mod rollup;
pub mod roster;

pub use codec::{decode_payload, encode_payload, parse_command, parse_query_route};
pub use entities::*;
pub use errors::{CodecError, CodecResult};
pub use rollup::*;
pub use roster::Roster;
