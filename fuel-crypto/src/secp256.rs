pub(crate) mod backend;

mod public;
mod secret;
mod signature;
mod signature_format;

pub use public::PublicKey;
pub use secret::SecretKey;
pub use signature::Signature;
