pub mod identity_client;
pub mod signer;
