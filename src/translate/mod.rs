//! English to Chinese translation for the reader: a remote client, a
//! persisted cache, batch translation and a tiny offline dictionary.

pub mod batch;
pub mod cache;
pub mod client;
pub mod dictionary;
pub mod service;

pub use batch::BatchOptions;
pub use cache::TranslationCache;
pub use client::{MyMemoryClient, RemoteTranslator};
pub use dictionary::lookup_word;
pub use service::TranslationService;
