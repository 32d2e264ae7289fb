pub mod api;
mod classify;
pub mod fetcher;
mod form;
mod metadata;
pub mod parsers;
mod validator;

pub use classify::classify;
pub use fetcher::{FetchMode, FetchRequest, FetchResponse, Fetcher, HttpFetcher};
pub use form::{ContentDraft, DraftField};
pub use metadata::{MetadataOutcome, MetadataResolver};
pub use validator::{LinkValidator, MSG_INVALID_ID, MSG_NOT_PROVIDED};
