//! Discogs catalog integration - search, release lookup, collection browsing,
//! and cover image downloads.
//!
//! # Architecture
//!
//! - **Wire types** (`dto.rs`) - exact API response shapes and their
//!   human-readable summaries
//! - **Decoding** (`decode.rs`) - key-convention normalization applied before
//!   the typed decode
//! - **Client** (`client.rs`) - HTTP client for the four API operations
//! - **Images** (`images.rs`) - best-effort concurrent image batch downloads
//!
//! Everything is read-only toward the remote service: GET requests only, no
//! caching, no retries, and only the first page of any listing.

pub mod client;
pub mod decode;
pub mod dto;
pub mod error;
pub mod images;

pub use client::{DiscogsClient, DiscogsConfig, SearchType, SortKey};
pub use dto::{
    Artist, BasicInformation, Folder, FolderItem, Image, ImageKind, Label, MasterRelease,
    MasterSearchResult, Pagination, Track,
};
pub use error::DiscogsError;
pub use images::ImageDownloads;
