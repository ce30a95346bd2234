pub mod client;
pub mod dedupe;
pub mod details;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub(crate) mod retry;
pub mod search;
pub mod types;

pub use client::PlacesClient;
pub use dedupe::PlaceIdSet;
pub use details::DetailsPolicy;
pub use error::PlacesError;
pub use normalize::{maps_link_for, PlaceRow};
pub use pipeline::{discover_place_ids, enrich_places, DiscoverySummary};
pub use search::{SearchPolicy, TextSearch};
pub use types::{ApiStatus, PlaceDetails, SearchResult};
