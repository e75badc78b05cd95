pub mod movie;
pub mod rating;
pub mod summary;
pub mod watched;

pub use movie::{MovieDetail, SearchResult};
pub use rating::{RatingError, UserRating};
pub use summary::WatchedSummary;
pub use watched::WatchedRecord;
