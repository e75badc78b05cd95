use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_USER_RATING: u8 = 1;
pub const MAX_USER_RATING: u8 = 10;

/// Personal star rating, 1 to 10 inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct UserRating(u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingError(pub u8);

impl fmt::Display for RatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rating {} is out of range ({}-{})",
            self.0, MIN_USER_RATING, MAX_USER_RATING
        )
    }
}

impl std::error::Error for RatingError {}

impl UserRating {
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (MIN_USER_RATING..=MAX_USER_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for UserRating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserRating> for u8 {
    fn from(rating: UserRating) -> Self {
        rating.0
    }
}

impl fmt::Display for UserRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rating_bounds() {
        assert!(UserRating::new(0).is_err());
        assert_eq!(UserRating::new(1).unwrap().value(), 1);
        assert_eq!(UserRating::new(10).unwrap().value(), 10);
        assert_eq!(UserRating::new(11), Err(RatingError(11)));
    }

    #[test]
    fn test_user_rating_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<UserRating>("7").is_ok());
        assert!(serde_json::from_str::<UserRating>("0").is_err());
        assert!(serde_json::from_str::<UserRating>("42").is_err());
    }
}
