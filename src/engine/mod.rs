pub mod dates;
pub mod normalize;
pub mod rating;
