//! Document <-> entity conversions

mod comment;
mod post;
mod user;
