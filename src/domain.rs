pub mod bucketize;
pub mod weather;
