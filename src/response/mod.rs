pub mod resolver;

pub use resolver::{resolve, PairResponse, ResponseBody, ResponseDelta, RestitutionMode};
