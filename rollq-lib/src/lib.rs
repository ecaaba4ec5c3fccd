pub mod error;
mod parser;
pub mod query;
pub mod roll;
pub mod validate;

pub use error::Error;
pub use error::Result;
pub use parser::Parser;
pub use parser::TermMatch;
pub use query::DiceTerm;
pub use query::RollQuery;
pub use roll::Explode;
pub use roll::MultiRollResult;
pub use roll::RollResult;
