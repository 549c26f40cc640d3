pub mod corpus;
pub mod term_vector;
pub mod token;

pub use corpus::Corpus;
pub use term_vector::TermVector;
pub use token::TokenFrequency;
