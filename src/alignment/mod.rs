pub mod similarity;
pub mod tokenization;
pub mod window;
