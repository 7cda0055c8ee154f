// Phrase extraction: header cleanup, target column lookup, tokenization
// and frequency counting. Everything in here is pure; the spreadsheet
// fetch that feeds it lives in `pipeline`.

pub mod columns;
pub mod counts;
pub mod tokenize;
