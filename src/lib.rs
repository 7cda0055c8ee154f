// ChocoCloud: live word clouds from spreadsheet survey answers.
//
// This is the library root. The data flow is
//   sheets (fetch) -> phrases (clean, tokenize, count) -> cloud (layout, SVG) -> web (page)
// with `pipeline` tying the first two together.

pub mod cloud;
pub mod config;
pub mod output;
pub mod phrases;
pub mod pipeline;
pub mod sheets;
pub mod web;
