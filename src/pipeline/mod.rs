// Pipeline: fetch a worksheet and turn its keyword column into counts.

pub mod phrase_counts;
