// Output formatting: terminal display for the `count` command.

pub mod terminal;
