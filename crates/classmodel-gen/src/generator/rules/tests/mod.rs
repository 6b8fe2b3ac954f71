mod common;
mod dedup;
mod literals;
mod objects;
