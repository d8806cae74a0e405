mod banding;
mod common;
mod export;
