// Core modules implementing error modeling shared across the api surface.
pub mod error;
