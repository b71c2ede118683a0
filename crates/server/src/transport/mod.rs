//! Transport layer for the hexnear server

pub mod http;
