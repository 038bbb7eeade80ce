// src/decoders/raydium/mod.rs

pub mod clmm;
