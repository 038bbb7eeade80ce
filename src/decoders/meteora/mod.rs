// src/decoders/meteora/mod.rs

pub mod dlmm;
