// src/ui/mod.rs
pub mod analysis;
pub mod cards;
pub mod deal_notes;
