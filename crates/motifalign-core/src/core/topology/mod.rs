//! # Topology Module
//!
//! Static knowledge about which atom stands in for a whole residue when a motif
//! is reduced to one landmark point per residue.

pub mod landmarks;
