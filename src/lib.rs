//! # netlist-rs: Sequential And-Inverter Graphs in Rust
//!
//! **`netlist-rs`** is a small library for building, transforming and exchanging
//! **sequential And-Inverter Graph (AIG) netlists**, the input language of most
//! hardware model checkers.
//!
//! ## What is a sequential AIG?
//!
//! An AIG represents combinational logic with a single gate type, the two-input And,
//! and free negation on every edge. Adding **flops** (single-bit state elements with
//! an initial value and a next-state input) turns it into a model of a synchronous
//! circuit. Primary outputs can be classified as safety properties, invariant
//! constraints, fairness (justice) properties or fairness constraints.
//!
//! ## Key Features
//!
//! - **Store-Centric Architecture**: All nodes live in one [`Netlist`][crate::netlist::Netlist] arena
//!   and are referenced by copyable [`Signal`][crate::signal::Signal] handles carrying a polarity bit.
//! - **AIGER 1.9**: Reading and writing of both the ASCII (`aag`) and binary (`aig`) variants,
//!   including bad-state, constraint, justice and fairness sections and the symbol table.
//! - **Topological Ordering**: Deterministic bottom-up ordering of the combinational logic with
//!   combinational cycle detection.
//! - **Dead-Logic Elimination**: Removal of everything outside the sequential cone of influence
//!   of the outputs, with all references remapped.
//!
//! ## Basic Usage
//!
//! ```rust
//! use netlist_rs::netlist::Netlist;
//! use netlist_rs::node::FlopInit;
//!
//! let mut n = Netlist::new();
//!
//! // A flop that toggles whenever `en` is high.
//! let en = n.add_pi();
//! let ff = n.add_flop(FlopInit::Zero);
//! let stay = n.add_and(!en, ff).unwrap();
//! let flip = n.add_and(en, !ff).unwrap();
//! let next = n.add_and(!stay, !flip).unwrap();
//! n.set_flop_next(ff, !next).unwrap();
//!
//! // Safety property: the flop is never set.
//! let bad = n.add_po(ff).unwrap();
//! n.add_property(bad).unwrap();
//!
//! let order = n.uporder().unwrap();
//! assert_eq!(order.last(), Some(&next));
//! ```
//!
//! ## Core Components
//!
//! - **[`netlist`]**: The node store and its construction and query API.
//! - **[`aiger`]**: AIGER reading and writing.
//! - **[`uporder`]**: Topological ordering.
//! - **[`prune`]**: Removal of unreachable logic.

pub mod aiger;
pub mod error;
pub mod names;
pub mod netlist;
pub mod node;
pub mod prune;
pub mod signal;
pub mod uporder;

pub use error::{Error, Result};
