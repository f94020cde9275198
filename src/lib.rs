//! # Zircuit Core
//!
//! An equivalent-circuit impedance engine for electrochemical impedance
//! spectroscopy (EIS).
//!
//! This library provides:
//! - Passive element models (resistor, capacitor, constant-phase element,
//!   inductor) with complex impedance evaluation
//! - A composition algebra (`series`, `parallel`) that flattens nested
//!   combinations and recognizes the RC and RQ relaxation motifs
//! - Structural equality and a canonical child ordering for circuit trees
//! - Nested parameter mappings with collision-safe labels
//! - A parser for ZView ".mdl" equivalent-circuit model files
//! - Frequency sweeps and impedance tables writable as ZView or CSV input
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`element`] - The four passive elements and their impedance formulas
//! - [`circuit`] - Circuit trees, the composition algebra, equality and
//!   canonical ordering
//! - [`mapping`] - Nested label-to-parameter mappings
//! - [`mdl`] - Parser for ZView ".mdl" model files
//! - [`sweep`] - Logarithmic frequency sweeps and ω/f conversions
//! - [`zdata`] - Impedance tables and their ZView/CSV writers
//!
//! ## Usage
//!
//! Compose a circuit directly and evaluate it:
//!
//! ```
//! use zircuit_core::{parallel, series, Capacitor, Resistor};
//!
//! let cell = series(
//!     Resistor::new(20.0).with_label("R_el"),
//!     parallel(Resistor::new(1.0e5), Capacitor::new(1.0e-9)),
//! );
//! assert_eq!(cell.label(), "R_el-RC");
//!
//! let z = cell.impedance(1000.0);
//! assert!(z.re > 20.0 && z.im < 0.0);
//! ```
//!
//! Or parse a ZView model file and tabulate it over a sweep:
//!
//! ```no_run
//! use zircuit_core::{mdl, FrequencySweep, Result};
//!
//! fn tabulate() -> Result<()> {
//!     let model = mdl::parse_file("randles.mdl")?;
//!     let table = model.zdata(&FrequencySweep::default().points());
//!     table.to_csv("randles.csv", false)
//! }
//! ```
//!
//! ## Impedance Evaluation
//!
//! Evaluation recurses over the circuit tree. At angular frequency
//! ω = 2πf, a series combination sums the impedances of its children and a
//! parallel combination sums their admittances and inverts:
//!
//! 1. Elements evaluate their closed-form impedance (R, 1/(jωC),
//!    1/(T·(jω)^p), jωL)
//! 2. Series nodes return ΣZᵢ over all children
//! 3. Parallel nodes (including RC and RQ) return (Σ1/Zᵢ)⁻¹
//!
//! The RC and RQ motifs additionally expose their relaxation properties
//! (time constant, effective capacitance, relaxation frequency).

pub mod circuit;
pub mod element;
pub mod error;
pub mod mapping;
pub mod mdl;
pub mod sweep;
pub mod zdata;

// Re-export main types for convenience
pub use circuit::{
    canonical_cmp, parallel, series, Circuit, ParallelCircuit, Piece, RcCircuit, RqCircuit,
    SeriesCircuit,
};
pub use element::{Capacitor, Cpe, Element, Inductor, Resistor};
pub use error::{Result, ZircuitError};
pub use mapping::{Mapping, MappingValue};
pub use sweep::{angular_frequency, frequency, FrequencySweep};
pub use zdata::ZData;

pub use sweep::{DEFAULT_F_START, DEFAULT_F_STOP, DEFAULT_PTS_PER_DECADE};
