//! Solar PV plant sizing for data-center loads.
//!
//! Scales a real reference plant (CA_PV_ED, Highvale, Alberta) to the solar
//! AC capacity a data center needs: equipment counts, land and civil works,
//! annual and monthly energy, plus per-month site diagnostics.
//!
//! ```no_run
//! use pv_sizing::{ReferencePlant, SizingInput, size};
//!
//! let result = size(&SizingInput::new(5.0, 1.3, 0.20), &ReferencePlant::ca_pv_ed())?;
//! assert_eq!(result.module_count, 67_600);
//! # Ok::<(), pv_sizing::SizingError>(())
//! ```
//!
//! The crate logs through `tracing` and never installs a subscriber.

pub mod api_docs;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use api_docs::ApiDoc;
pub use config::Config;
pub use error::{Result, SizingError};
pub use models::plant::ReferencePlant;
pub use models::sizing::{
    CivilWorks, ElectricalDesign, EnergyReport, EquipmentCounts, MonthlyResource, SizingInput,
    SizingResult,
};
pub use services::sizing_engine::{SizingEngine, size};
