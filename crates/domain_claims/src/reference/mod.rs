//! Static reference tables
//!
//! Code mappings, coding edits and payer policies the rules consult. All
//! tables are built once on first use and never change afterwards, so rules
//! may read them from any thread without locking.

pub mod procedure_diagnosis;
pub mod modifiers;
pub mod ncci;
pub mod payers;

pub use procedure_diagnosis::{procedure_requirement, example_diagnoses, ProcedureRequirement};
pub use modifiers::{modifier_definition, required_modifiers, ModifierDefinition, DISTINCT_SERVICE_MODIFIERS};
pub use ncci::{bundled_components, mutually_exclusive_pairs, unit_limit, BundledComponent, ExclusivePair};
pub use payers::{filing_window_days, payer_policy, PayerPolicy};
