//! Coding edit tables
//!
//! Column-one/column-two bundling pairs, mutually exclusive procedure pairs
//! and medically unlikely unit limits.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A column-two code absorbed by a comprehensive code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundledComponent {
    pub code: &'static str,
    /// A distinct-service modifier may unbundle the pair
    pub modifier_allowed: bool,
}

/// Two procedures that cannot both be valid on one claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusivePair {
    pub first: &'static str,
    pub second: &'static str,
    pub reason: &'static str,
}

const fn component(code: &'static str, modifier_allowed: bool) -> BundledComponent {
    BundledComponent {
        code,
        modifier_allowed,
    }
}

const CHEMO_INFUSION: &[BundledComponent] = &[
    component("96415", true),
    component("96360", true),
    component("96365", true),
    component("96372", true),
];

const METABOLIC_PANEL: &[BundledComponent] = &[
    component("82947", false),
    component("84132", false),
    component("82565", false),
    component("82040", false),
];

const ECG_COMPLETE: &[BundledComponent] = &[component("93005", false), component("93010", false)];

const COLONOSCOPY_BIOPSY: &[BundledComponent] = &[component("45378", true)];

const CHEST_TWO_VIEW: &[BundledComponent] = &[component("71045", false)];

const HIP_ARTHROPLASTY: &[BundledComponent] = &[component("20610", true), component("27093", false)];

const OFFICE_VISIT: &[BundledComponent] = &[component("99211", false)];

static BUNDLING: Lazy<HashMap<&'static str, &'static [BundledComponent]>> = Lazy::new(|| {
    HashMap::from([
        ("96413", CHEMO_INFUSION),
        ("80053", METABOLIC_PANEL),
        ("93000", ECG_COMPLETE),
        ("45380", COLONOSCOPY_BIOPSY),
        ("71046", CHEST_TWO_VIEW),
        ("27130", HIP_ARTHROPLASTY),
        ("99213", OFFICE_VISIT),
    ])
});

static EXCLUSIVE_PAIRS: &[ExclusivePair] = &[
    ExclusivePair {
        first: "59400",
        second: "59510",
        reason: "Global obstetric packages for vaginal delivery and cesarean delivery describe mutually exclusive outcomes of one pregnancy",
    },
    ExclusivePair {
        first: "59400",
        second: "59610",
        reason: "Routine vaginal delivery and vaginal delivery after previous cesarean cannot both describe the same delivery",
    },
    ExclusivePair {
        first: "59510",
        second: "59618",
        reason: "Cesarean delivery and cesarean after attempted VBAC cannot both describe the same delivery",
    },
    ExclusivePair {
        first: "27130",
        second: "27125",
        reason: "Total hip arthroplasty and hemiarthroplasty of the same hip are mutually exclusive",
    },
    ExclusivePair {
        first: "99203",
        second: "99213",
        reason: "A patient cannot be both new and established to the same provider on one date of service",
    },
    ExclusivePair {
        first: "99385",
        second: "99395",
        reason: "New and established patient preventive visits cannot be billed together",
    },
    ExclusivePair {
        first: "77067",
        second: "77066",
        reason: "Screening and diagnostic bilateral mammography cannot both be reported for one encounter",
    },
];

static UNIT_LIMITS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("96413", 1),
        ("96415", 8),
        ("96365", 1),
        ("99213", 1),
        ("99214", 1),
        ("36415", 2),
        ("80053", 1),
        ("85025", 2),
        ("93000", 1),
        ("71046", 2),
        ("20610", 2),
        ("97110", 6),
        ("90837", 1),
        ("77067", 1),
        ("J9355", 90),
    ])
});

/// Column-two codes bundled into a comprehensive code
pub fn bundled_components(comprehensive: &str) -> &'static [BundledComponent] {
    BUNDLING.get(comprehensive).copied().unwrap_or(&[])
}

/// All mutually exclusive pairs, in table order
pub fn mutually_exclusive_pairs() -> &'static [ExclusivePair] {
    EXCLUSIVE_PAIRS
}

/// Maximum plausible units per claim for a procedure
pub fn unit_limit(procedure_code: &str) -> Option<u32> {
    UNIT_LIMITS.get(procedure_code).copied()
}
