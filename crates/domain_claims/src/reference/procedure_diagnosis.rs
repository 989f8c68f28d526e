//! Procedure to diagnosis support table
//!
//! Maps a procedure code to the ICD-10 prefixes that establish medical
//! necessity for it. Procedures missing from the table carry no requirement.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Diagnosis requirement for one procedure code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureRequirement {
    pub category: &'static str,
    pub accepted_prefixes: &'static [&'static str],
    pub description: &'static str,
}

const fn req(
    category: &'static str,
    accepted_prefixes: &'static [&'static str],
    description: &'static str,
) -> ProcedureRequirement {
    ProcedureRequirement {
        category,
        accepted_prefixes,
        description,
    }
}

static PROCEDURE_REQUIREMENTS: Lazy<HashMap<&'static str, ProcedureRequirement>> = Lazy::new(|| {
    HashMap::from([
        (
            "96413",
            req(
                "chemotherapy",
                &["C", "D0", "D37", "D38", "D39", "D4", "Z51.1"],
                "Chemotherapy administration, intravenous infusion; up to 1 hour",
            ),
        ),
        (
            "96415",
            req(
                "chemotherapy",
                &["C", "D0", "D37", "D38", "D39", "D4", "Z51.1"],
                "Chemotherapy administration, intravenous infusion; each additional hour",
            ),
        ),
        (
            "J9355",
            req(
                "chemotherapy drug",
                &["C50", "C16", "C15"],
                "Injection, trastuzumab, excludes biosimilar, 10 mg",
            ),
        ),
        (
            "77067",
            req(
                "imaging",
                &["Z12.31", "Z80.3", "N63", "R92", "C50"],
                "Screening mammography, bilateral, including CAD",
            ),
        ),
        (
            "71046",
            req(
                "imaging",
                &["J", "R05", "R06", "R07", "R50", "I", "C34", "Z87.01"],
                "Radiologic examination, chest; 2 views",
            ),
        ),
        (
            "93000",
            req(
                "cardiology",
                &["I", "R00", "R01", "R07", "R42", "R55", "Z01.81"],
                "Electrocardiogram, routine ECG with at least 12 leads; with interpretation and report",
            ),
        ),
        (
            "45378",
            req(
                "gastroenterology",
                &["K", "C18", "C19", "C20", "D12", "R19", "Z12.1", "Z80.0", "Z86.01"],
                "Colonoscopy, flexible; diagnostic",
            ),
        ),
        (
            "45380",
            req(
                "gastroenterology",
                &["K", "C18", "C19", "C20", "D12", "R19", "Z12.1", "Z80.0", "Z86.01"],
                "Colonoscopy, flexible; with biopsy, single or multiple",
            ),
        ),
        (
            "20610",
            req(
                "orthopedics",
                &["M", "S"],
                "Arthrocentesis, aspiration and/or injection, major joint or bursa",
            ),
        ),
        (
            "97110",
            req(
                "physical therapy",
                &["M", "S", "G", "R26", "Z47", "I69"],
                "Therapeutic procedure, 1 or more areas, each 15 minutes; therapeutic exercises",
            ),
        ),
        (
            "90837",
            req(
                "behavioral health",
                &["F", "Z63", "Z65"],
                "Psychotherapy, 60 minutes with patient",
            ),
        ),
        (
            "59400",
            req(
                "obstetrics",
                &["O", "Z3"],
                "Routine obstetric care including antepartum care, vaginal delivery and postpartum care",
            ),
        ),
        (
            "59510",
            req(
                "obstetrics",
                &["O", "Z3"],
                "Routine obstetric care including antepartum care, cesarean delivery and postpartum care",
            ),
        ),
        (
            "27130",
            req(
                "orthopedics",
                &["M16", "M87", "S72", "M24.85"],
                "Total hip arthroplasty",
            ),
        ),
    ])
});

static EXAMPLE_DIAGNOSES: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "96413",
            &[
                "C50.911 (Malignant neoplasm of unspecified site of right female breast)",
                "C34.90 (Malignant neoplasm of unspecified part of bronchus or lung)",
                "Z51.11 (Encounter for antineoplastic chemotherapy)",
            ] as &[&str],
        ),
        (
            "96415",
            &[
                "C50.911 (Malignant neoplasm of unspecified site of right female breast)",
                "Z51.11 (Encounter for antineoplastic chemotherapy)",
            ] as &[&str],
        ),
        (
            "J9355",
            &[
                "C50.912 (Malignant neoplasm of unspecified site of left female breast)",
                "C16.9 (Malignant neoplasm of stomach, unspecified)",
            ] as &[&str],
        ),
        (
            "77067",
            &["Z12.31 (Encounter for screening mammogram for malignant neoplasm of breast)"] as &[&str],
        ),
        (
            "93000",
            &[
                "R07.9 (Chest pain, unspecified)",
                "I48.91 (Unspecified atrial fibrillation)",
                "Z01.810 (Encounter for preprocedural cardiovascular examination)",
            ] as &[&str],
        ),
        (
            "45378",
            &[
                "Z12.11 (Encounter for screening for malignant neoplasm of colon)",
                "K92.1 (Melena)",
            ] as &[&str],
        ),
        (
            "20610",
            &[
                "M17.11 (Unilateral primary osteoarthritis, right knee)",
                "M25.561 (Pain in right knee)",
            ] as &[&str],
        ),
        (
            "97110",
            &[
                "M54.50 (Low back pain, unspecified)",
                "Z47.1 (Aftercare following joint replacement surgery)",
            ] as &[&str],
        ),
        (
            "90837",
            &[
                "F41.1 (Generalized anxiety disorder)",
                "F33.1 (Major depressive disorder, recurrent, moderate)",
            ] as &[&str],
        ),
    ])
});

/// Looks up the diagnosis requirement for a normalized procedure code
pub fn procedure_requirement(code: &str) -> Option<&'static ProcedureRequirement> {
    PROCEDURE_REQUIREMENTS.get(code)
}

/// Example supporting diagnoses to suggest for a procedure code
pub fn example_diagnoses(code: &str) -> Option<&'static [&'static str]> {
    EXAMPLE_DIAGNOSES.get(code).copied()
}

impl ProcedureRequirement {
    /// Returns true if `diagnosis` starts with an accepted prefix, ignoring case
    pub fn is_supported_by(&self, diagnosis: &str) -> bool {
        let diagnosis = diagnosis.trim().to_ascii_uppercase();
        self.accepted_prefixes
            .iter()
            .any(|prefix| diagnosis.starts_with(&prefix.to_ascii_uppercase()))
    }
}
