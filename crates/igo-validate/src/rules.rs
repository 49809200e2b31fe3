//! Per-sample rule sets.
//!
//! Two alternate rule sets exist: CMO samples must carry every field
//! needed for downstream label generation, while non-CMO samples only
//! need a bait set and a normalized patient id. The specimen-type rule
//! is not a flat membership test; depending on the resolved specimen
//! type the decision routes to a secondary check, modeled explicitly
//! as [`SpecimenDecision`] so the fallback order stays auditable.

use serde_json::Value;

use igo_model::{CmoSampleClass, SampleOrigin, SampleType, SpecimenType};

use crate::SampleDoc;

/// Next check required after resolving a sample's specimen type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecimenDecision {
    /// Specimen type is a recognized, self-sufficient category.
    Accept,
    /// Missing, unrecognized, or a category (cell line, PDX,
    /// xenograft, organoid) that needs a resolvable sample class.
    CheckSampleClass,
    /// Exosome or cfDNA: validity depends on the sample origin.
    CheckSampleOrigin,
}

fn field_as_string(sample: &SampleDoc, key: &str) -> Option<String> {
    match sample.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn has_non_blank(sample: &SampleDoc, key: &str) -> bool {
    field_as_string(sample, key).is_some_and(|value| !value.trim().is_empty())
}

fn cmo_sample_id_fields(sample: &SampleDoc) -> Option<&serde_json::Map<String, Value>> {
    sample.get("cmoSampleIdFields")?.as_object()
}

/// Resolve the specimen type (falling back to `sampleClass`) and
/// decide which check governs the sample. First present key wins, so a
/// blank `specimenType` is not rescued by `sampleClass`.
pub fn specimen_decision(sample: &SampleDoc) -> SpecimenDecision {
    let resolved = field_as_string(sample, "specimenType")
        .or_else(|| field_as_string(sample, "sampleClass"));
    let Some(specimen_type) = resolved.and_then(|value| value.parse::<SpecimenType>().ok()) else {
        return SpecimenDecision::CheckSampleClass;
    };
    if specimen_type.requires_sample_class() {
        SpecimenDecision::CheckSampleClass
    } else if specimen_type.requires_sample_origin() {
        SpecimenDecision::CheckSampleOrigin
    } else {
        SpecimenDecision::Accept
    }
}

/// `cmoSampleClass` (falling back to the sample-level `sampleType`)
/// must be non-blank and a member of the CmoSampleClass vocabulary.
fn has_cmo_sample_class(sample: &SampleDoc) -> bool {
    let resolved = field_as_string(sample, "cmoSampleClass")
        .or_else(|| field_as_string(sample, "sampleType"));
    resolved.is_some_and(|value| CmoSampleClass::is_member(&value))
}

fn has_sample_origin(sample: &SampleDoc) -> bool {
    field_as_string(sample, "sampleOrigin")
        .is_some_and(|value| SampleOrigin::is_member(&value))
}

fn has_valid_specimen_type(sample: &SampleDoc) -> bool {
    match specimen_decision(sample) {
        SpecimenDecision::Accept => true,
        SpecimenDecision::CheckSampleClass => has_cmo_sample_class(sample),
        SpecimenDecision::CheckSampleOrigin => has_sample_origin(sample),
    }
}

/// Sample-type determination over the nested `cmoSampleIdFields` map.
///
/// The inner `sampleType` is acceptable when any of the following
/// hold:
/// - it is blank and the `naToExtract` key is present (an empty value
///   is fine, the label generator defaults to DNA);
/// - it is Pooled Library and the sample carries a bait set;
/// - it is a member of the SampleType vocabulary.
fn has_valid_sample_type(sample: &SampleDoc) -> bool {
    let inner = cmo_sample_id_fields(sample)
        .and_then(|fields| fields.get("sampleType"))
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default();

    if inner.trim().is_empty() {
        return cmo_sample_id_fields(sample)
            .is_some_and(|fields| fields.contains_key("naToExtract"));
    }
    if inner.parse::<SampleType>() == Ok(SampleType::PooledLibrary) {
        return has_non_blank(sample, "baitSet");
    }
    SampleType::is_member(&inner)
}

fn has_normalized_patient_id(sample: &SampleDoc) -> bool {
    cmo_sample_id_fields(sample)
        .is_some_and(|fields| fields.contains_key("normalizedPatientId"))
}

/// Validate a sample belonging to a CMO request.
///
/// A sample cannot be valid when its owning request has no id, so the
/// request-level result is propagated in.
pub fn is_valid_cmo_sample(sample: &SampleDoc, has_request_id: bool) -> bool {
    if sample.is_empty() {
        return false;
    }
    has_request_id
        && has_non_blank(sample, "investigatorSampleId")
        && has_non_blank(sample, "baitSet")
        && has_non_blank(sample, "cmoPatientId")
        && has_valid_specimen_type(sample)
        && has_valid_sample_type(sample)
        && has_normalized_patient_id(sample)
}

/// Validate a sample belonging to a non-CMO request. Deliberately
/// looser: investigator/patient ids and specimen checks are skipped.
pub fn is_valid_non_cmo_sample(sample: &SampleDoc) -> bool {
    has_non_blank(sample, "baitSet") && has_normalized_patient_id(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(value: serde_json::Value) -> SampleDoc {
        value.as_object().expect("test sample must be an object").clone()
    }

    fn complete_cmo_sample() -> SampleDoc {
        sample(json!({
            "investigatorSampleId": "P-001-T",
            "baitSet": "IMPACT505",
            "cmoPatientId": "C-8484",
            "specimenType": "Biopsy",
            "cmoSampleIdFields": {
                "sampleType": "DNA",
                "normalizedPatientId": "C-8484"
            }
        }))
    }

    #[test]
    fn test_complete_cmo_sample_passes() {
        assert!(is_valid_cmo_sample(&complete_cmo_sample(), true));
    }

    #[test]
    fn test_cmo_sample_requires_request_id() {
        assert!(!is_valid_cmo_sample(&complete_cmo_sample(), false));
    }

    #[test]
    fn test_empty_sample_is_invalid() {
        assert!(!is_valid_cmo_sample(&sample(json!({})), true));
    }

    #[test]
    fn test_cmo_sample_missing_required_fields() {
        for key in ["investigatorSampleId", "baitSet", "cmoPatientId"] {
            let mut s = complete_cmo_sample();
            s.remove(key);
            assert!(!is_valid_cmo_sample(&s, true), "missing {key} should fail");

            let mut s = complete_cmo_sample();
            s.insert(key.to_string(), json!("  "));
            assert!(!is_valid_cmo_sample(&s, true), "blank {key} should fail");
        }
    }

    #[test]
    fn test_specimen_decision_recognized_plain_type() {
        let s = sample(json!({"specimenType": "Biopsy"}));
        assert_eq!(specimen_decision(&s), SpecimenDecision::Accept);
    }

    #[test]
    fn test_specimen_decision_unrecognized_falls_back_to_class() {
        let s = sample(json!({"specimenType": "Stardust"}));
        assert_eq!(specimen_decision(&s), SpecimenDecision::CheckSampleClass);
        let s = sample(json!({}));
        assert_eq!(specimen_decision(&s), SpecimenDecision::CheckSampleClass);
    }

    #[test]
    fn test_specimen_decision_sample_class_alias_key() {
        let s = sample(json!({"sampleClass": "Exosome"}));
        assert_eq!(specimen_decision(&s), SpecimenDecision::CheckSampleOrigin);
    }

    #[test]
    fn test_cellline_needs_resolvable_sample_class() {
        let mut s = complete_cmo_sample();
        s.insert("specimenType".to_string(), json!("CellLine"));
        assert!(!is_valid_cmo_sample(&s, true));

        s.insert("cmoSampleClass".to_string(), json!("Tumor"));
        assert!(is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_cfdna_needs_valid_sample_origin() {
        let mut s = complete_cmo_sample();
        s.insert("specimenType".to_string(), json!("cfDNA"));
        assert!(!is_valid_cmo_sample(&s, true));

        s.insert("sampleOrigin".to_string(), json!("Not An Origin"));
        assert!(!is_valid_cmo_sample(&s, true));

        s.insert("sampleOrigin".to_string(), json!("Plasma"));
        assert!(is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_sample_class_fallback_to_sample_type_key() {
        // no specimenType at all, cmoSampleClass absent, sample-level
        // sampleType carries the class
        let mut s = complete_cmo_sample();
        s.remove("specimenType");
        s.insert("sampleType".to_string(), json!("Metastasis"));
        assert!(is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_blank_inner_sample_type_tolerated_with_na_to_extract() {
        let mut s = complete_cmo_sample();
        s.insert(
            "cmoSampleIdFields".to_string(),
            json!({"sampleType": "", "naToExtract": "", "normalizedPatientId": "C-8484"}),
        );
        assert!(is_valid_cmo_sample(&s, true));

        // without the naToExtract key the blank sample type fails
        s.insert(
            "cmoSampleIdFields".to_string(),
            json!({"sampleType": "", "normalizedPatientId": "C-8484"}),
        );
        assert!(!is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_pooled_library_requires_bait_set() {
        let mut s = complete_cmo_sample();
        s.insert(
            "cmoSampleIdFields".to_string(),
            json!({"sampleType": "Pooled Library", "normalizedPatientId": "C-8484"}),
        );
        assert!(is_valid_cmo_sample(&s, true));

        s.insert("baitSet".to_string(), json!(""));
        assert!(!is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_missing_cmo_sample_id_fields_map_fails_cmo_rules() {
        let mut s = complete_cmo_sample();
        s.remove("cmoSampleIdFields");
        assert!(!is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_normalized_patient_id_presence_only() {
        let mut s = complete_cmo_sample();
        s.insert(
            "cmoSampleIdFields".to_string(),
            json!({"sampleType": "DNA", "normalizedPatientId": ""}),
        );
        assert!(is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_non_cmo_sample_is_looser() {
        let s = sample(json!({
            "baitSet": "IMPACT505",
            "cmoSampleIdFields": {"normalizedPatientId": "C-8484"}
        }));
        assert!(is_valid_non_cmo_sample(&s));
        // the same sample fails the CMO rule set
        assert!(!is_valid_cmo_sample(&s, true));
    }

    #[test]
    fn test_non_cmo_sample_still_needs_bait_set() {
        let s = sample(json!({
            "cmoSampleIdFields": {"normalizedPatientId": "C-8484"}
        }));
        assert!(!is_valid_non_cmo_sample(&s));
    }
}
