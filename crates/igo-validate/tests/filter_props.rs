//! Property tests for the filtering invariants: the output sample
//! count never exceeds the input count, survivors keep their relative
//! order, and the filter is idempotent on its own output.

use proptest::prelude::*;
use serde_json::{Value, json};

use igo_model::RequestStatus;
use igo_validate::{GateConfig, RequestValidator, StatusSink};

#[derive(Default)]
struct CountingSink(std::sync::Mutex<Vec<RequestStatus>>);

impl CountingSink {
    fn statuses(&self) -> Vec<RequestStatus> {
        self.0.lock().unwrap().clone()
    }
}

impl StatusSink for CountingSink {
    fn log_request_status(&self, _request_json: &str, status: RequestStatus) {
        self.0.lock().unwrap().push(status);
    }
}

fn sample(index: usize, valid: bool) -> Value {
    if valid {
        json!({
            "igoId": format!("9000_X_{index}"),
            "investigatorSampleId": format!("inv-{index}"),
            "baitSet": "IMPACT505_BAITS",
            "cmoPatientId": "C-8484",
            "specimenType": "Blood",
            "cmoSampleIdFields": {
                "sampleType": "DNA",
                "normalizedPatientId": "C-8484"
            }
        })
    } else {
        // missing baitSet and cmoSampleIdFields: fails both rule sets
        json!({"igoId": format!("9000_X_{index}")})
    }
}

fn request(validity: &[bool], is_cmo: bool) -> String {
    let samples: Vec<Value> = validity
        .iter()
        .enumerate()
        .map(|(index, valid)| sample(index, *valid))
        .collect();
    json!({
        "requestId": "9000_X",
        "isCmoRequest": is_cmo,
        "samples": samples
    })
    .to_string()
}

proptest! {
    #[test]
    fn filtered_output_matches_valid_subsequence(
        validity in proptest::collection::vec(any::<bool>(), 1..12),
        is_cmo in any::<bool>(),
    ) {
        let sink = CountingSink::default();
        let gate = RequestValidator::new(GateConfig::default(), &sink);
        let raw = request(&validity, is_cmo);
        let valid_count = validity.iter().filter(|v| **v).count();

        let output = gate.filter_valid_request(&raw).unwrap();
        match output {
            None => {
                prop_assert_eq!(valid_count, 0);
                prop_assert_eq!(sink.statuses(), vec![RequestStatus::FailedSanityCheck]);
            }
            Some(filtered) => {
                let doc: Value = serde_json::from_str(&filtered).unwrap();
                let samples = doc["samples"].as_array().unwrap();
                prop_assert_eq!(samples.len(), valid_count);
                prop_assert!(samples.len() <= validity.len());

                // survivors appear in their original relative order
                let expected_ids: Vec<String> = validity
                    .iter()
                    .enumerate()
                    .filter(|(_, valid)| **valid)
                    .map(|(index, _)| format!("9000_X_{index}"))
                    .collect();
                let actual_ids: Vec<String> = samples
                    .iter()
                    .map(|s| s["igoId"].as_str().unwrap().to_string())
                    .collect();
                prop_assert_eq!(actual_ids, expected_ids);

                if valid_count < validity.len() {
                    prop_assert_eq!(
                        sink.statuses(),
                        vec![RequestStatus::MissingRequiredFields]
                    );
                } else {
                    prop_assert!(sink.statuses().is_empty());
                }
            }
        }
    }

    #[test]
    fn filtering_is_idempotent(
        validity in proptest::collection::vec(any::<bool>(), 1..12),
        is_cmo in any::<bool>(),
    ) {
        let sink = CountingSink::default();
        let gate = RequestValidator::new(GateConfig::default(), &sink);
        let raw = request(&validity, is_cmo);

        if let Some(first) = gate.filter_valid_request(&raw).unwrap() {
            let second = gate.filter_valid_request(&first).unwrap();
            prop_assert_eq!(Some(first), second);
        }
    }
}
