//! Duplicate submission detection.
//!
//! A new complaint is a duplicate iff some stored record matches it
//! exactly on the six-field key tuple: reporter_name, complaint_type,
//! location, address, contact_email, contact_phone. Comparison is
//! case-sensitive with no normalization; description, subtype and
//! timestamps never participate.

use crate::storage::ComplaintRecord;

use super::service::Submission;

/// Linear scan of the full history for an exact key-tuple match.
pub fn is_duplicate(candidate: &Submission, existing: &[ComplaintRecord]) -> bool {
    existing.iter().any(|record| {
        record.reporter_name == candidate.reporter_name
            && record.complaint_type == candidate.complaint_type
            && record.location == candidate.location
            && record.address == candidate.address
            && record.contact_email == candidate.contact_email
            && record.contact_phone == candidate.contact_phone
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission {
            reporter_name: "Ana Lima".to_string(),
            complaint_type: "Odor".to_string(),
            problem_subtype: "Chlorine".to_string(),
            location: "Reservoir".to_string(),
            address: "Dam Road".to_string(),
            description: "Strong smell.".to_string(),
            contact_email: "ana@example.com".to_string(),
            contact_phone: "555-0100".to_string(),
        }
    }

    fn stored(sub: &Submission) -> ComplaintRecord {
        ComplaintRecord {
            protocol_id: "PROTO-1".to_string(),
            created_at: "01/07/2024 10:00".to_string(),
            reporter_name: sub.reporter_name.clone(),
            complaint_type: sub.complaint_type.clone(),
            problem_subtype: sub.problem_subtype.clone(),
            location: sub.location.clone(),
            address: sub.address.clone(),
            description: sub.description.clone(),
            contact_email: sub.contact_email.clone(),
            contact_phone: sub.contact_phone.clone(),
        }
    }

    #[test]
    fn test_exact_tuple_match_is_duplicate() {
        let sub = submission();
        let existing = vec![stored(&sub)];
        assert!(is_duplicate(&sub, &existing));
    }

    #[test]
    fn test_empty_history_is_never_duplicate() {
        assert!(!is_duplicate(&submission(), &[]));
    }

    #[test]
    fn test_description_and_subtype_are_ignored() {
        let mut sub = submission();
        let existing = vec![stored(&sub)];

        sub.description = "Completely different text.".to_string();
        sub.problem_subtype = "Sulfur".to_string();
        assert!(is_duplicate(&sub, &existing));
    }

    #[test]
    fn test_any_key_field_difference_is_not_duplicate() {
        let base = submission();
        let existing = vec![stored(&base)];

        let mut other = submission();
        other.contact_phone = "555-0199".to_string();
        assert!(!is_duplicate(&other, &existing));

        let mut other = submission();
        other.location = "Plant 1".to_string();
        assert!(!is_duplicate(&other, &existing));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let base = submission();
        let existing = vec![stored(&base)];

        let mut other = submission();
        other.reporter_name = "ana lima".to_string();
        assert!(!is_duplicate(&other, &existing));
    }
}
