// Per-step field validation
//
// Validation problems are data, never errors: each check adds a field-keyed,
// user-displayable message to the returned map. The wizard state machine
// interprets the map; nothing here has side effects.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::form::FormData;
use crate::wizard::WizardStep;

/// Field name -> user-displayable validation message, keyed by wire field
/// names (`projectType`, `firstName`, ...).
pub type ErrorMap = HashMap<String, String>;

/// Reserved error key for submission (network/server) failures.
pub const SUBMIT_ERROR_KEY: &str = "submit";

/// The one user-facing message for any submission failure. The underlying
/// cause is logged by the submission client, not surfaced here.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit form. Please try again.";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Basic local@domain.tld shape; anything stricter belongs server-side.
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email pattern compiles")
    })
}

/// Validate the fields belonging to one wizard step. Pure and deterministic;
/// returns an empty map iff the step's required fields are well-formed.
pub fn validate_step(step: WizardStep, data: &FormData) -> ErrorMap {
    let mut errors = ErrorMap::new();

    match step {
        WizardStep::Project => {
            // All three checks run independently so every missing field
            // surfaces at once.
            if data.project_type.is_none() {
                errors.insert(
                    "projectType".to_string(),
                    "Please select a project type".to_string(),
                );
            }
            if data.urgency.is_none() {
                errors.insert(
                    "urgency".to_string(),
                    "Please select an urgency level".to_string(),
                );
            }
            if data.property_type.is_none() {
                errors.insert(
                    "propertyType".to_string(),
                    "Please select a property type".to_string(),
                );
            }
        }
        // Nothing on the details step is required.
        WizardStep::Details | WizardStep::Submitted => {}
        WizardStep::Contact => {
            if data.first_name.trim().is_empty() {
                errors.insert(
                    "firstName".to_string(),
                    "First name is required".to_string(),
                );
            }
            // Required and invalid-format are mutually exclusive, checked in
            // that order.
            if data.email.trim().is_empty() {
                errors.insert("email".to_string(), "Email address is required".to_string());
            } else if !email_pattern().is_match(&data.email) {
                errors.insert(
                    "email".to_string(),
                    "Please enter a valid email address".to_string(),
                );
            }
            if data.phone.trim().is_empty() {
                errors.insert("phone".to_string(), "Phone number is required".to_string());
            }
            if data.address.zip_code.trim().is_empty() {
                errors.insert("zipCode".to_string(), "ZIP code is required".to_string());
            }
            // last_name, street, and city are never validated.
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{ProjectType, PropertyType, Urgency};

    fn complete_step1() -> FormData {
        FormData {
            project_type: Some(ProjectType::RoofRepair),
            urgency: Some(Urgency::Immediate),
            property_type: Some(PropertyType::Residential),
            ..FormData::default()
        }
    }

    fn complete_step3() -> FormData {
        let mut data = complete_step1();
        data.first_name = "Jane".to_string();
        data.email = "jane@example.com".to_string();
        data.phone = "3035551234".to_string();
        data.address.zip_code = "80202".to_string();
        data
    }

    #[test]
    fn step1_passes_when_all_three_set() {
        assert!(validate_step(WizardStep::Project, &complete_step1()).is_empty());
    }

    #[test]
    fn step1_errors_are_independent() {
        let mut data = complete_step1();
        data.urgency = None;
        let errors = validate_step(WizardStep::Project, &data);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("urgency"));

        let mut data = complete_step1();
        data.project_type = None;
        let errors = validate_step(WizardStep::Project, &data);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("projectType"));

        let mut data = complete_step1();
        data.property_type = None;
        let errors = validate_step(WizardStep::Project, &data);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("propertyType"));
    }

    #[test]
    fn step1_all_three_errors_surface_simultaneously() {
        let data = FormData {
            property_type: None,
            ..FormData::default()
        };
        let errors = validate_step(WizardStep::Project, &data);
        assert_eq!(errors.len(), 3);
        assert!(errors.contains_key("projectType"));
        assert!(errors.contains_key("urgency"));
        assert!(errors.contains_key("propertyType"));
    }

    #[test]
    fn step2_never_requires_anything() {
        assert!(validate_step(WizardStep::Details, &FormData::default()).is_empty());
    }

    #[test]
    fn step3_passes_with_required_contact_fields() {
        assert!(validate_step(WizardStep::Contact, &complete_step3()).is_empty());
    }

    #[test]
    fn step3_empty_email_yields_required_message() {
        let mut data = complete_step3();
        data.email = String::new();
        let errors = validate_step(WizardStep::Contact, &data);
        assert_eq!(errors["email"], "Email address is required");
    }

    #[test]
    fn step3_malformed_email_yields_invalid_format_message() {
        for bad in ["not-an-email", "jane@", "jane@example", "a b@example.com"] {
            let mut data = complete_step3();
            data.email = bad.to_string();
            let errors = validate_step(WizardStep::Contact, &data);
            assert_eq!(
                errors["email"], "Please enter a valid email address",
                "email: {bad}"
            );
        }
    }

    #[test]
    fn step3_whitespace_only_fields_are_rejected() {
        let mut data = complete_step3();
        data.first_name = "  ".to_string();
        data.phone = "\t".to_string();
        data.address.zip_code = " ".to_string();
        let errors = validate_step(WizardStep::Contact, &data);
        assert!(errors.contains_key("firstName"));
        assert!(errors.contains_key("phone"));
        assert!(errors.contains_key("zipCode"));
    }

    #[test]
    fn step3_optional_fields_never_validated() {
        let mut data = complete_step3();
        data.last_name = String::new();
        data.address.street = String::new();
        data.address.city = String::new();
        assert!(validate_step(WizardStep::Contact, &data).is_empty());
    }

    #[test]
    fn validation_is_deterministic() {
        let data = FormData::default();
        assert_eq!(
            validate_step(WizardStep::Project, &data),
            validate_step(WizardStep::Project, &data)
        );
    }
}
