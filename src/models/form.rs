// Lead form model and option catalogs
//
// The option catalogs (project types, urgency levels, budget ranges, roof
// issues) are fixed marketing-approved lists. They are modeled as read-only
// constant tables; nothing at runtime may extend them.

use serde::{Deserialize, Serialize};

/// Number of declared lead-form fields. Fixed denominator for the
/// completion-rate metric, known in advance of any user input.
pub const DECLARED_FIELD_COUNT: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    RoofReplacement,
    RoofRepair,
    StormDamage,
    GutterInstallation,
    RoofInspection,
    CommercialRoofing,
}

impl ProjectType {
    pub const ALL: [ProjectType; 6] = [
        ProjectType::RoofReplacement,
        ProjectType::RoofRepair,
        ProjectType::StormDamage,
        ProjectType::GutterInstallation,
        ProjectType::RoofInspection,
        ProjectType::CommercialRoofing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::RoofReplacement => "roof-replacement",
            ProjectType::RoofRepair => "roof-repair",
            ProjectType::StormDamage => "storm-damage",
            ProjectType::GutterInstallation => "gutter-installation",
            ProjectType::RoofInspection => "roof-inspection",
            ProjectType::CommercialRoofing => "commercial-roofing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::RoofReplacement => "Full Roof Replacement",
            ProjectType::RoofRepair => "Roof Repair",
            ProjectType::StormDamage => "Storm Damage Restoration",
            ProjectType::GutterInstallation => "Gutter Installation",
            ProjectType::RoofInspection => "Roof Inspection",
            ProjectType::CommercialRoofing => "Commercial Roofing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Immediate,
    WithinWeek,
    WithinMonth,
    Planning,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::Immediate,
        Urgency::WithinWeek,
        Urgency::WithinMonth,
        Urgency::Planning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::WithinWeek => "within-week",
            Urgency::WithinMonth => "within-month",
            Urgency::Planning => "planning",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Immediate => "Emergency - need help now",
            Urgency::WithinWeek => "Within a week",
            Urgency::WithinMonth => "Within a month",
            Urgency::Planning => "Just planning ahead",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Residential,
    Commercial,
    MultiFamily,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Residential,
        PropertyType::Commercial,
        PropertyType::MultiFamily,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
            PropertyType::MultiFamily => "multi-family",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Commercial => "Commercial",
            PropertyType::MultiFamily => "Multi-Family",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "under-10k")]
    Under10k,
    #[serde(rename = "10k-25k")]
    From10kTo25k,
    #[serde(rename = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "over-50k")]
    Over50k,
    #[serde(rename = "not-sure")]
    NotSure,
}

impl BudgetRange {
    pub const ALL: [BudgetRange; 5] = [
        BudgetRange::Under10k,
        BudgetRange::From10kTo25k,
        BudgetRange::From25kTo50k,
        BudgetRange::Over50k,
        BudgetRange::NotSure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetRange::Under10k => "under-10k",
            BudgetRange::From10kTo25k => "10k-25k",
            BudgetRange::From25kTo50k => "25k-50k",
            BudgetRange::Over50k => "over-50k",
            BudgetRange::NotSure => "not-sure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Under10k => "Under $10,000",
            BudgetRange::From10kTo25k => "$10,000 - $25,000",
            BudgetRange::From25kTo50k => "$25,000 - $50,000",
            BudgetRange::Over50k => "Over $50,000",
            BudgetRange::NotSure => "Not sure yet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofIssue {
    Leak,
    MissingShingles,
    StormDamage,
    Sagging,
    Age,
    EnergyEfficiency,
    IceDams,
}

impl RoofIssue {
    pub const ALL: [RoofIssue; 7] = [
        RoofIssue::Leak,
        RoofIssue::MissingShingles,
        RoofIssue::StormDamage,
        RoofIssue::Sagging,
        RoofIssue::Age,
        RoofIssue::EnergyEfficiency,
        RoofIssue::IceDams,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoofIssue::Leak => "leak",
            RoofIssue::MissingShingles => "missing-shingles",
            RoofIssue::StormDamage => "storm-damage",
            RoofIssue::Sagging => "sagging",
            RoofIssue::Age => "age",
            RoofIssue::EnergyEfficiency => "energy-efficiency",
            RoofIssue::IceDams => "ice-dams",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoofIssue::Leak => "Active leak",
            RoofIssue::MissingShingles => "Missing or damaged shingles",
            RoofIssue::StormDamage => "Recent storm damage",
            RoofIssue::Sagging => "Sagging roofline",
            RoofIssue::Age => "Roof is near end of life",
            RoofIssue::EnergyEfficiency => "High energy bills",
            RoofIssue::IceDams => "Ice dams in winter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferredContact {
    Phone,
    Email,
    Text,
}

impl PreferredContact {
    pub const ALL: [PreferredContact; 3] = [
        PreferredContact::Phone,
        PreferredContact::Email,
        PreferredContact::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredContact::Phone => "phone",
            PreferredContact::Email => "email",
            PreferredContact::Text => "text",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreferredContact::Phone => "Phone call",
            PreferredContact::Email => "Email",
            PreferredContact::Text => "Text message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
}

/// Accumulated answers across all wizard steps.
///
/// Fields belonging to a step that has not been validated yet may be empty;
/// once a step is marked complete its required fields are non-empty and
/// well-formed (see `validation::validate_step`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    // Unset selections are absent from the wire body, not null.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_roof_age: Option<u32>,
    #[serde(default)]
    pub issues: Vec<RoofIssue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Address,
    pub preferred_contact: PreferredContact,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            project_type: None,
            urgency: None,
            // Pre-selected defaults, mirroring the hosted form.
            property_type: Some(PropertyType::Residential),
            current_roof_age: None,
            issues: Vec::new(),
            budget_range: None,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: Address::default(),
            preferred_contact: PreferredContact::Phone,
        }
    }
}

impl FormData {
    /// Toggle a roof issue on or off. `issues` behaves as a set: order is
    /// irrelevant and duplicates never occur.
    pub fn toggle_issue(&mut self, issue: RoofIssue) {
        if let Some(pos) = self.issues.iter().position(|i| *i == issue) {
            self.issues.remove(pos);
        } else {
            self.issues.push(issue);
        }
    }

    pub fn has_issue(&self, issue: RoofIssue) -> bool {
        self.issues.contains(&issue)
    }

    /// Count of fields holding a non-empty value, out of
    /// [`DECLARED_FIELD_COUNT`]. Pre-selected defaults count as filled.
    pub fn filled_field_count(&self) -> usize {
        let mut filled = 0usize;
        if self.project_type.is_some() {
            filled += 1;
        }
        if self.urgency.is_some() {
            filled += 1;
        }
        if self.property_type.is_some() {
            filled += 1;
        }
        if self.current_roof_age.is_some() {
            filled += 1;
        }
        if !self.issues.is_empty() {
            filled += 1;
        }
        if self.budget_range.is_some() {
            filled += 1;
        }
        for text in [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address.street,
            &self.address.city,
            &self.address.zip_code,
        ] {
            if !text.trim().is_empty() {
                filled += 1;
            }
        }
        // preferred_contact is always set.
        filled += 1;
        filled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preselect_residential_and_phone() {
        let data = FormData::default();
        assert_eq!(data.property_type, Some(PropertyType::Residential));
        assert_eq!(data.preferred_contact, PreferredContact::Phone);
        assert!(data.project_type.is_none());
        assert!(data.issues.is_empty());
    }

    #[test]
    fn toggle_issue_behaves_as_set() {
        let mut data = FormData::default();
        data.toggle_issue(RoofIssue::Leak);
        data.toggle_issue(RoofIssue::Sagging);
        data.toggle_issue(RoofIssue::Leak);
        assert_eq!(data.issues, vec![RoofIssue::Sagging]);
        assert!(!data.has_issue(RoofIssue::Leak));
        assert!(data.has_issue(RoofIssue::Sagging));
    }

    #[test]
    fn filled_field_count_on_empty_form_counts_defaults() {
        // property_type and preferred_contact are pre-selected.
        assert_eq!(FormData::default().filled_field_count(), 2);
    }

    #[test]
    fn filled_field_count_ignores_whitespace_only_text() {
        let mut data = FormData::default();
        data.first_name = "   ".to_string();
        assert_eq!(data.filled_field_count(), 2);
        data.first_name = "Jane".to_string();
        assert_eq!(data.filled_field_count(), 3);
    }

    #[test]
    fn catalog_wire_names_match_serde() {
        for pt in ProjectType::ALL {
            let json = serde_json::to_string(&pt).unwrap();
            assert_eq!(json, format!("\"{}\"", pt.as_str()));
        }
        for b in BudgetRange::ALL {
            let json = serde_json::to_string(&b).unwrap();
            assert_eq!(json, format!("\"{}\"", b.as_str()));
        }
    }

    #[test]
    fn form_serializes_camel_case() {
        let mut data = FormData::default();
        data.project_type = Some(ProjectType::RoofRepair);
        data.address.zip_code = "80202".to_string();
        let v = serde_json::to_value(&data).unwrap();
        assert_eq!(v["projectType"], "roof-repair");
        assert_eq!(v["address"]["zipCode"], "80202");
        assert_eq!(v["preferredContact"], "phone");
    }

    #[test]
    fn unset_selections_are_absent_from_the_wire_body() {
        let v = serde_json::to_value(&FormData::default()).unwrap();
        let body = v.as_object().unwrap();
        for key in ["projectType", "urgency", "currentRoofAge", "budgetRange"] {
            assert!(!body.contains_key(key), "{key} should be omitted");
        }
        // Pre-selected defaults still serialize.
        assert!(body.contains_key("propertyType"));
        assert!(body.contains_key("preferredContact"));
    }
}
