//! Fixed option lists offered by the choice controls.

use authform_widgets::SelectOption;

pub static ROLE_OPTIONS: [SelectOption; 3] = [
    SelectOption::new("user", "User"),
    SelectOption::new("admin", "Administrator"),
    SelectOption::new("editor", "Editor"),
];

pub static GENDER_OPTIONS: [SelectOption; 4] = [
    SelectOption::new("male", "Male"),
    SelectOption::new("female", "Female"),
    SelectOption::new("other", "Other"),
    SelectOption::new("prefer-not-to-say", "Prefer not to say"),
];

pub static INTEREST_OPTIONS: [SelectOption; 5] = [
    SelectOption::new("technology", "Technology"),
    SelectOption::new("music", "Music"),
    SelectOption::new("sports", "Sports"),
    SelectOption::new("travel", "Travel"),
    SelectOption::new("reading", "Reading"),
];

pub static MARKETING_OPTIONS: [SelectOption; 3] = [
    SelectOption::new("email", "Email newsletters"),
    SelectOption::new("sms", "SMS alerts"),
    SelectOption::new("none", "No marketing"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use authform_widgets::select::{filter_options, NO_OPTIONS};

    #[test]
    fn role_search_for_admin_finds_only_administrator() {
        let found = filter_options(&ROLE_OPTIONS, "admin");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Administrator");
        assert_eq!(found[0].value, "admin");
    }

    #[test]
    fn unmatched_role_search_is_empty() {
        assert!(filter_options(&ROLE_OPTIONS, "superuser").is_empty());
        assert_eq!(NO_OPTIONS, "No options found");
    }

    #[test]
    fn default_role_is_listed() {
        assert!(ROLE_OPTIONS.iter().any(|o| o.value == "user"));
    }
}
