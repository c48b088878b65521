use contacts_core::{Contact, ContactValidationError};

fn patrick() -> Contact {
    Contact::new("Patrick", "Martin")
        .with_phone_number("0123456789")
        .with_address("1 rue du chemin, 75000 Paris")
}

#[test]
fn contact_new_sets_defaults() {
    let contact = Contact::new("Jean", "Smith");

    assert_eq!(contact.first_name, "Jean");
    assert_eq!(contact.last_name, "Smith");
    assert_eq!(contact.phone_number, "");
    assert_eq!(contact.address, "");
}

#[test]
fn full_name_joins_names_with_single_space() {
    assert_eq!(patrick().full_name(), "Patrick Martin");
    assert_eq!(Contact::new("", "").full_name(), " ");
}

#[test]
fn display_lists_name_phone_and_address() {
    assert_eq!(
        patrick().to_string(),
        "Patrick Martin - tel: 0123456789 - address: 1 rue du chemin, 75000 Paris"
    );
}

#[test]
fn valid_contact_passes_validation() {
    assert_eq!(patrick().validate(), Ok(()));
}

#[test]
fn decorated_international_phone_number_is_accepted() {
    let contact = patrick().with_phone_number("+33 (1) 23456789");
    assert_eq!(contact.validate(), Ok(()));
}

#[test]
fn non_numeric_phone_number_is_rejected_with_value_in_message() {
    let contact = patrick().with_phone_number("abcd");

    let err = contact.check_phone_number().unwrap_err();
    assert_eq!(
        err,
        ContactValidationError::InvalidPhoneNumber {
            phone_number: "abcd".to_string()
        }
    );
    assert!(err.to_string().contains("abcd"));
}

#[test]
fn short_phone_number_is_rejected() {
    let contact = patrick().with_phone_number("+33 12345");
    assert!(matches!(
        contact.validate(),
        Err(ContactValidationError::InvalidPhoneNumber { .. })
    ));
}

#[test]
fn empty_names_are_rejected() {
    let both = Contact::new("", "").with_phone_number("0123456789");
    assert_eq!(both.check_names(), Err(ContactValidationError::EmptyName));

    let last_only = Contact::new("Patrick", "").with_phone_number("0123456789");
    assert_eq!(last_only.validate(), Err(ContactValidationError::EmptyName));
    assert_eq!(
        ContactValidationError::EmptyName.to_string(),
        "first name and last name cannot be empty"
    );
}

#[test]
fn punctuation_in_names_is_rejected() {
    let contact = Contact::new("Patrick%#/?/", "Martin%#/?/").with_phone_number("0123456789");

    let err = contact.check_names().unwrap_err();
    assert!(matches!(err, ContactValidationError::InvalidName { .. }));
    assert!(err.to_string().contains("Patrick%#/?/ Martin%#/?/"));
}

#[test]
fn digits_in_names_are_rejected() {
    let contact = Contact::new("Patrick2", "Martin").with_phone_number("0123456789");
    assert!(matches!(
        contact.validate(),
        Err(ContactValidationError::InvalidName { .. })
    ));
}

#[test]
fn validation_does_not_mutate_contact() {
    let contact = patrick().with_phone_number("+33 (1) 23456789");
    let before = contact.clone();
    contact.validate().unwrap();
    assert_eq!(contact, before);
}

#[test]
fn serialization_uses_snake_case_fields_and_defaults_optional_ones() {
    let json = serde_json::to_value(patrick()).unwrap();
    assert_eq!(json["first_name"], "Patrick");
    assert_eq!(json["last_name"], "Martin");
    assert_eq!(json["phone_number"], "0123456789");
    assert_eq!(json["address"], "1 rue du chemin, 75000 Paris");

    let decoded: Contact =
        serde_json::from_value(serde_json::json!({"first_name": "Jean", "last_name": "Smith"}))
            .unwrap();
    assert_eq!(decoded, Contact::new("Jean", "Smith"));
}
