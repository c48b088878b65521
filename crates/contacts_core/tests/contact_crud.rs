use contacts_core::{
    Contact, ContactError, ContactService, ContactValidationError, DocumentStore, JsonFileStore,
    MemoryStore, SqliteStore, CONTACT_ADDED_MESSAGE,
};

fn memory_service() -> ContactService<MemoryStore> {
    ContactService::new(MemoryStore::new())
}

fn patrick() -> Contact {
    Contact::new("Patrick", "Martin")
        .with_phone_number("0123456789")
        .with_address("1 rue du chemin, 75000 Paris")
}

fn jean(phone_number: &str) -> Contact {
    Contact::new("Jean", "Smith")
        .with_phone_number(phone_number)
        .with_address("1 rue du chemin, 75015 Paris")
}

#[test]
fn saved_contact_round_trips_through_find() {
    let mut service = memory_service();
    let contact = patrick();

    let receipt = service.save(&contact, false).unwrap().unwrap();
    assert_eq!(receipt.message, CONTACT_ADDED_MESSAGE);

    let found = service.find(&contact).unwrap().unwrap();
    assert_eq!(found.id, receipt.id);
    assert_eq!(found.contact.first_name, "Patrick");
    assert_eq!(found.contact.last_name, "Martin");
    assert_eq!(found.contact.phone_number, "0123456789");
    assert_eq!(found.contact.address, "1 rue du chemin, 75000 Paris");
}

#[test]
fn find_and_exists_report_absent_contact() {
    let service = memory_service();
    assert!(service.find(&patrick()).unwrap().is_none());
    assert!(!service.exists(&patrick()).unwrap());
}

#[test]
fn save_exists_find_delete_scenario() {
    let mut service = memory_service();
    let contact = patrick();

    service.save(&contact, false).unwrap().unwrap();
    assert!(service.exists(&contact).unwrap());
    assert_eq!(service.find(&contact).unwrap().unwrap().contact, contact);

    let removed = service.delete(&contact).unwrap();
    assert_eq!(removed.len(), 1);
    assert!(!service.exists(&contact).unwrap());
}

#[test]
fn delete_is_idempotent_in_effect() {
    let mut service = memory_service();
    let contact = jean("0123456789");

    assert!(service.delete(&contact).unwrap().is_empty());

    service.save(&contact, false).unwrap();
    let first = service.delete(&contact).unwrap();
    let second = service.delete(&contact).unwrap();

    assert!(!first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn save_with_validation_accepts_valid_contact() {
    let mut service = memory_service();
    let contact = jean("0123456789");

    assert!(service.save(&contact, true).unwrap().is_some());
    assert!(service.exists(&contact).unwrap());
}

#[test]
fn save_with_validation_rejects_invalid_phone_and_leaves_store_unchanged() {
    let mut service = memory_service();
    let contact = jean("abcd");

    let err = service.save(&contact, true).unwrap_err();
    assert!(matches!(
        err,
        ContactError::Validation(ContactValidationError::InvalidPhoneNumber { .. })
    ));
    assert!(service.store().is_empty());
    assert!(!service.exists(&contact).unwrap());
}

#[test]
fn save_without_validation_stores_invalid_contact() {
    let mut service = memory_service();
    assert!(service.save(&jean("abcd"), false).unwrap().is_some());
    assert_eq!(service.store().len(), 1);
}

#[test]
fn duplicate_natural_keys_are_both_saved_and_find_returns_first() {
    let mut service = memory_service();
    let original = jean("0123456789");
    let duplicate = jean("0987654321");

    let first = service.save(&original, false).unwrap();
    let second = service.save(&duplicate, false).unwrap();
    assert!(first.is_some());
    assert!(second.is_some());
    assert_eq!(service.list_all().unwrap().len(), 2);

    let found = service.find(&duplicate).unwrap().unwrap();
    assert_eq!(found.contact.phone_number, "0123456789");
}

#[test]
fn delete_removes_one_duplicate_per_call() {
    let mut service = memory_service();
    service.save(&jean("0123456789"), false).unwrap();
    service.save(&jean("0987654321"), false).unwrap();

    assert_eq!(service.delete(&jean("")).unwrap().len(), 1);
    assert!(service.exists(&jean("")).unwrap());
    let remaining = service.find(&jean("")).unwrap().unwrap();
    assert_eq!(remaining.contact.phone_number, "0987654321");

    assert_eq!(service.delete(&jean("")).unwrap().len(), 1);
    assert!(service.delete(&jean("")).unwrap().is_empty());
}

#[test]
fn list_all_returns_contacts_in_insertion_order() {
    let mut service = memory_service();
    service.save(&patrick(), false).unwrap();
    service.save(&jean("0123456789"), false).unwrap();

    let names: Vec<_> = service
        .list_all()
        .unwrap()
        .iter()
        .map(Contact::full_name)
        .collect();
    assert_eq!(names, vec!["Patrick Martin", "Jean Smith"]);
}

#[test]
fn replaced_store_is_observed_immediately() {
    let mut service = memory_service();
    service.save(&patrick(), false).unwrap();

    let previous = service.replace_store(MemoryStore::new());
    assert_eq!(previous.len(), 1);
    assert!(!service.exists(&patrick()).unwrap());

    service.replace_store(previous);
    assert!(service.exists(&patrick()).unwrap());
}

#[test]
fn boxed_stores_can_be_swapped_across_backends() {
    let dir = tempfile::tempdir().unwrap();
    let mut service: ContactService<Box<dyn DocumentStore>> =
        ContactService::new(Box::new(MemoryStore::new()));
    service.save(&patrick(), false).unwrap();

    service.replace_store(Box::new(
        JsonFileStore::open(dir.path().join("db.json")).unwrap(),
    ));
    assert!(!service.exists(&patrick()).unwrap());
    service.save(&patrick(), false).unwrap();
    assert!(service.exists(&patrick()).unwrap());

    service.replace_store(Box::new(SqliteStore::open_in_memory().unwrap()));
    assert!(service.list_all().unwrap().is_empty());
}

#[test]
fn scenario_holds_for_every_backend() {
    let dir = tempfile::tempdir().unwrap();
    let stores: Vec<Box<dyn DocumentStore>> = vec![
        Box::new(MemoryStore::new()),
        Box::new(JsonFileStore::open(dir.path().join("db.json")).unwrap()),
        Box::new(SqliteStore::open(dir.path().join("db.sqlite")).unwrap()),
    ];

    for store in stores {
        let mut service = ContactService::new(store);
        let contact = patrick();

        service.save(&contact, false).unwrap().unwrap();
        service.save(&contact, false).unwrap().unwrap();
        assert_eq!(service.find(&contact).unwrap().unwrap().contact, contact);
        assert_eq!(service.delete(&contact).unwrap().len(), 1);
        assert!(service.exists(&contact).unwrap());
        assert_eq!(service.delete(&contact).unwrap().len(), 1);
        assert!(!service.exists(&contact).unwrap());
        assert!(service.delete(&contact).unwrap().is_empty());
    }
}
