//! Shared helpers for integration tests.

use std::path::Path;

use platea::{
    create_pending_booking, initialize_inventory, Amount, Booking, BookingRequest, Contact,
    Database, DatabaseConfig, LabelingScheme, SeatLabel,
};

/// Two rows, A premium and B standard, five seats each.
pub const DEFAULT_SCHEME: &str = "\
rows:
  - row: A
    seats: 5
    tier: premium
  - row: B
    seats: 5
";

#[allow(dead_code)]
pub fn open_database(path: &Path) -> Database {
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Opens a database at `path` and populates it from [`DEFAULT_SCHEME`].
#[allow(dead_code)]
pub fn seeded_database(path: &Path) -> Database {
    let mut db = open_database(path);
    let scheme = LabelingScheme::from_yaml(DEFAULT_SCHEME).unwrap();
    initialize_inventory(&mut db, &scheme).unwrap();
    db
}

/// Records a pending booking for the given seat labels.
#[allow(dead_code)]
pub fn submit(db: &mut Database, seat_labels: &[&str]) -> Booking {
    let contact = Contact::new("buyer@example.com", "+7 900 123-45-67").unwrap();
    let amount = Amount::from_minor(15000).unwrap();
    let labels: Vec<SeatLabel> = seat_labels.iter().map(|l| l.parse().unwrap()).collect();
    let request =
        BookingRequest::new(contact, amount, labels, "0proof-1-0-png".parse().unwrap()).unwrap();
    create_pending_booking(db, &request).unwrap()
}

#[allow(dead_code)]
pub fn label(text: &str) -> SeatLabel {
    text.parse().unwrap()
}
