//! Mock identities - Identità sintetiche per i contenuti demo
//!
//! Pool fisso di utenti non autenticati usato per popolare la chat giornaliera
//! e i like iniziali. Gli id non collidono mai con quelli reali, che sono
//! timestamp in millisecondi.

/// Utente sintetico del pool demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockIdentity {
    pub id: &'static str,
    pub email: &'static str,
    pub name: &'static str,
}

pub static MOCK_IDENTITIES: [MockIdentity; 6] = [
    MockIdentity {
        id: "1",
        email: "alice@umich.edu",
        name: "Alice Johnson",
    },
    MockIdentity {
        id: "2",
        email: "bob@umich.edu",
        name: "Bob Smith",
    },
    MockIdentity {
        id: "3",
        email: "charlie@umich.edu",
        name: "Charlie Brown",
    },
    MockIdentity {
        id: "4",
        email: "diana@umich.edu",
        name: "Diana Lee",
    },
    MockIdentity {
        id: "5",
        email: "ethan@umich.edu",
        name: "Ethan Davis",
    },
    MockIdentity {
        id: "6",
        email: "fiona@umich.edu",
        name: "Fiona Wilson",
    },
];
